use shelfmark_api::error::ApiError;
use shelfmark_api::usecase::token::RefreshTokenUseCase;
use shelfmark_api::usecase::user::{
    LoginUserInput, LoginUserUseCase, RegisterUserInput, RegisterUserUseCase,
};
use shelfmark_auth_types::token::{validate_access_token, validate_token};

use crate::helpers::{
    MockUserRepo, TEST_ACCESS_SECRET, TEST_REFRESH_SECRET, test_tokens, test_user,
};

// ── Register → Login ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_login_with_password_used_at_registration() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let register = RegisterUserUseCase {
        users: repo,
        tokens: test_tokens(),
    };
    let registered = register
        .execute(RegisterUserInput {
            email: "reader@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let login = LoginUserUseCase {
        users: MockUserRepo::new(users.lock().unwrap().clone()),
        tokens: test_tokens(),
    };
    let logged_in = login
        .execute(LoginUserInput {
            email: "reader@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(logged_in.user.id, registered.user.id);
}

#[tokio::test]
async fn should_reject_second_registration_with_same_email() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let register = RegisterUserUseCase {
        users: repo,
        tokens: test_tokens(),
    };
    register
        .execute(RegisterUserInput {
            email: "reader@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let again = RegisterUserUseCase {
        users: MockUserRepo::new(users.lock().unwrap().clone()),
        tokens: test_tokens(),
    };
    let result = again
        .execute(RegisterUserInput {
            email: "reader@example.com".to_owned(),
            password: "different".to_owned(),
        })
        .await;

    assert!(
        matches!(result, Err(ApiError::UserAlreadyExists)),
        "expected UserAlreadyExists, got {result:?}"
    );
}

// ── Registration tokens ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_pair_bound_to_the_right_secrets() {
    let register = RegisterUserUseCase {
        users: MockUserRepo::empty(),
        tokens: test_tokens(),
    };
    let auth = register
        .execute(RegisterUserInput {
            email: "reader@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let info = validate_access_token(&auth.access_token, TEST_ACCESS_SECRET).unwrap();
    assert_eq!(info.user_id, auth.user.id);
    assert_eq!(info.email, auth.user.email);
    assert_eq!(info.role, auth.user.role);

    // Tokens are not interchangeable across secrets.
    assert!(validate_token(&auth.access_token, TEST_REFRESH_SECRET).is_err());
    assert!(validate_token(&auth.refresh_token, TEST_ACCESS_SECRET).is_err());
}

// ── Refresh flow ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_exchange_refresh_token_for_fresh_access_token() {
    let repo = MockUserRepo::empty();
    let users = repo.users_handle();

    let register = RegisterUserUseCase {
        users: repo,
        tokens: test_tokens(),
    };
    let auth = register
        .execute(RegisterUserInput {
            email: "reader@example.com".to_owned(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let refresh = RefreshTokenUseCase {
        users: MockUserRepo::new(users.lock().unwrap().clone()),
        tokens: test_tokens(),
    };
    let out = refresh.execute(&auth.refresh_token).await.unwrap();

    let info = validate_access_token(&out.access_token, TEST_ACCESS_SECRET).unwrap();
    assert_eq!(info.user_id, auth.user.id);
}

#[tokio::test]
async fn should_reject_access_token_presented_as_refresh_token() {
    let user = test_user();
    // Any access token will do; grab one via login.
    let login = LoginUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        tokens: test_tokens(),
    };
    let auth = login
        .execute(LoginUserInput {
            email: user.email.clone(),
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let refresh = RefreshTokenUseCase {
        users: MockUserRepo::new(vec![user]),
        tokens: test_tokens(),
    };
    let result = refresh.execute(&auth.access_token).await;

    assert!(
        matches!(result, Err(ApiError::InvalidRefreshToken)),
        "expected InvalidRefreshToken, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_refresh_when_user_no_longer_exists() {
    let user = test_user();
    let login = LoginUserUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        tokens: test_tokens(),
    };
    let auth = login
        .execute(LoginUserInput {
            email: user.email,
            password: "hunter22".to_owned(),
        })
        .await
        .unwrap();

    let refresh = RefreshTokenUseCase {
        users: MockUserRepo::empty(),
        tokens: test_tokens(),
    };
    let result = refresh.execute(&auth.refresh_token).await;

    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}
