use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use shelfmark_auth_types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::token::RefreshTokenUseCase;
use crate::usecase::user::{
    AuthenticatedUser, GetUserUseCase, LoginUserInput, LoginUserUseCase, RegisterUserInput,
    RegisterUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<AuthenticatedUser> for TokenPairResponse {
    fn from(auth: AuthenticatedUser) -> Self {
        Self {
            access_token: auth.access_token,
            refresh_token: auth.refresh_token,
        }
    }
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenPairResponse>), ApiError> {
    let usecase = RegisterUserUseCase {
        users: state.user_repo(),
        tokens: state.tokens.clone(),
    };
    let auth = usecase
        .execute(RegisterUserInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(auth.into())))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<TokenPairResponse>, ApiError> {
    let usecase = LoginUserUseCase {
        users: state.user_repo(),
        tokens: state.tokens.clone(),
    };
    let auth = usecase
        .execute(LoginUserInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(auth.into()))
}

// ── POST /users/refresh-token ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct AccessTokenResponse {
    pub access_token: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, ApiError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        tokens: state.tokens.clone(),
    };
    let out = usecase.execute(&body.refresh_token).await?;
    Ok(Json(AccessTokenResponse {
        access_token: out.access_token,
    }))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

/// The password hash never leaves the service.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub role: u8,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetUserUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(UserResponse {
        id: user.id.to_string(),
        email: user.email,
        role: user.role,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }))
}
