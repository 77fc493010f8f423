use chrono::Utc;
use uuid::Uuid;

use shelfmark_auth_types::token::TokenConfig;
use shelfmark_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_email};
use crate::error::ApiError;
use crate::usecase::token::{issue_access_token, issue_refresh_token};

// ── RegisterUser ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RegisterUserInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

/// Creates an account and signs the new user in. Every registration produces
/// a `normal` role; admins are promoted out of band.
pub struct RegisterUserUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenConfig,
}

impl<U: UserRepository> RegisterUserUseCase<U> {
    pub async fn execute(&self, input: RegisterUserInput) -> Result<AuthenticatedUser, ApiError> {
        let email = input.email.trim().to_owned();
        if !validate_email(&email) || input.password.is_empty() {
            return Err(ApiError::MissingData);
        }

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::UserAlreadyExists);
        }

        let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApiError::Internal(e.into()))?;

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash,
            role: UserRole::Normal.as_u8(),
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        let (access_token, access_token_exp) = issue_access_token(&user, &self.tokens)?;
        let refresh_token = issue_refresh_token(&user, &self.tokens)?;

        Ok(AuthenticatedUser {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── LoginUser ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct LoginUserInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUserUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenConfig,
}

impl<U: UserRepository> LoginUserUseCase<U> {
    pub async fn execute(&self, input: LoginUserInput) -> Result<AuthenticatedUser, ApiError> {
        // Unknown email and wrong password collapse into one error, so the
        // response does not reveal which accounts exist.
        let user = self
            .users
            .find_by_email(input.email.trim())
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        let verified = bcrypt::verify(&input.password, &user.password_hash)
            .map_err(|e| ApiError::Internal(e.into()))?;
        if !verified {
            return Err(ApiError::InvalidCredentials);
        }

        let (access_token, access_token_exp) = issue_access_token(&user, &self.tokens)?;
        let refresh_token = issue_refresh_token(&user, &self.tokens)?;

        Ok(AuthenticatedUser {
            user,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
        self.users.find_by_id(id).await?.ok_or(ApiError::UserNotFound)
    }
}
