use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use shelfmark_auth_types::token::{JwtClaims, TokenConfig, validate_token};

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

fn now_secs() -> u64 {
    Utc::now().timestamp() as u64
}

fn issue_token(user: &User, secret: &str, ttl_secs: u64) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ttl_secs;
    let claims = JwtClaims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        role: user.role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_access_token(user: &User, tokens: &TokenConfig) -> Result<(String, u64), ApiError> {
    issue_token(user, &tokens.access_secret, tokens.access_exp_secs)
}

pub fn issue_refresh_token(user: &User, tokens: &TokenConfig) -> Result<String, ApiError> {
    issue_token(user, &tokens.refresh_secret, tokens.refresh_exp_secs).map(|(token, _)| token)
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
    pub access_token_exp: u64,
}

/// Exchanges a valid refresh token for a new access token. The refresh token
/// itself is NOT rotated — callers keep it until it expires.
pub struct RefreshTokenUseCase<U: UserRepository> {
    pub users: U,
    pub tokens: TokenConfig,
}

impl<U: UserRepository> RefreshTokenUseCase<U> {
    pub async fn execute(&self, refresh_token: &str) -> Result<RefreshTokenOutput, ApiError> {
        // Signature and expiry are checked before touching the database, so a
        // forged token never triggers a user lookup.
        let claims = validate_token(refresh_token, &self.tokens.refresh_secret)
            .map_err(|_| ApiError::InvalidRefreshToken)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| ApiError::InvalidRefreshToken)?;

        // The user may have been deleted since the token was issued.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let (access_token, access_token_exp) = issue_access_token(&user, &self.tokens)?;

        Ok(RefreshTokenOutput {
            access_token,
            access_token_exp,
        })
    }
}
