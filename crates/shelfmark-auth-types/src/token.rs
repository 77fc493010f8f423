//! JWT access-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access-token lifetime in seconds (4 hours).
pub const DEFAULT_ACCESS_TOKEN_EXP: u64 = 14400;

/// Default refresh-token lifetime in seconds (7 days).
pub const DEFAULT_REFRESH_TOKEN_EXP: u64 = 604800;

/// Signing secrets and lifetimes for both token types.
///
/// Injected into service state at startup; the [`crate::identity::Identity`]
/// extractor pulls it out via axum `FromRef`.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_exp_secs: u64,
    pub refresh_exp_secs: u64,
}

/// User identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub role: u8,
    pub exp: u64,
}

/// Errors returned by token validation.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload shared by token issuance (api service) and validation.
///
/// `sub` carries the user ID as a UUID string; `role` is the `u8` wire value
/// of [`shelfmark_domain::user::UserRole`]; `exp` is seconds since epoch.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: u8,
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
/// Default leeway = 60s — tolerates clock skew between hosts.
pub fn validate_token(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate an access token, returning parsed identity.
///
/// Primary public API for request authentication — the `Identity` extractor
/// calls this on every protected request.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = validate_token(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        email: claims.email,
        role: claims.role,
        exp: claims.exp,
    })
}
