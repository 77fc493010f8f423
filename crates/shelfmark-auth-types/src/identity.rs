//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

use crate::token::{TokenConfig, validate_access_token};

/// Caller identity established from the `Authorization: Bearer` header.
///
/// Returns 401 if the header is absent, not a Bearer scheme, or the access
/// token fails validation. Role enforcement is done by handlers afterwards.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: u8,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    TokenConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let config = TokenConfig::from_ref(state);
        let bearer = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.strip_prefix("Bearer "))
            .map(str::to_owned);

        async move {
            let token = bearer.ok_or(StatusCode::UNAUTHORIZED)?;
            let info = validate_access_token(&token, &config.access_secret)
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Ok(Self {
                user_id: info.user_id,
                email: info.email,
                role: info.role,
            })
        }
    }
}
