use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Api service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("book not found")]
    BookNotFound,
    #[error("preference not found")]
    PreferenceNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("missing data")]
    MissingData,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::PreferenceNotFound => "PREFERENCE_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::MissingData => "MISSING_DATA",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound | Self::BookNotFound | Self::PreferenceNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::MissingData => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidRefreshToken => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
