use axum::http::StatusCode;

/// `GET /healthz` — liveness probe.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness probe. The api service is ready as soon as it is
/// serving; database failures surface per-request as 500s.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
