use shelfmark_auth_types::token::{
    DEFAULT_ACCESS_TOKEN_EXP, DEFAULT_REFRESH_TOKEN_EXP, TokenConfig,
};

/// Api service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3110). Env var: `API_PORT`.
    pub api_port: u16,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_access_secret: String,
    /// HMAC secret for signing JWT refresh tokens.
    pub jwt_refresh_secret: String,
    /// Access-token lifetime in seconds (default 4h). Env var: `ACCESS_TOKEN_EXP`.
    pub access_token_exp_secs: u64,
    /// Refresh-token lifetime in seconds (default 7d). Env var: `REFRESH_TOKEN_EXP`.
    pub refresh_token_exp_secs: u64,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3110),
            jwt_access_secret: std::env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET"),
            jwt_refresh_secret: std::env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET"),
            access_token_exp_secs: std::env::var("ACCESS_TOKEN_EXP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_ACCESS_TOKEN_EXP),
            refresh_token_exp_secs: std::env::var("REFRESH_TOKEN_EXP")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REFRESH_TOKEN_EXP),
        }
    }

    pub fn token_config(&self) -> TokenConfig {
        TokenConfig {
            access_secret: self.jwt_access_secret.clone(),
            refresh_secret: self.jwt_refresh_secret.clone(),
            access_exp_secs: self.access_token_exp_secs,
            refresh_exp_secs: self.refresh_token_exp_secs,
        }
    }
}
