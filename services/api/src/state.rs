use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use shelfmark_auth_types::token::TokenConfig;

use crate::infra::db::{
    DbBookRepository, DbPreferenceRepository, DbReviewRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenConfig,
}

// Lets the `Identity` extractor pull the token config out of state.
impl FromRef<AppState> for TokenConfig {
    fn from_ref(state: &AppState) -> TokenConfig {
        state.tokens.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn book_repo(&self) -> DbBookRepository {
        DbBookRepository {
            db: self.db.clone(),
        }
    }

    pub fn review_repo(&self) -> DbReviewRepository {
        DbReviewRepository {
            db: self.db.clone(),
        }
    }

    pub fn preference_repo(&self) -> DbPreferenceRepository {
        DbPreferenceRepository {
            db: self.db.clone(),
        }
    }
}
