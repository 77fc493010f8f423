use chrono::Utc;
use uuid::Uuid;

use shelfmark_domain::pagination::{PageRequest, Paginated};
use shelfmark_domain::preference::PreferenceStatus;

use crate::domain::repository::{BookRepository, PreferenceRepository};
use crate::domain::types::Preference;
use crate::error::ApiError;

// ── UpsertPreference ─────────────────────────────────────────────────────────

/// Sets a user's reading status for a book. Re-submitting for the same pair
/// overwrites the status instead of adding a second entry.
pub struct UpsertPreferenceUseCase<B: BookRepository, P: PreferenceRepository> {
    pub books: B,
    pub preferences: P,
}

impl<B: BookRepository, P: PreferenceRepository> UpsertPreferenceUseCase<B, P> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        status: PreferenceStatus,
    ) -> Result<(), ApiError> {
        if !self.books.exists(book_id).await? {
            return Err(ApiError::BookNotFound);
        }

        let now = Utc::now();
        let preference = Preference {
            user_id,
            book_id,
            status,
            created_at: now,
            updated_at: now,
        };
        self.preferences.upsert(&preference).await
    }
}

// ── GetPreference ────────────────────────────────────────────────────────────

pub struct GetPreferenceUseCase<P: PreferenceRepository> {
    pub preferences: P,
}

impl<P: PreferenceRepository> GetPreferenceUseCase<P> {
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> Result<Preference, ApiError> {
        self.preferences
            .get(user_id, book_id)
            .await?
            .ok_or(ApiError::PreferenceNotFound)
    }
}

// ── ListUserPreferences ──────────────────────────────────────────────────────

pub struct ListUserPreferencesUseCase<P: PreferenceRepository> {
    pub preferences: P,
}

impl<P: PreferenceRepository> ListUserPreferencesUseCase<P> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        status: Option<PreferenceStatus>,
        page: PageRequest,
    ) -> Result<Paginated<Preference>, ApiError> {
        let page = page.clamped();
        let (entries, total) = self.preferences.list_for_user(user_id, status, page).await?;
        Ok(Paginated::new(page, total, entries))
    }
}

// ── ListBookPreferences ──────────────────────────────────────────────────────

pub struct ListBookPreferencesUseCase<B: BookRepository, P: PreferenceRepository> {
    pub books: B,
    pub preferences: P,
}

impl<B: BookRepository, P: PreferenceRepository> ListBookPreferencesUseCase<B, P> {
    pub async fn execute(
        &self,
        book_id: Uuid,
        page: PageRequest,
    ) -> Result<Paginated<Preference>, ApiError> {
        if !self.books.exists(book_id).await? {
            return Err(ApiError::BookNotFound);
        }
        let page = page.clamped();
        let (entries, total) = self.preferences.list_for_book(book_id, page).await?;
        Ok(Paginated::new(page, total, entries))
    }
}

// ── RemovePreference ─────────────────────────────────────────────────────────

/// Removing a pair that was never set is a no-op, not an error.
pub struct RemovePreferenceUseCase<P: PreferenceRepository> {
    pub preferences: P,
}

impl<P: PreferenceRepository> RemovePreferenceUseCase<P> {
    pub async fn execute(&self, user_id: Uuid, book_id: Uuid) -> Result<(), ApiError> {
        self.preferences.delete(user_id, book_id).await?;
        Ok(())
    }
}
