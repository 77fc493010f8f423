#![allow(async_fn_in_trait)]

use uuid::Uuid;

use shelfmark_domain::book::BookSortBy;
use shelfmark_domain::pagination::PageRequest;
use shelfmark_domain::preference::PreferenceStatus;

use crate::domain::types::{Book, BookFilter, Preference, Review, User};
use crate::error::ApiError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for the book catalog.
pub trait BookRepository: Send + Sync {
    /// List books matching `filter`, sorted and paginated. The returned count
    /// is the number of rows matching the filter, not the table size.
    async fn list(
        &self,
        filter: &BookFilter,
        sort_by: BookSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Book>, u64), ApiError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, ApiError>;

    async fn exists(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn create(&self, book: &Book) -> Result<(), ApiError>;

    /// Full-document update. Returns `false` when the book does not exist.
    async fn update(&self, book: &Book) -> Result<bool, ApiError>;

    /// Hard delete. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for book reviews.
pub trait ReviewRepository: Send + Sync {
    async fn create(&self, review: &Review) -> Result<(), ApiError>;
    async fn list_by_book(&self, book_id: Uuid) -> Result<Vec<Review>, ApiError>;
}

/// Repository for reading-status preferences (the user↔book join entity).
pub trait PreferenceRepository: Send + Sync {
    /// Atomic insert-or-update keyed on `(user_id, book_id)` — a single
    /// statement, so concurrent upserts cannot lose writes.
    async fn upsert(&self, preference: &Preference) -> Result<(), ApiError>;

    async fn get(&self, user_id: Uuid, book_id: Uuid) -> Result<Option<Preference>, ApiError>;

    async fn list_for_user(
        &self,
        user_id: Uuid,
        status: Option<PreferenceStatus>,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError>;

    async fn list_for_book(
        &self,
        book_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Preference>, u64), ApiError>;

    /// Delete an entry. Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, book_id: Uuid) -> Result<bool, ApiError>;
}
