use chrono::{DateTime, Utc};
use uuid::Uuid;

use shelfmark_domain::book::BookStatus;
use shelfmark_domain::preference::PreferenceStatus;

/// Registered account. `role` uses the `u8` wire values of
/// [`shelfmark_domain::user::UserRole`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Catalog entry.
#[derive(Debug, Clone)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub thumbnail: String,
    /// Stored aggregate; nothing recomputes it when reviews change.
    pub avg_rating: f64,
    pub status: BookStatus,
    pub added_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Reader review of a book.
#[derive(Debug, Clone)]
pub struct Review {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub description: String,
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Reading-status relation between a user and a book. At most one entry per
/// `(user_id, book_id)` pair.
#[derive(Debug, Clone)]
pub struct Preference {
    pub user_id: Uuid,
    pub book_id: Uuid,
    pub status: PreferenceStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for the books listing. `search` is a case-insensitive substring
/// match across title, author, and genre; the rest are exact matches.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub status: Option<BookStatus>,
}

/// Validate a review rating: integer stars, 1–5.
pub fn validate_rating(rating: i16) -> bool {
    (1..=5).contains(&rating)
}

/// Minimal email sanity check. Full RFC validation is not attempted; the
/// unique index on `users.email` is the real guard.
pub fn validate_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
