use chrono::Utc;
use uuid::Uuid;

use shelfmark_domain::book::{BookSortBy, BookStatus};
use shelfmark_domain::pagination::{PageRequest, Paginated};

use crate::domain::repository::{BookRepository, ReviewRepository};
use crate::domain::types::{Book, BookFilter, Review};
use crate::error::ApiError;

/// Writable book fields, shared by create and update.
#[derive(Debug)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub thumbnail: String,
    pub status: Option<BookStatus>,
}

impl BookPayload {
    fn validate(&self) -> Result<(), ApiError> {
        let complete = !self.title.trim().is_empty()
            && !self.author.trim().is_empty()
            && !self.genre.trim().is_empty()
            && !self.thumbnail.trim().is_empty()
            && self.publication_year > 0;
        if complete { Ok(()) } else { Err(ApiError::MissingData) }
    }
}

// ── CreateBook ───────────────────────────────────────────────────────────────

pub struct CreateBookUseCase<B: BookRepository> {
    pub books: B,
}

impl<B: BookRepository> CreateBookUseCase<B> {
    pub async fn execute(&self, added_by: Uuid, payload: BookPayload) -> Result<Book, ApiError> {
        payload.validate()?;

        let now = Utc::now();
        let book = Book {
            id: Uuid::now_v7(),
            title: payload.title,
            author: payload.author,
            genre: payload.genre,
            publication_year: payload.publication_year,
            thumbnail: payload.thumbnail,
            avg_rating: 0.0,
            status: payload.status.unwrap_or_default(),
            added_by,
            created_at: now,
            updated_at: now,
        };
        self.books.create(&book).await?;
        Ok(book)
    }
}

// ── ListBooks ────────────────────────────────────────────────────────────────

pub struct ListBooksUseCase<B: BookRepository> {
    pub books: B,
}

impl<B: BookRepository> ListBooksUseCase<B> {
    pub async fn execute(
        &self,
        filter: BookFilter,
        sort_by: BookSortBy,
        page: PageRequest,
    ) -> Result<Paginated<Book>, ApiError> {
        let page = page.clamped();
        let (books, total) = self.books.list(&filter, sort_by, page).await?;
        Ok(Paginated::new(page, total, books))
    }
}

// ── GetBook ──────────────────────────────────────────────────────────────────

pub struct GetBookUseCase<B: BookRepository, R: ReviewRepository> {
    pub books: B,
    pub reviews: R,
}

impl<B: BookRepository, R: ReviewRepository> GetBookUseCase<B, R> {
    pub async fn execute(&self, id: Uuid) -> Result<(Book, Vec<Review>), ApiError> {
        let book = self.books.find_by_id(id).await?.ok_or(ApiError::BookNotFound)?;
        let reviews = self.reviews.list_by_book(id).await?;
        Ok((book, reviews))
    }
}

// ── UpdateBook ───────────────────────────────────────────────────────────────

/// Full-document replace of the writable fields. `added_by`, `created_at`,
/// and `avg_rating` survive the update untouched.
pub struct UpdateBookUseCase<B: BookRepository> {
    pub books: B,
}

impl<B: BookRepository> UpdateBookUseCase<B> {
    pub async fn execute(&self, id: Uuid, payload: BookPayload) -> Result<Book, ApiError> {
        payload.validate()?;

        let current = self.books.find_by_id(id).await?.ok_or(ApiError::BookNotFound)?;

        let updated = Book {
            title: payload.title,
            author: payload.author,
            genre: payload.genre,
            publication_year: payload.publication_year,
            thumbnail: payload.thumbnail,
            status: payload.status.unwrap_or(current.status),
            updated_at: Utc::now(),
            ..current
        };
        if !self.books.update(&updated).await? {
            // Deleted between the read and the write.
            return Err(ApiError::BookNotFound);
        }
        Ok(updated)
    }
}

// ── DeleteBook ───────────────────────────────────────────────────────────────

pub struct DeleteBookUseCase<B: BookRepository> {
    pub books: B,
}

impl<B: BookRepository> DeleteBookUseCase<B> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        if !self.books.delete(id).await? {
            return Err(ApiError::BookNotFound);
        }
        Ok(())
    }
}
