use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelfmark_auth_types::identity::Identity;
use shelfmark_domain::book::{BookSortBy, BookStatus};
use shelfmark_domain::pagination::{PageRequest, Paginated};

use crate::domain::types::{Book, BookFilter};
use crate::error::ApiError;
use crate::handlers::review::ReviewResponse;
use crate::state::AppState;
use crate::usecase::book::{
    BookPayload, CreateBookUseCase, DeleteBookUseCase, GetBookUseCase, ListBooksUseCase,
    UpdateBookUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct BookResponse {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub thumbnail: String,
    pub avg_rating: f64,
    pub status: BookStatus,
    pub added_by: String,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title,
            author: book.author,
            genre: book.genre,
            publication_year: book.publication_year,
            thumbnail: book.thumbnail,
            avg_rating: book.avg_rating,
            status: book.status,
            added_by: book.added_by.to_string(),
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct BookDetailResponse {
    #[serde(flatten)]
    pub book: BookResponse,
    pub reviews: Vec<ReviewResponse>,
}

// ── Request types ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct BookRequest {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub publication_year: i32,
    pub thumbnail: String,
    pub status: Option<BookStatus>,
}

impl From<BookRequest> for BookPayload {
    fn from(body: BookRequest) -> Self {
        Self {
            title: body.title,
            author: body.author,
            genre: body.genre,
            publication_year: body.publication_year,
            thumbnail: body.thumbnail,
            status: body.status,
        }
    }
}

// ── GET /books ───────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BookListQuery {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub publication_year: Option<i32>,
    pub status: Option<BookStatus>,
    pub sort_by: Option<BookSortBy>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn get_books(
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Paginated<BookResponse>>, ApiError> {
    let query: BookListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| ApiError::MissingData)?
        .unwrap_or_default();

    let filter = BookFilter {
        search: query.search,
        genre: query.genre,
        publication_year: query.publication_year,
        status: query.status,
    };
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let usecase = ListBooksUseCase {
        books: state.book_repo(),
    };
    let books = usecase
        .execute(filter, query.sort_by.unwrap_or_default(), page)
        .await?;

    Ok(Json(Paginated {
        meta: books.meta,
        data: books.data.into_iter().map(BookResponse::from).collect(),
    }))
}

// ── POST /books ──────────────────────────────────────────────────────────────

pub async fn create_book(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<BookRequest>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let usecase = CreateBookUseCase {
        books: state.book_repo(),
    };
    let book = usecase.execute(identity.user_id, body.into()).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

// ── GET /books/{id} ──────────────────────────────────────────────────────────

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let usecase = GetBookUseCase {
        books: state.book_repo(),
        reviews: state.review_repo(),
    };
    let (book, reviews) = usecase.execute(id).await?;
    Ok(Json(BookDetailResponse {
        book: book.into(),
        reviews: reviews.into_iter().map(ReviewResponse::from).collect(),
    }))
}

// ── PUT /books/{id} ──────────────────────────────────────────────────────────

pub async fn update_book(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<BookRequest>,
) -> Result<Json<BookResponse>, ApiError> {
    let usecase = UpdateBookUseCase {
        books: state.book_repo(),
    };
    let book = usecase.execute(id, body.into()).await?;
    Ok(Json(book.into()))
}

// ── DELETE /books/{id} ───────────────────────────────────────────────────────

pub async fn delete_book(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteBookUseCase {
        books: state.book_repo(),
    };
    usecase.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
