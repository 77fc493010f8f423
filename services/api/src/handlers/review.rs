use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shelfmark_auth_types::identity::Identity;

use crate::domain::types::Review;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::review::{CreateReviewInput, CreateReviewUseCase};

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub book_id: String,
    pub user_id: String,
    pub description: String,
    pub rating: i16,
    #[serde(serialize_with = "shelfmark_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id.to_string(),
            book_id: review.book_id.to_string(),
            user_id: review.user_id.to_string(),
            description: review.description,
            rating: review.rating,
            created_at: review.created_at,
        }
    }
}

// ── POST /books/{id}/reviews ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub description: String,
    pub rating: i16,
}

pub async fn create_review(
    identity: Identity,
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    let usecase = CreateReviewUseCase {
        books: state.book_repo(),
        reviews: state.review_repo(),
    };
    let review = usecase
        .execute(
            identity.user_id,
            book_id,
            CreateReviewInput {
                description: body.description,
                rating: body.rating,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}
