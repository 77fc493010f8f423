use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{BookRepository, ReviewRepository};
use crate::domain::types::{Review, validate_rating};
use crate::error::ApiError;

#[derive(Debug)]
pub struct CreateReviewInput {
    pub description: String,
    pub rating: i16,
}

/// Appends a review to an existing book. The book's stored `avg_rating` is
/// deliberately left alone; it is an imported aggregate, not a live one.
pub struct CreateReviewUseCase<B: BookRepository, R: ReviewRepository> {
    pub books: B,
    pub reviews: R,
}

impl<B: BookRepository, R: ReviewRepository> CreateReviewUseCase<B, R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        input: CreateReviewInput,
    ) -> Result<Review, ApiError> {
        if !self.books.exists(book_id).await? {
            return Err(ApiError::BookNotFound);
        }
        if input.description.trim().is_empty() || !validate_rating(input.rating) {
            return Err(ApiError::MissingData);
        }

        let review = Review {
            id: Uuid::now_v7(),
            book_id,
            user_id,
            description: input.description,
            rating: input.rating,
            created_at: Utc::now(),
        };
        self.reviews.create(&review).await?;
        Ok(review)
    }
}
