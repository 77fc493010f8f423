use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use shelfmark_core::health::{healthz, readyz};
use shelfmark_core::middleware::request_id_layer;

use crate::handlers::{
    book::{create_book, delete_book, get_book, get_books, update_book},
    preference::{
        get_book_preferences, get_my_preference, get_my_preferences, remove_preference,
        upsert_preference,
    },
    review::create_review,
    user::{get_me, login, refresh_token, register},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register))
        .route("/users/login", post(login))
        .route("/users/refresh-token", post(refresh_token))
        .route("/users/@me", get(get_me))
        // Preferences
        .route("/users/@me/preferences", get(get_my_preferences))
        .route("/users/@me/preferences", post(upsert_preference))
        .route("/users/@me/preferences", delete(remove_preference))
        .route("/users/@me/preferences/{book_id}", get(get_my_preference))
        // Books
        .route("/books", get(get_books))
        .route("/books", post(create_book))
        .route("/books/{id}", get(get_book))
        .route("/books/{id}", put(update_book))
        .route("/books/{id}", delete(delete_book))
        .route("/books/{id}/reviews", post(create_review))
        .route("/books/{id}/preferences", get(get_book_preferences))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
