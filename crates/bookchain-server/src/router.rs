use axum::routing::{get, post};
use axum::Router;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Bookchain endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handler::health_handler))
        .route("/blockchain", get(handler::blockchain_handler))
        .route("/blockchain/:position", get(handler::block_handler))
        .route("/new_checkout", post(handler::new_checkout_handler))
        .route("/new_book", post(handler::new_book_handler))
        .route("/all_books", get(handler::all_books_handler))
        .route("/validate", get(handler::validate_handler))
        .with_state(state)
}
