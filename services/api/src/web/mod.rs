pub mod protocol;
pub mod rest;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub use rest::{
    game_handler, guess_handler, health_handler, list_books_handler, stats_handler,
    today_handler,
};
use state::AppState;

/// Builds the game API router. CORS and Swagger UI are layered on by the binary.
pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/game/today", get(today_handler))
        .route("/api/game/{date}", get(game_handler))
        .route("/api/game/{date}/guess", post(guess_handler))
        .route("/api/books", get(list_books_handler))
        .route("/api/stats", get(stats_handler))
        .with_state(app_state)
}
