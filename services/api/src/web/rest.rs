//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    BookSummary, BookView, FeedbackView, GameStateResponse, GuessRequest, GuessResponse,
    GuessView, RevealedAttributeView, SessionView, StatsResponse, ValueView,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bookle_core::GameError;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::error;
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        today_handler,
        game_handler,
        guess_handler,
        list_books_handler,
        stats_handler,
    ),
    components(
        schemas(
            GuessRequest,
            GuessResponse,
            GameStateResponse,
            SessionView,
            GuessView,
            FeedbackView,
            RevealedAttributeView,
            ValueView,
            BookView,
            BookSummary,
            StatsResponse,
        )
    ),
    tags(
        (name = "Bookle API", description = "Daily book guessing game.")
    )
)]
pub struct ApiDoc;

type HandlerError = (StatusCode, String);

/// Maps core errors onto HTTP statuses. Player mistakes are 4xx and
/// reported verbatim; everything else is logged and hidden behind a 500.
fn game_error_response(e: GameError) -> HandlerError {
    match e {
        GameError::EmptyTitle => (StatusCode::BAD_REQUEST, e.to_string()),
        GameError::BookNotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
        GameError::GameAlreadyOver { .. } => (StatusCode::CONFLICT, e.to_string()),
        GameError::NoBooksAvailable
        | GameError::SessionNotFinished { .. }
        | GameError::Port(_) => {
            error!("Game operation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

/// Parses a `YYYY-MM-DD` path segment. Dates after today (UTC) have no game yet.
fn parse_date(raw: &str) -> Result<NaiveDate, HandlerError> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            format!("'{}' is not a valid YYYY-MM-DD date", raw),
        )
    })?;
    if date > Utc::now().date_naive() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("No game is available yet for {}", date),
        ));
    }
    Ok(date)
}

async fn game_state(
    app_state: &AppState,
    date: NaiveDate,
) -> Result<GameStateResponse, HandlerError> {
    let session = app_state
        .game
        .session_for_date(date)
        .await
        .map_err(game_error_response)?;
    let revealed_book = app_state
        .game
        .revealed_book(&session)
        .await
        .map_err(game_error_response)?;

    Ok(GameStateResponse {
        session: SessionView::from(&session),
        revealed_book: revealed_book.map(BookView::from),
    })
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Get (or start) today's game.
#[utoipa::path(
    get,
    path = "/api/game/today",
    responses(
        (status = 200, description = "Today's game state", body = GameStateResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn today_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let today = Utc::now().date_naive();
    Ok(Json(game_state(&app_state, today).await?))
}

/// Get (or start) the game for a given date.
#[utoipa::path(
    get,
    path = "/api/game/{date}",
    params(("date" = String, Path, description = "Game date as YYYY-MM-DD.")),
    responses(
        (status = 200, description = "Game state", body = GameStateResponse),
        (status = 400, description = "Invalid or future date"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn game_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, HandlerError> {
    let date = parse_date(&date)?;
    Ok(Json(game_state(&app_state, date).await?))
}

/// Submit a title guess for the game on a given date.
#[utoipa::path(
    post,
    path = "/api/game/{date}/guess",
    params(("date" = String, Path, description = "Game date as YYYY-MM-DD.")),
    request_body = GuessRequest,
    responses(
        (status = 200, description = "Guess scored", body = GuessResponse),
        (status = 400, description = "Invalid or future date, or empty title"),
        (status = 404, description = "Title is not in the catalog"),
        (status = 409, description = "The game is already over"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn guess_handler(
    State(app_state): State<Arc<AppState>>,
    Path(date): Path<String>,
    Json(req): Json<GuessRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let date = parse_date(&date)?;
    let outcome = app_state
        .game
        .submit_guess(date, &req.title)
        .await
        .map_err(game_error_response)?;

    Ok(Json(GuessResponse {
        guess: GuessView::from(&outcome.guess),
        session: SessionView::from(&outcome.session),
        revealed_book: outcome.revealed_book.map(BookView::from),
    }))
}

/// List catalog titles for autocomplete.
#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books in the catalog", body = [BookSummary]),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn list_books_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let books = app_state
        .game
        .list_books()
        .await
        .map_err(game_error_response)?;

    let summaries: Vec<BookSummary> = books
        .into_iter()
        .map(|b| BookSummary {
            id: b.id,
            title: b.title,
            author: b.author,
        })
        .collect();
    Ok(Json(summaries))
}

/// Get the player's statistics.
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Player statistics", body = StatsResponse),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn stats_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HandlerError> {
    let stats = app_state
        .game
        .stats()
        .await
        .map_err(game_error_response)?;
    Ok(Json(StatsResponse::from(stats)))
}

pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}
