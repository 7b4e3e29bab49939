//! crates/bookle_core/src/error.rs
//!
//! Defines the error type surfaced by game operations.

use crate::ports::PortError;
use chrono::NaiveDate;

/// Errors returned by the game core.
///
/// The first three are player mistakes and never change a session. The rest
/// point at configuration or infrastructure problems.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("A book title is required")]
    EmptyTitle,

    #[error("No book titled '{0}' is in the catalog")]
    BookNotFound(String),

    #[error("The game for {date} is already over")]
    GameAlreadyOver { date: NaiveDate },

    /// The catalog has nothing to pick a daily book from.
    #[error("No books are available")]
    NoBooksAvailable,

    #[error("The game for {date} has not finished yet")]
    SessionNotFinished { date: NaiveDate },

    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),
}
