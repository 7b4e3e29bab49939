//! crates/bookle_core/src/ports.rs
//!
//! Defines the service contracts (traits) the game core depends on.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of where books come from and where sessions are stored.

use crate::domain::{Book, Session, Stats};
use async_trait::async_trait;
use chrono::NaiveDate;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, files).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// Read access to the book catalog.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_books(&self) -> PortResult<Vec<Book>>;

    async fn get_book_by_id(&self, id: u32) -> PortResult<Book>;

    /// Looks a book up by exact title, ignoring case.
    async fn get_book_by_title(&self, title: &str) -> PortResult<Book>;
}

/// Chooses the secret book for a calendar day.
#[async_trait]
pub trait DailyBookService: Send + Sync {
    /// Must return the same book for the same date. `None` means there is
    /// nothing to choose from.
    async fn book_for_date(&self, date: NaiveDate) -> PortResult<Option<Book>>;
}

/// Persistence for sessions and player statistics.
#[async_trait]
pub trait StorageService: Send + Sync {
    // --- Session Management ---
    async fn get_session_by_date(&self, date: NaiveDate) -> PortResult<Option<Session>>;

    /// Inserts or replaces the session stored for `session.date`.
    async fn save_session(&self, session: &Session) -> PortResult<()>;

    // --- Stats Management ---
    async fn get_stats(&self, player_id: &str) -> PortResult<Option<Stats>>;

    async fn save_stats(&self, stats: &Stats) -> PortResult<()>;
}
