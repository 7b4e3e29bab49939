//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::{DateSeededSelector, StaticCatalog};
use bookle_core::ports::{CatalogService, StorageService};
use bookle_core::service::GameService;
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<GameService>,
}

impl AppState {
    /// Wires the game around the in-memory catalog. Book lookups and the daily
    /// pick never touch `storage`, so a storage outage cannot block a guess.
    pub fn new(
        catalog: Arc<StaticCatalog>,
        storage: Arc<dyn StorageService>,
        player_id: impl Into<String>,
    ) -> Self {
        let catalog: Arc<dyn CatalogService> = catalog;
        let daily_books = Arc::new(DateSeededSelector::new(catalog.clone()));
        Self {
            game: Arc::new(GameService::new(catalog, daily_books, storage, player_id)),
        }
    }
}
