pub mod compare;
pub mod domain;
pub mod error;
pub mod evaluate;
pub mod game;
pub mod ports;
pub mod reveal;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use domain::{
    Attribute, AttributeFeedback, AttributeKind, AttributeStatus, AttributeValue, Book,
    GameStatus, Guess, RevealedAttribute, Session, Stats, MAX_ATTEMPTS,
};
pub use error::GameError;
pub use ports::{CatalogService, DailyBookService, PortError, PortResult, StorageService};
pub use service::{GameService, GuessOutcome};
