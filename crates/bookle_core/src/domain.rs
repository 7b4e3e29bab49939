//! crates/bookle_core/src/domain.rs
//!
//! Defines the core data structures for the game.
//! These structs carry serde derives so adapters can store them as structured
//! documents, but they know nothing about any particular database.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Number of guesses a player gets per daily game.
pub const MAX_ATTEMPTS: u8 = 8;

//=========================================================================================
// Catalog
//=========================================================================================

/// A book in the catalog. Created when the catalog is loaded and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: u32,
    pub title: String,
    pub author: String,
    /// Negative values are years BCE.
    pub publication_year: i32,
    pub genre: String,
    pub authors_country: String,
    pub pages: u32,
    pub original_language: String,
    pub historical_period: String,
    /// Display-only artwork reference; not part of the game contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_ref: Option<String>,
}

impl Book {
    /// Returns this book's value for the given attribute.
    pub fn attribute_value(&self, attribute: Attribute) -> AttributeValue {
        match attribute {
            Attribute::PublicationYear => AttributeValue::Number(i64::from(self.publication_year)),
            Attribute::Genre => AttributeValue::Text(self.genre.clone()),
            Attribute::Pages => AttributeValue::Number(i64::from(self.pages)),
            Attribute::AuthorsCountry => AttributeValue::Text(self.authors_country.clone()),
            Attribute::OriginalLanguage => AttributeValue::Text(self.original_language.clone()),
            Attribute::HistoricalPeriod => AttributeValue::Text(self.historical_period.clone()),
            Attribute::Author => AttributeValue::Text(self.author.clone()),
        }
    }
}

//=========================================================================================
// Attributes
//=========================================================================================

/// The seven book attributes a guess is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "Publication Year")]
    PublicationYear,
    #[serde(rename = "Genre")]
    Genre,
    #[serde(rename = "Pages")]
    Pages,
    #[serde(rename = "Author's Country")]
    AuthorsCountry,
    #[serde(rename = "Original Language")]
    OriginalLanguage,
    #[serde(rename = "Historical Period")]
    HistoricalPeriod,
    #[serde(rename = "Author")]
    Author,
}

impl Attribute {
    pub const ALL: [Attribute; 7] = [
        Attribute::PublicationYear,
        Attribute::Genre,
        Attribute::Pages,
        Attribute::AuthorsCountry,
        Attribute::OriginalLanguage,
        Attribute::HistoricalPeriod,
        Attribute::Author,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Attribute::PublicationYear => "Publication Year",
            Attribute::Genre => "Genre",
            Attribute::Pages => "Pages",
            Attribute::AuthorsCountry => "Author's Country",
            Attribute::OriginalLanguage => "Original Language",
            Attribute::HistoricalPeriod => "Historical Period",
            Attribute::Author => "Author",
        }
    }

    /// The icon the client renders next to this attribute.
    pub fn icon(self) -> &'static str {
        match self {
            Attribute::PublicationYear => "calendar",
            Attribute::Genre => "book-open",
            Attribute::Pages => "file-text",
            Attribute::AuthorsCountry => "globe",
            Attribute::OriginalLanguage => "languages",
            Attribute::HistoricalPeriod => "landmark",
            Attribute::Author => "user",
        }
    }

    pub fn kind(self) -> AttributeKind {
        match self {
            Attribute::PublicationYear => AttributeKind::Date,
            Attribute::Pages => AttributeKind::Number,
            _ => AttributeKind::Text,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the client should format an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Date,
    Text,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => f.write_str(s),
        }
    }
}

/// How close a guessed attribute value is to the secret book's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeStatus {
    Correct,
    Partial,
    Incorrect,
}

//=========================================================================================
// Guesses and Sessions
//=========================================================================================

/// The guessed book's value for one attribute, with its match status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFeedback {
    pub value: AttributeValue,
    pub status: AttributeStatus,
}

/// One scored attempt. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guess {
    pub title: String,
    pub book_id: u32,
    pub is_correct: bool,
    pub feedback: BTreeMap<Attribute, AttributeFeedback>,
}

/// A secret-book attribute that becomes visible to the player over time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedAttribute {
    pub name: Attribute,
    pub value: AttributeValue,
    pub icon: String,
    pub revealed: bool,
    #[serde(rename = "type")]
    pub kind: AttributeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Active,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            GameStatus::Active => "active",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The game for one calendar day.
///
/// `guesses.len() + remaining_attempts` always equals [`MAX_ATTEMPTS`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub date: NaiveDate,
    pub daily_book_id: u32,
    pub remaining_attempts: u8,
    pub guesses: Vec<Guess>,
    pub revealed_attributes: Vec<RevealedAttribute>,
    pub game_status: GameStatus,
    /// Set once the finished game has been folded into the player's stats.
    pub stats_recorded: bool,
}

/// Derives the session id for a calendar day, e.g. `game-2024-03-01`.
pub fn session_id_for(date: NaiveDate) -> String {
    format!("game-{}", date.format("%Y-%m-%d"))
}

//=========================================================================================
// Statistics
//=========================================================================================

/// Aggregate results for a player across all daily games.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub player_id: String,
    pub games_played: u32,
    pub games_won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Index `i` counts wins that took exactly `i + 1` attempts.
    pub guess_distribution: [u32; MAX_ATTEMPTS as usize],
    pub last_played_date: Option<NaiveDate>,
}
