//! services/api/src/web/protocol.rs
//!
//! Defines the JSON payloads exchanged between the browser client and the API server.
//!
//! These views are the disclosure boundary: while a game is in play they never
//! carry the secret book's id or the value of an attribute that has not been
//! revealed yet.

use bookle_core::domain::{
    AttributeFeedback, AttributeStatus, AttributeValue, Book, Guess, RevealedAttribute, Session,
    Stats,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Requests
//=========================================================================================

#[derive(Deserialize, Serialize, ToSchema)]
pub struct GuessRequest {
    pub title: String,
}

//=========================================================================================
// Responses
//=========================================================================================

/// Either a number (year, pages) or text.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ValueView {
    Number(i64),
    Text(String),
}

impl From<&AttributeValue> for ValueView {
    fn from(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::Number(n) => ValueView::Number(*n),
            AttributeValue::Text(s) => ValueView::Text(s.clone()),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackView {
    pub attribute: String,
    pub value: ValueView,
    /// `correct`, `partial` or `incorrect`.
    pub status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GuessView {
    pub title: String,
    pub is_correct: bool,
    pub feedback: Vec<FeedbackView>,
}

impl From<&Guess> for GuessView {
    fn from(guess: &Guess) -> Self {
        let feedback = guess
            .feedback
            .iter()
            .map(|(attribute, AttributeFeedback { value, status })| FeedbackView {
                attribute: attribute.display_name().to_string(),
                value: value.into(),
                status: status_str(*status).to_string(),
            })
            .collect();

        Self {
            title: guess.title.clone(),
            is_correct: guess.is_correct,
            feedback,
        }
    }
}

fn status_str(status: AttributeStatus) -> &'static str {
    match status {
        AttributeStatus::Correct => "correct",
        AttributeStatus::Partial => "partial",
        AttributeStatus::Incorrect => "incorrect",
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RevealedAttributeView {
    pub name: String,
    /// Absent until the attribute is revealed.
    pub value: Option<ValueView>,
    pub icon: String,
    pub revealed: bool,
    /// `date`, `text` or `number`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<&RevealedAttribute> for RevealedAttributeView {
    fn from(attribute: &RevealedAttribute) -> Self {
        let kind = match attribute.kind {
            bookle_core::AttributeKind::Date => "date",
            bookle_core::AttributeKind::Text => "text",
            bookle_core::AttributeKind::Number => "number",
        };

        Self {
            name: attribute.name.display_name().to_string(),
            value: attribute.revealed.then(|| (&attribute.value).into()),
            icon: attribute.icon.clone(),
            revealed: attribute.revealed,
            kind: kind.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub date: NaiveDate,
    /// Only present once the game is over.
    pub daily_book_id: Option<u32>,
    pub remaining_attempts: u8,
    /// Chronological; clients typically display the newest first.
    pub guesses: Vec<GuessView>,
    pub revealed_attributes: Vec<RevealedAttributeView>,
    /// `active`, `won` or `lost`.
    pub game_status: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            date: session.date,
            daily_book_id: session.is_terminal().then_some(session.daily_book_id),
            remaining_attempts: session.remaining_attempts,
            guesses: session.guesses.iter().map(GuessView::from).collect(),
            revealed_attributes: session
                .revealed_attributes
                .iter()
                .map(RevealedAttributeView::from)
                .collect(),
            game_status: session.game_status.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookView {
    pub id: u32,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
    pub genre: String,
    pub authors_country: String,
    pub pages: u32,
    pub original_language: String,
    pub historical_period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image_ref: Option<String>,
}

impl From<Book> for BookView {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            publication_year: book.publication_year,
            genre: book.genre,
            authors_country: book.authors_country,
            pages: book.pages,
            original_language: book.original_language,
            historical_period: book.historical_period,
            cover_image_ref: book.cover_image_ref,
        }
    }
}

/// A catalog entry for title autocomplete.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct BookSummary {
    pub id: u32,
    pub title: String,
    pub author: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GameStateResponse {
    pub session: SessionView,
    pub revealed_book: Option<BookView>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    pub guess: GuessView,
    pub session: SessionView,
    pub revealed_book: Option<BookView>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub player_id: String,
    pub games_played: u32,
    pub games_won: u32,
    pub win_percentage: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    /// Index `i` counts wins in `i + 1` attempts.
    pub guess_distribution: Vec<u32>,
    pub last_played_date: Option<NaiveDate>,
}

impl From<Stats> for StatsResponse {
    fn from(stats: Stats) -> Self {
        Self {
            win_percentage: stats.win_percentage(),
            player_id: stats.player_id,
            games_played: stats.games_played,
            games_won: stats.games_won,
            current_streak: stats.current_streak,
            max_streak: stats.max_streak,
            guess_distribution: stats.guess_distribution.to_vec(),
            last_played_date: stats.last_played_date,
        }
    }
}
