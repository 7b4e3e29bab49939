//! crates/bookle_core/src/game.rs
//!
//! The daily session state machine.
//!
//! ```text
//! active --correct guess--------------------> won
//! active --wrong guess, 0 attempts left-----> lost
//! active --wrong guess, attempts remaining--> active
//! won/lost --any guess----------------------> rejected
//! ```

use crate::domain::{
    session_id_for, Attribute, Book, GameStatus, Guess, RevealedAttribute, Session, MAX_ATTEMPTS,
};
use crate::error::GameError;
use crate::evaluate::evaluate_guess;
use crate::ports::CatalogService;
use crate::reveal::{reveal_next, REVEAL_PRIORITY};
use chrono::NaiveDate;
use tracing::debug;

impl Session {
    /// Starts a fresh game for `date` with `target` as the secret book.
    pub fn new(date: NaiveDate, target: &Book) -> Self {
        let revealed_attributes = REVEAL_PRIORITY
            .into_iter()
            .map(|name| hidden_attribute(name, target))
            .collect();

        Self {
            id: session_id_for(date),
            date,
            daily_book_id: target.id,
            remaining_attempts: MAX_ATTEMPTS,
            guesses: Vec::new(),
            revealed_attributes,
            game_status: GameStatus::Active,
            stats_recorded: false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.game_status != GameStatus::Active
    }

    pub fn attempts_used(&self) -> u8 {
        MAX_ATTEMPTS - self.remaining_attempts
    }

    /// Names of the attributes the player can currently see.
    pub fn revealed_names(&self) -> Vec<Attribute> {
        self.revealed_attributes
            .iter()
            .filter(|a| a.revealed)
            .map(|a| a.name)
            .collect()
    }
}

fn hidden_attribute(name: Attribute, target: &Book) -> RevealedAttribute {
    RevealedAttribute {
        name,
        value: target.attribute_value(name),
        icon: name.icon().to_string(),
        revealed: false,
        kind: name.kind(),
    }
}

/// Scores `raw_title` and applies it to `session`.
///
/// Any error leaves the session exactly as it was; an unknown title does not
/// cost an attempt.
pub async fn submit_guess(
    session: &mut Session,
    raw_title: &str,
    target: &Book,
    catalog: &dyn CatalogService,
) -> Result<Guess, GameError> {
    if session.is_terminal() {
        return Err(GameError::GameAlreadyOver { date: session.date });
    }

    let guess = evaluate_guess(raw_title, target, catalog).await?;
    record_guess(session, guess.clone())?;
    Ok(guess)
}

/// Applies an already-scored guess. A finished session is left untouched.
pub(crate) fn record_guess(session: &mut Session, guess: Guess) -> Result<(), GameError> {
    if session.is_terminal() {
        return Err(GameError::GameAlreadyOver { date: session.date });
    }

    let is_correct = guess.is_correct;
    session.remaining_attempts = session.remaining_attempts.saturating_sub(1);
    session.guesses.push(guess);

    if let Some(name) = reveal_next(&mut session.revealed_attributes) {
        debug!(session = %session.id, attribute = %name, "Revealed attribute");
    }

    session.game_status = if is_correct {
        GameStatus::Won
    } else if session.remaining_attempts == 0 {
        GameStatus::Lost
    } else {
        GameStatus::Active
    };
    Ok(())
}
