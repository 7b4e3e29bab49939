//! crates/bookle_core/src/evaluate.rs
//!
//! Turns a typed title into a scored [`Guess`].

use crate::compare::compare_attribute;
use crate::domain::{Attribute, AttributeFeedback, Book, Guess};
use crate::error::GameError;
use crate::ports::{CatalogService, PortError};

/// Scores `guessed` against `target`. The feedback values are the guessed
/// book's, so the player sees what they guessed.
pub fn score_guess(guessed: &Book, target: &Book) -> Guess {
    let feedback = Attribute::ALL
        .into_iter()
        .map(|attribute| {
            let entry = AttributeFeedback {
                value: guessed.attribute_value(attribute),
                status: compare_attribute(attribute, guessed, target),
            };
            (attribute, entry)
        })
        .collect();

    Guess {
        title: guessed.title.clone(),
        book_id: guessed.id,
        // Identity, not title, decides a win.
        is_correct: guessed.id == target.id,
        feedback,
    }
}

/// Resolves `raw_title` through the catalog and scores it against `target`.
pub async fn evaluate_guess(
    raw_title: &str,
    target: &Book,
    catalog: &dyn CatalogService,
) -> Result<Guess, GameError> {
    let title = raw_title.trim();
    if title.is_empty() {
        return Err(GameError::EmptyTitle);
    }

    let guessed = catalog.get_book_by_title(title).await.map_err(|e| match e {
        PortError::NotFound(_) => GameError::BookNotFound(title.to_string()),
        other => GameError::Port(other),
    })?;

    Ok(score_guess(&guessed, target))
}
