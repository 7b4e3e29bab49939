//! crates/bookle_core/src/compare.rs
//!
//! Per-attribute scoring of a guessed book against the secret book.

use crate::domain::{Attribute, AttributeStatus, Book};

/// Years within this distance of the target score as partial.
pub const YEAR_TOLERANCE: u32 = 10;

/// Page counts within this fraction of the target score as partial.
pub const PAGES_TOLERANCE: f64 = 0.15;

/// Scores one attribute of `guessed` against `target`.
pub fn compare_attribute(attribute: Attribute, guessed: &Book, target: &Book) -> AttributeStatus {
    match attribute {
        Attribute::PublicationYear => {
            publication_year(guessed.publication_year, target.publication_year)
        }
        Attribute::Pages => pages(guessed.pages, target.pages),
        Attribute::Genre => exact(&guessed.genre, &target.genre),
        Attribute::AuthorsCountry => exact(&guessed.authors_country, &target.authors_country),
        Attribute::OriginalLanguage => {
            exact(&guessed.original_language, &target.original_language)
        }
        Attribute::HistoricalPeriod => {
            exact(&guessed.historical_period, &target.historical_period)
        }
        Attribute::Author => exact(&guessed.author, &target.author),
    }
}

/// Case-sensitive equality. Text attributes have no partial tier.
pub fn exact(guessed: &str, target: &str) -> AttributeStatus {
    if guessed == target {
        AttributeStatus::Correct
    } else {
        AttributeStatus::Incorrect
    }
}

pub fn publication_year(guessed: i32, target: i32) -> AttributeStatus {
    match guessed.abs_diff(target) {
        0 => AttributeStatus::Correct,
        diff if diff <= YEAR_TOLERANCE => AttributeStatus::Partial,
        _ => AttributeStatus::Incorrect,
    }
}

/// A zero-page target only ever matches exactly; catalogs reject such books
/// at load time, so this never divides by zero.
pub fn pages(guessed: u32, target: u32) -> AttributeStatus {
    let diff = guessed.abs_diff(target);
    if diff == 0 {
        return AttributeStatus::Correct;
    }
    if target == 0 {
        return AttributeStatus::Incorrect;
    }

    let pct = f64::from(diff) / f64::from(target);
    if pct <= PAGES_TOLERANCE {
        AttributeStatus::Partial
    } else {
        AttributeStatus::Incorrect
    }
}
