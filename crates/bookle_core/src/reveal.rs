//! crates/bookle_core/src/reveal.rs
//!
//! Decides which secret-book attribute the player sees next.
//!
//! One attribute is revealed per accepted guess, on a fixed schedule, whether
//! or not the guess was close. A wildly wrong guess still earns a clue.

use crate::domain::{Attribute, RevealedAttribute};

/// Reveal order, first entry first.
pub const REVEAL_PRIORITY: [Attribute; 7] = [
    Attribute::PublicationYear,
    Attribute::Genre,
    Attribute::Pages,
    Attribute::AuthorsCountry,
    Attribute::OriginalLanguage,
    Attribute::HistoricalPeriod,
    Attribute::Author,
];

/// Flips the highest-priority hidden attribute to revealed and returns it.
/// Returns `None` once everything is visible.
pub fn reveal_next(attributes: &mut [RevealedAttribute]) -> Option<Attribute> {
    for name in REVEAL_PRIORITY {
        if let Some(slot) = attributes.iter_mut().find(|a| a.name == name && !a.revealed) {
            slot.revealed = true;
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AttributeValue;

    fn hidden(name: Attribute) -> RevealedAttribute {
        RevealedAttribute {
            name,
            value: AttributeValue::Text("x".to_string()),
            icon: name.icon().to_string(),
            revealed: false,
            kind: name.kind(),
        }
    }

    #[test]
    fn follows_priority_regardless_of_storage_order() {
        // Stored in reverse on purpose.
        let mut attributes: Vec<_> = Attribute::ALL.iter().rev().map(|a| hidden(*a)).collect();

        let order: Vec<_> = std::iter::from_fn(|| reveal_next(&mut attributes)).collect();

        assert_eq!(order, REVEAL_PRIORITY.to_vec());
        assert!(attributes.iter().all(|a| a.revealed));
    }

    #[test]
    fn skips_already_revealed_attributes() {
        let mut attributes: Vec<_> = Attribute::ALL.iter().map(|a| hidden(*a)).collect();
        attributes[0].revealed = true;
        attributes[1].revealed = true;

        assert_eq!(reveal_next(&mut attributes), Some(Attribute::Pages));
    }

    #[test]
    fn noop_when_everything_is_revealed() {
        let mut attributes: Vec<_> = Attribute::ALL.iter().map(|a| hidden(*a)).collect();
        attributes.iter_mut().for_each(|a| a.revealed = true);
        let before = attributes.clone();

        assert_eq!(reveal_next(&mut attributes), None);
        assert_eq!(attributes, before);
    }
}
