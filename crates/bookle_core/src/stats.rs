//! crates/bookle_core/src/stats.rs
//!
//! Folds finished games into a player's running statistics.

use crate::domain::{GameStatus, Session, Stats, MAX_ATTEMPTS};
use crate::error::GameError;

impl Stats {
    /// Zeroed statistics for a player who has never finished a game.
    pub fn new(player_id: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            games_played: 0,
            games_won: 0,
            current_streak: 0,
            max_streak: 0,
            guess_distribution: [0; MAX_ATTEMPTS as usize],
            last_played_date: None,
        }
    }

    /// Whole-number percentage of games won, 0 when nothing has been played.
    pub fn win_percentage(&self) -> u32 {
        if self.games_played == 0 {
            return 0;
        }
        ((f64::from(self.games_won) / f64::from(self.games_played)) * 100.0).round() as u32
    }
}

/// Returns `existing` (or fresh stats) updated with one finished `session`.
///
/// Calling this twice for the same session counts it twice; callers guard
/// with [`Session::stats_recorded`].
pub fn accumulate(
    existing: Option<Stats>,
    player_id: &str,
    session: &Session,
) -> Result<Stats, GameError> {
    let mut stats = existing.unwrap_or_else(|| Stats::new(player_id));

    match session.game_status {
        GameStatus::Active => {
            return Err(GameError::SessionNotFinished { date: session.date });
        }
        GameStatus::Won => {
            stats.games_won += 1;
            stats.current_streak += 1;
            stats.max_streak = stats.max_streak.max(stats.current_streak);
            let attempts = usize::from(session.attempts_used());
            if let Some(bucket) = attempts
                .checked_sub(1)
                .and_then(|i| stats.guess_distribution.get_mut(i))
            {
                *bucket += 1;
            }
        }
        GameStatus::Lost => {
            stats.current_streak = 0;
        }
    }

    stats.games_played += 1;
    stats.last_played_date = Some(session.date);
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Book;
    use chrono::NaiveDate;

    fn finished(status: GameStatus, remaining: u8) -> Session {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            publication_year: 1965,
            genre: "Science Fiction".to_string(),
            authors_country: "United States".to_string(),
            pages: 412,
            original_language: "English".to_string(),
            historical_period: "Post-War".to_string(),
            cover_image_ref: None,
        };
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let mut session = Session::new(date, &book);
        session.game_status = status;
        session.remaining_attempts = remaining;
        session
    }

    #[test]
    fn first_win_initializes_stats() {
        let stats = accumulate(None, "p1", &finished(GameStatus::Won, 5)).unwrap();

        assert_eq!(stats.player_id, "p1");
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.max_streak, 1);
        assert_eq!(stats.guess_distribution, [0, 0, 1, 0, 0, 0, 0, 0]);
        assert_eq!(stats.last_played_date, NaiveDate::from_ymd_opt(2024, 3, 1));
    }

    #[test]
    fn loss_resets_current_streak_but_keeps_max() {
        let mut stats = Stats::new("p1");
        stats.games_played = 4;
        stats.games_won = 4;
        stats.current_streak = 4;
        stats.max_streak = 4;

        let stats = accumulate(Some(stats), "p1", &finished(GameStatus::Lost, 0)).unwrap();

        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.games_won, 4);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.max_streak, 4);
        assert_eq!(stats.win_percentage(), 80);
    }

    #[test]
    fn win_in_last_attempt_lands_in_last_bucket() {
        let stats = accumulate(None, "p1", &finished(GameStatus::Won, 0)).unwrap();
        assert_eq!(stats.guess_distribution[7], 1);
    }

    #[test]
    fn active_session_is_rejected() {
        let err = accumulate(None, "p1", &finished(GameStatus::Active, 8)).unwrap_err();
        assert!(matches!(err, GameError::SessionNotFinished { .. }));
    }

    #[test]
    fn win_percentage_of_empty_stats_is_zero() {
        assert_eq!(Stats::new("p1").win_percentage(), 0);
    }
}
