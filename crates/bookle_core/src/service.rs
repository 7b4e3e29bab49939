//! crates/bookle_core/src/service.rs
//!
//! `GameService` ties the state machine to the ports: it loads or creates the
//! day's session, applies guesses as one load-mutate-save unit, and records
//! stats exactly once per finished game.

use crate::domain::{Book, Guess, Session, Stats};
use crate::error::GameError;
use crate::game;
use crate::ports::{CatalogService, DailyBookService, StorageService};
use crate::stats::accumulate;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

/// The result of an accepted guess.
#[derive(Debug, Clone)]
pub struct GuessOutcome {
    pub guess: Guess,
    pub session: Session,
    /// The secret book, present only once the game is over.
    pub revealed_book: Option<Book>,
}

pub struct GameService {
    catalog: Arc<dyn CatalogService>,
    daily_books: Arc<dyn DailyBookService>,
    storage: Arc<dyn StorageService>,
    player_id: String,
    /// One lock per calendar day so concurrent guesses against the same
    /// session are applied one after another.
    session_locks: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
    stats_lock: Mutex<()>,
}

impl GameService {
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        daily_books: Arc<dyn DailyBookService>,
        storage: Arc<dyn StorageService>,
        player_id: impl Into<String>,
    ) -> Self {
        Self {
            catalog,
            daily_books,
            storage,
            player_id: player_id.into(),
            session_locks: Mutex::new(HashMap::new()),
            stats_lock: Mutex::new(()),
        }
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Returns the session for `date`, creating and storing it on first access.
    /// A finished session whose stats update was interrupted is recorded here.
    pub async fn session_for_date(&self, date: NaiveDate) -> Result<Session, GameError> {
        let lock = self.lock_for(date).await;
        let result = {
            let _guard = lock.lock().await;
            self.load_and_settle(date).await
        };
        self.release_lock(date, lock).await;
        result
    }

    /// Applies one guess to the session for `date`.
    ///
    /// Once the guess is stored the outcome is returned even if the stats
    /// update fails; the next read of the session retries it.
    pub async fn submit_guess(
        &self,
        date: NaiveDate,
        raw_title: &str,
    ) -> Result<GuessOutcome, GameError> {
        let lock = self.lock_for(date).await;
        let result = {
            let _guard = lock.lock().await;
            self.apply_guess(date, raw_title).await
        };
        self.release_lock(date, lock).await;
        result
    }

    /// Folds a finished session into the player's stats unless that already
    /// happened.
    ///
    /// Stats are stored before the session is flagged. If flagging fails, the
    /// stats' `last_played_date` keeps a retry from counting the game twice.
    pub async fn record_result(&self, session: &mut Session) -> Result<(), GameError> {
        let _guard = self.stats_lock.lock().await;

        if session.stats_recorded {
            return Ok(());
        }

        let existing = self.storage.get_stats(&self.player_id).await?;
        let already_counted =
            existing.as_ref().and_then(|s| s.last_played_date) == Some(session.date);

        if already_counted {
            debug!(date = %session.date, "Stats already include this game");
        } else {
            let stats = accumulate(existing, &self.player_id, session)?;
            self.storage.save_stats(&stats).await?;
            info!(
                player = %self.player_id,
                date = %session.date,
                played = stats.games_played,
                streak = stats.current_streak,
                "Stats updated"
            );
        }

        session.stats_recorded = true;
        if let Err(e) = self.storage.save_session(session).await {
            session.stats_recorded = false;
            return Err(e.into());
        }
        Ok(())
    }

    /// The player's stats, or zeroes if they have never finished a game.
    pub async fn stats(&self) -> Result<Stats, GameError> {
        Ok(self
            .storage
            .get_stats(&self.player_id)
            .await?
            .unwrap_or_else(|| Stats::new(self.player_id.clone())))
    }

    pub async fn list_books(&self) -> Result<Vec<Book>, GameError> {
        Ok(self.catalog.list_books().await?)
    }

    /// The secret book for a finished session; `None` while still in play.
    pub async fn revealed_book(&self, session: &Session) -> Result<Option<Book>, GameError> {
        if !session.is_terminal() {
            return Ok(None);
        }
        Ok(Some(self.catalog.get_book_by_id(session.daily_book_id).await?))
    }

    async fn load_and_settle(&self, date: NaiveDate) -> Result<Session, GameError> {
        let mut session = self.load_or_create(date).await?;
        if session.is_terminal() && !session.stats_recorded {
            self.record_result(&mut session).await?;
        }
        Ok(session)
    }

    async fn apply_guess(
        &self,
        date: NaiveDate,
        raw_title: &str,
    ) -> Result<GuessOutcome, GameError> {
        let mut session = self.load_or_create(date).await?;
        let target = self.catalog.get_book_by_id(session.daily_book_id).await?;

        let guess = game::submit_guess(&mut session, raw_title, &target, self.catalog.as_ref())
            .await
            .map_err(|e| {
                warn!(date = %date, title = raw_title, "Guess rejected: {}", e);
                e
            })?;
        self.storage.save_session(&session).await?;

        info!(
            date = %date,
            title = %guess.title,
            correct = guess.is_correct,
            remaining = session.remaining_attempts,
            status = %session.game_status,
            "Guess recorded"
        );

        if !session.is_terminal() {
            return Ok(GuessOutcome {
                guess,
                session,
                revealed_book: None,
            });
        }

        if let Err(e) = self.record_result(&mut session).await {
            error!(date = %date, "Failed to record stats for finished game: {}", e);
        }
        Ok(GuessOutcome {
            guess,
            session,
            revealed_book: Some(target),
        })
    }

    async fn lock_for(&self, date: NaiveDate) -> Arc<Mutex<()>> {
        let mut locks = self.session_locks.lock().await;
        locks.entry(date).or_default().clone()
    }

    /// Drops the map entry for `date` once no other caller holds its lock.
    async fn release_lock(&self, date: NaiveDate, lock: Arc<Mutex<()>>) {
        let mut locks = self.session_locks.lock().await;
        // One reference lives in the map, the other is `lock`.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&date);
        }
    }

    #[cfg(test)]
    pub(crate) async fn tracked_locks(&self) -> usize {
        self.session_locks.lock().await.len()
    }

    async fn load_or_create(&self, date: NaiveDate) -> Result<Session, GameError> {
        if let Some(session) = self.storage.get_session_by_date(date).await? {
            return Ok(session);
        }

        let book = self
            .daily_books
            .book_for_date(date)
            .await?
            .ok_or(GameError::NoBooksAvailable)?;
        let session = Session::new(date, &book);
        self.storage.save_session(&session).await?;

        info!(date = %date, session = %session.id, "Started new daily session");
        Ok(session)
    }
}
