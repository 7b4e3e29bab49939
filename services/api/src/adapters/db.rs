//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which implements the `StorageService`
//! port from the `core` crate. It handles all interactions with the PostgreSQL
//! database using `sqlx`. The catalog itself is always served from memory; the
//! `books` table only backs the sessions' foreign key.

use async_trait::async_trait;
use bookle_core::domain::{Book, GameStatus, Guess, RevealedAttribute, Session, Stats};
use bookle_core::ports::{PortError, PortResult, StorageService};
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use tracing::info;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the storage port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts any of `books` the `books` table does not have yet. Rows already
    /// present are left alone.
    pub async fn seed_books(&self, books: &[Book]) -> Result<(), sqlx::Error> {
        let mut inserted = 0;
        let mut tx = self.pool.begin().await?;
        for book in books {
            inserted += sqlx::query(
                "INSERT INTO books (id, title, author, publication_year, genre, authors_country, \
                 pages, original_language, historical_period, cover_image_ref) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(book.id as i32)
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.publication_year)
            .bind(&book.genre)
            .bind(&book.authors_country)
            .bind(book.pages as i32)
            .bind(&book.original_language)
            .bind(&book.historical_period)
            .bind(&book.cover_image_ref)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        }
        tx.commit().await?;

        info!("Seeded {} new books into the database", inserted);
        Ok(())
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

fn corrupt(what: &str, e: impl std::fmt::Display) -> PortError {
    PortError::Unexpected(format!("Stored {} is corrupt: {}", what, e))
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

/// Guesses and revealed attributes are stored as JSON text.
#[derive(FromRow)]
struct SessionRecord {
    id: String,
    date: NaiveDate,
    daily_book_id: i32,
    remaining_attempts: i16,
    guesses: String,
    revealed_attributes: String,
    game_status: String,
    stats_recorded: bool,
}
impl SessionRecord {
    fn to_domain(self) -> PortResult<Session> {
        let guesses: Vec<Guess> =
            serde_json::from_str(&self.guesses).map_err(|e| corrupt("guesses", e))?;
        let revealed_attributes: Vec<RevealedAttribute> =
            serde_json::from_str(&self.revealed_attributes)
                .map_err(|e| corrupt("revealed attributes", e))?;
        let game_status = match self.game_status.as_str() {
            "active" => GameStatus::Active,
            "won" => GameStatus::Won,
            "lost" => GameStatus::Lost,
            other => return Err(corrupt("game status", other)),
        };

        Ok(Session {
            id: self.id,
            date: self.date,
            daily_book_id: self.daily_book_id as u32,
            remaining_attempts: u8::try_from(self.remaining_attempts)
                .map_err(|e| corrupt("remaining attempts", e))?,
            guesses,
            revealed_attributes,
            game_status,
            stats_recorded: self.stats_recorded,
        })
    }
}

#[derive(FromRow)]
struct StatsRecord {
    player_id: String,
    games_played: i32,
    games_won: i32,
    current_streak: i32,
    max_streak: i32,
    guess_distribution: Vec<i32>,
    last_played_date: Option<NaiveDate>,
}
impl StatsRecord {
    fn to_domain(self) -> PortResult<Stats> {
        let mut stats = Stats::new(self.player_id);
        if self.guess_distribution.len() != stats.guess_distribution.len() {
            return Err(corrupt(
                "guess distribution",
                format!("expected 8 buckets, found {}", self.guess_distribution.len()),
            ));
        }
        for (slot, count) in stats
            .guess_distribution
            .iter_mut()
            .zip(self.guess_distribution)
        {
            *slot = count as u32;
        }
        stats.games_played = self.games_played as u32;
        stats.games_won = self.games_won as u32;
        stats.current_streak = self.current_streak as u32;
        stats.max_streak = self.max_streak as u32;
        stats.last_played_date = self.last_played_date;
        Ok(stats)
    }
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for DbAdapter {
    async fn get_session_by_date(&self, date: NaiveDate) -> PortResult<Option<Session>> {
        let record = sqlx::query_as::<_, SessionRecord>(
            "SELECT id, date, daily_book_id, remaining_attempts, guesses, revealed_attributes, \
             game_status, stats_recorded FROM game_sessions WHERE date = $1",
        )
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record.map(SessionRecord::to_domain).transpose()
    }

    async fn save_session(&self, session: &Session) -> PortResult<()> {
        let guesses = serde_json::to_string(&session.guesses)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        let revealed = serde_json::to_string(&session.revealed_attributes)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        sqlx::query(
            "INSERT INTO game_sessions (id, date, daily_book_id, remaining_attempts, guesses, \
             revealed_attributes, game_status, stats_recorded) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (date) DO UPDATE SET \
             remaining_attempts = EXCLUDED.remaining_attempts, \
             guesses = EXCLUDED.guesses, \
             revealed_attributes = EXCLUDED.revealed_attributes, \
             game_status = EXCLUDED.game_status, \
             stats_recorded = EXCLUDED.stats_recorded, \
             updated_at = NOW()",
        )
        .bind(&session.id)
        .bind(session.date)
        .bind(session.daily_book_id as i32)
        .bind(i16::from(session.remaining_attempts))
        .bind(guesses)
        .bind(revealed)
        .bind(session.game_status.as_str())
        .bind(session.stats_recorded)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }

    async fn get_stats(&self, player_id: &str) -> PortResult<Option<Stats>> {
        let record = sqlx::query_as::<_, StatsRecord>(
            "SELECT player_id, games_played, games_won, current_streak, max_streak, \
             guess_distribution, last_played_date FROM player_stats WHERE player_id = $1",
        )
        .bind(player_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record.map(StatsRecord::to_domain).transpose()
    }

    async fn save_stats(&self, stats: &Stats) -> PortResult<()> {
        let distribution: Vec<i32> = stats.guess_distribution.iter().map(|&c| c as i32).collect();

        sqlx::query(
            "INSERT INTO player_stats (player_id, games_played, games_won, current_streak, \
             max_streak, guess_distribution, last_played_date) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (player_id) DO UPDATE SET \
             games_played = EXCLUDED.games_played, \
             games_won = EXCLUDED.games_won, \
             current_streak = EXCLUDED.current_streak, \
             max_streak = EXCLUDED.max_streak, \
             guess_distribution = EXCLUDED.guess_distribution, \
             last_played_date = EXCLUDED.last_played_date",
        )
        .bind(&stats.player_id)
        .bind(stats.games_played as i32)
        .bind(stats.games_won as i32)
        .bind(stats.current_streak as i32)
        .bind(stats.max_streak as i32)
        .bind(distribution)
        .bind(stats.last_played_date)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
        Ok(())
    }
}
