//! services/api/src/adapters/memory.rs
//!
//! Process-local storage. Used when no database is configured, as the fallback
//! behind the database, and in tests.

use async_trait::async_trait;
use bookle_core::domain::{Session, Stats};
use bookle_core::ports::{PortResult, StorageService};
use chrono::NaiveDate;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct MemoryStorage {
    sessions: RwLock<HashMap<NaiveDate, Session>>,
    stats: RwLock<HashMap<String, Stats>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageService for MemoryStorage {
    async fn get_session_by_date(&self, date: NaiveDate) -> PortResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&date).cloned())
    }

    async fn save_session(&self, session: &Session) -> PortResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.date, session.clone());
        Ok(())
    }

    async fn get_stats(&self, player_id: &str) -> PortResult<Option<Stats>> {
        Ok(self.stats.read().await.get(player_id).cloned())
    }

    async fn save_stats(&self, stats: &Stats) -> PortResult<()> {
        self.stats
            .write()
            .await
            .insert(stats.player_id.clone(), stats.clone());
        Ok(())
    }
}
