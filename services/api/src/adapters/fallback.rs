//! services/api/src/adapters/fallback.rs
//!
//! A `StorageService` decorator that moves all traffic to a secondary store
//! after the primary fails.

use async_trait::async_trait;
use bookle_core::domain::{Session, Stats};
use bookle_core::ports::{PortError, PortResult, StorageService};
use chrono::NaiveDate;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::warn;

/// Serves from `primary` until it returns an unexpected error, then switches
/// to `secondary` for the rest of the process lifetime. `NotFound` is a normal
/// answer and never triggers the switch.
pub struct FallbackStorage {
    primary: Arc<dyn StorageService>,
    secondary: Arc<dyn StorageService>,
    degraded: AtomicBool,
}

impl FallbackStorage {
    pub fn new(primary: Arc<dyn StorageService>, secondary: Arc<dyn StorageService>) -> Self {
        Self {
            primary,
            secondary,
            degraded: AtomicBool::new(false),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::SeqCst)
    }

    async fn run<'a, T, F, Fut>(&'a self, op: &str, call: F) -> PortResult<T>
    where
        F: Fn(&'a dyn StorageService) -> Fut,
        Fut: Future<Output = PortResult<T>> + 'a,
    {
        if !self.is_degraded() {
            match call(self.primary.as_ref()).await {
                Err(PortError::Unexpected(reason)) => {
                    warn!(
                        "Primary storage failed during {}: {}. Switching to fallback storage.",
                        op, reason
                    );
                    self.degraded.store(true, Ordering::SeqCst);
                }
                result => return result,
            }
        }
        call(self.secondary.as_ref()).await
    }
}

#[async_trait]
impl StorageService for FallbackStorage {
    async fn get_session_by_date(&self, date: NaiveDate) -> PortResult<Option<Session>> {
        self.run("get_session_by_date", |s| s.get_session_by_date(date))
            .await
    }

    async fn save_session(&self, session: &Session) -> PortResult<()> {
        self.run("save_session", |s| s.save_session(session)).await
    }

    async fn get_stats(&self, player_id: &str) -> PortResult<Option<Stats>> {
        self.run("get_stats", |s| s.get_stats(player_id)).await
    }

    async fn save_stats(&self, stats: &Stats) -> PortResult<()> {
        self.run("save_stats", |s| s.save_stats(stats)).await
    }
}
