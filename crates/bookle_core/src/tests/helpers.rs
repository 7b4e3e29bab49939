use crate::domain::{Book, Session, Stats};
use crate::ports::{CatalogService, DailyBookService, PortError, PortResult, StorageService};
use crate::service::GameService;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const PLAYER: &str = "test-player";

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

pub fn create_test_book(id: u32, title: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: format!("Author {}", id),
        publication_year: 1900 + (id as i32) * 20,
        genre: format!("Genre {}", id),
        authors_country: format!("Country {}", id),
        pages: 100 * id,
        original_language: format!("Language {}", id),
        historical_period: format!("Period {}", id),
        cover_image_ref: None,
    }
}

/// Ten books with pairwise distinct attributes.
pub fn create_test_catalog() -> Vec<Book> {
    (1..=10)
        .map(|id| create_test_book(id, &format!("Book {}", id)))
        .collect()
}

pub struct FakeCatalog {
    books: Vec<Book>,
}

impl FakeCatalog {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_books(&self) -> PortResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    async fn get_book_by_id(&self, id: u32) -> PortResult<Book> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("Book {}", id)))
    }

    async fn get_book_by_title(&self, title: &str) -> PortResult<Book> {
        self.books
            .iter()
            .find(|b| b.title.eq_ignore_ascii_case(title))
            .cloned()
            .ok_or_else(|| PortError::NotFound(title.to_string()))
    }
}

/// Always picks the same book, or nothing.
pub struct FixedDailyBook(pub Option<Book>);

#[async_trait]
impl DailyBookService for FixedDailyBook {
    async fn book_for_date(&self, _date: NaiveDate) -> PortResult<Option<Book>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct FakeStorage {
    sessions: Mutex<HashMap<NaiveDate, Session>>,
    stats: Mutex<HashMap<String, Stats>>,
    pub stats_saves: AtomicUsize,
    pub fail_stats_save: AtomicBool,
    /// Fails only the save that marks a finished session as counted.
    pub fail_flagged_session_save: AtomicBool,
}

#[async_trait]
impl StorageService for FakeStorage {
    async fn get_session_by_date(&self, date: NaiveDate) -> PortResult<Option<Session>> {
        Ok(self.sessions.lock().unwrap().get(&date).cloned())
    }

    async fn save_session(&self, session: &Session) -> PortResult<()> {
        if session.stats_recorded && self.fail_flagged_session_save.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("sessions table unavailable".to_string()));
        }
        self.sessions
            .lock()
            .unwrap()
            .insert(session.date, session.clone());
        Ok(())
    }

    async fn get_stats(&self, player_id: &str) -> PortResult<Option<Stats>> {
        Ok(self.stats.lock().unwrap().get(player_id).cloned())
    }

    async fn save_stats(&self, stats: &Stats) -> PortResult<()> {
        if self.fail_stats_save.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("stats table unavailable".to_string()));
        }
        self.stats_saves.fetch_add(1, Ordering::SeqCst);
        self.stats
            .lock()
            .unwrap()
            .insert(stats.player_id.clone(), stats.clone());
        Ok(())
    }
}

/// A service over the ten-book test catalog whose secret book has `target_id`.
pub fn create_test_service(target_id: u32) -> (GameService, Arc<FakeStorage>) {
    let books = create_test_catalog();
    let target = books.iter().find(|b| b.id == target_id).cloned();
    let storage = Arc::new(FakeStorage::default());
    let service = GameService::new(
        Arc::new(FakeCatalog::new(books)),
        Arc::new(FixedDailyBook(target)),
        storage.clone(),
        PLAYER,
    );
    (service, storage)
}
