//! services/api/src/adapters/selector.rs
//!
//! Picks the secret book of the day from whatever catalog it is given.

use async_trait::async_trait;
use bookle_core::domain::Book;
use bookle_core::ports::{CatalogService, DailyBookService, PortResult};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Rotates through the catalog in id order, one book per day.
///
/// The choice depends only on the date and the set of book ids, so every
/// process serving the same catalog agrees on the day's book.
#[derive(Clone)]
pub struct DateSeededSelector {
    catalog: Arc<dyn CatalogService>,
}

impl DateSeededSelector {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self { catalog }
    }
}

/// Index of the day's book in a catalog of `len` books.
pub fn index_for_date(date: NaiveDate, len: usize) -> usize {
    let day = date.num_days_from_ce().rem_euclid(len as i32);
    day as usize
}

#[async_trait]
impl DailyBookService for DateSeededSelector {
    async fn book_for_date(&self, date: NaiveDate) -> PortResult<Option<Book>> {
        let mut books = self.catalog.list_books().await?;
        if books.is_empty() {
            return Ok(None);
        }

        books.sort_by_key(|b| b.id);
        let index = index_for_date(date, books.len());
        Ok(Some(books.swap_remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::StaticCatalog;

    fn selector() -> DateSeededSelector {
        DateSeededSelector::new(Arc::new(StaticCatalog::bundled().unwrap()))
    }

    #[tokio::test]
    async fn same_date_gives_same_book() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let a = selector().book_for_date(date).await.unwrap().unwrap();
        let b = selector().book_for_date(date).await.unwrap().unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn consecutive_days_rotate_through_the_catalog() {
        let selector = selector();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let mut ids = Vec::new();
        for offset in 0..12 {
            let date = start + chrono::Duration::days(offset);
            ids.push(selector.book_for_date(date).await.unwrap().unwrap().id);
        }
        ids.sort_unstable();
        ids.dedup();

        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn index_stays_in_range() {
        let date = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        assert_eq!(index_for_date(date, 5), 1);
        assert!(index_for_date(NaiveDate::MAX, 7) < 7);
    }
}
