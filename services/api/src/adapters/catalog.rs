//! services/api/src/adapters/catalog.rs
//!
//! An in-process book catalog loaded from JSON. Implements the `CatalogService`
//! port from the `core` crate.

use async_trait::async_trait;
use bookle_core::domain::Book;
use bookle_core::ports::{CatalogService, PortError, PortResult};
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

/// The catalog bundled with the binary, used when no `CATALOG_PATH` is set.
pub const BUNDLED_CATALOG: &str = include_str!("../../catalog/books.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("The catalog contains no books")]
    Empty,
    #[error("Book {id} is invalid: {reason}")]
    InvalidBook { id: u32, reason: String },
    #[error("Duplicate book id {0}")]
    DuplicateId(u32),
    #[error("Duplicate book title '{0}'")]
    DuplicateTitle(String),
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A validated, immutable set of books with id and title indexes.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    books: Vec<Book>,
    by_id: HashMap<u32, usize>,
    by_title: HashMap<String, usize>,
}

impl StaticCatalog {
    /// Builds a catalog, rejecting data the game cannot score safely.
    pub fn new(books: Vec<Book>) -> Result<Self, CatalogError> {
        if books.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_id = HashMap::with_capacity(books.len());
        let mut by_title = HashMap::with_capacity(books.len());
        for (index, book) in books.iter().enumerate() {
            validate(book)?;
            if by_id.insert(book.id, index).is_some() {
                return Err(CatalogError::DuplicateId(book.id));
            }
            if by_title.insert(title_key(&book.title), index).is_some() {
                return Err(CatalogError::DuplicateTitle(book.title.clone()));
            }
        }

        Ok(Self {
            books,
            by_id,
            by_title,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let books: Vec<Book> = serde_json::from_str(json)?;
        Self::new(books)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        info!("Loaded {} books from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }
}

fn title_key(title: &str) -> String {
    title.trim().to_lowercase()
}

fn validate(book: &Book) -> Result<(), CatalogError> {
    let invalid = |reason: &str| CatalogError::InvalidBook {
        id: book.id,
        reason: reason.to_string(),
    };

    if book.title.trim().is_empty() {
        return Err(invalid("title is empty"));
    }
    if book.pages == 0 {
        return Err(invalid("pages must be greater than zero"));
    }
    Ok(())
}

//=========================================================================================
// `CatalogService` Trait Implementation
//=========================================================================================

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn list_books(&self) -> PortResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    async fn get_book_by_id(&self, id: u32) -> PortResult<Book> {
        self.by_id
            .get(&id)
            .map(|&index| self.books[index].clone())
            .ok_or_else(|| PortError::NotFound(format!("Book {} not found", id)))
    }

    async fn get_book_by_title(&self, title: &str) -> PortResult<Book> {
        self.by_title
            .get(&title_key(title))
            .map(|&index| self.books[index].clone())
            .ok_or_else(|| PortError::NotFound(format!("Book '{}' not found", title)))
    }
}
