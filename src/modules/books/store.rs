//! In-memory book collection.
//!
//! One `RwLock` guards the whole collection. Writers hold it across their
//! find, validate and mutate steps so no reader sees a half-applied change.

use tokio::sync::RwLock;

use super::error::BookError;
use super::models::{Book, BookDraft, BookFilter, BookPayload, BookSummary};
use crate::utils;

/// Books in insertion order.
#[derive(Debug, Default)]
pub struct BookStore {
    books: RwLock<Vec<Book>>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append a new book, returning its id.
    pub async fn create(&self, payload: BookPayload) -> Result<String, BookError> {
        let draft = BookDraft::try_from(payload)?;
        let book = Book::new(utils::new_id(), draft, utils::now());
        let id = book.id.clone();

        self.books.write().await.push(book);
        Ok(id)
    }

    /// Summaries of every book accepted by `filter`, in insertion order.
    pub async fn list(&self, filter: &BookFilter) -> Vec<BookSummary> {
        self.books
            .read()
            .await
            .iter()
            .filter(|book| filter.matches(book))
            .map(Book::summary)
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Book, BookError> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    /// Replace the mutable fields of an existing book.
    ///
    /// A missing id is reported before any validation error.
    pub async fn update(&self, id: &str, payload: BookPayload) -> Result<(), BookError> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        let draft = BookDraft::try_from(payload)?;
        book.apply(draft, utils::now());
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> Result<(), BookError> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|book| book.id == id)
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        books.remove(index);
        Ok(())
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.books.read().await.iter().any(|book| book.id == id)
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Drop every book, returning how many were held.
    pub async fn clear(&self) -> usize {
        let mut books = self.books.write().await;
        let dropped = books.len();
        books.clear();
        dropped
    }
}
