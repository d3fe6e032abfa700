use tokio::sync::RwLock;

use crate::book::Book;

use super::{BookStore, StoreError};

/// An in-process [`BookStore`] keeping books in insertion order.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
        }
    }
}

#[async_trait::async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.books.read().await.clone())
    }

    async fn find(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;

        Ok(books.iter().find(|book| book.isbn == isbn).cloned())
    }

    async fn insert(&self, book: Book) -> Result<Book, StoreError> {
        let mut books = self.books.write().await;

        if books.iter().any(|stored| stored.isbn == book.isbn) {
            return Err(StoreError::Duplicate { isbn: book.isbn });
        }

        books.push(book.clone());

        Ok(book)
    }

    async fn update(&self, book: Book) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;

        let Some(stored) = books.iter_mut().find(|stored| stored.isbn == book.isbn) else {
            return Ok(None);
        };

        *stored = book.clone();

        Ok(Some(book))
    }

    async fn delete(&self, isbn: &str) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;

        let removed = books
            .iter()
            .position(|book| book.isbn == isbn)
            .map(|index| books.remove(index));

        Ok(removed)
    }
}
