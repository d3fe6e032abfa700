use crate::book::Book;

mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::{DatabaseConfig, PgBookStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A book with isbn {isbn} already exists")]
    Duplicate { isbn: String },
    #[error("Database failure: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence of book records.
///
/// Every operation maps to a single statement keyed by the isbn where one is given.
/// `None` means no row matched.
#[async_trait::async_trait]
pub trait BookStore: Send + Sync {
    /// Returns every book in the store's natural order.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    async fn find(&self, isbn: &str) -> Result<Option<Book>, StoreError>;

    /// Inserts the book and returns the row as stored.
    async fn insert(&self, book: Book) -> Result<Book, StoreError>;

    /// Replaces every non-key field of the book with the given isbn.
    async fn update(&self, book: Book) -> Result<Option<Book>, StoreError>;

    /// Removes the book and returns the deleted row.
    async fn delete(&self, isbn: &str) -> Result<Option<Book>, StoreError>;
}
