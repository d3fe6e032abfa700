use crate::{error::ErrorVerbosity, store::BookStore};

pub trait StateProvider {
    /// Returns the error verbosity.
    fn error_verbosity(&self) -> ErrorVerbosity;

    /// Returns the store holding the books.
    fn book_store(&self) -> &dyn BookStore;
}
