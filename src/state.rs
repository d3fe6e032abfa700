use std::{ops::Deref, sync::Arc};

use crate::{error::ErrorVerbosity, store::BookStore, traits::StateProvider};

#[derive(Clone)]
pub struct ApiState {
    inner: Arc<ApiStateInner>,
}

impl ApiState {
    pub fn new(error_verbosity: ErrorVerbosity, book_store: Box<dyn BookStore>) -> Self {
        Self {
            inner: Arc::new(ApiStateInner {
                error_verbosity,
                book_store,
            }),
        }
    }
}

impl Deref for ApiState {
    type Target = ApiStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

pub struct ApiStateInner {
    error_verbosity: ErrorVerbosity,
    book_store: Box<dyn BookStore>,
}

impl StateProvider for ApiState {
    fn error_verbosity(&self) -> ErrorVerbosity {
        self.error_verbosity
    }

    fn book_store(&self) -> &dyn BookStore {
        self.book_store.as_ref()
    }
}
