use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{book::Book, error::ApiError, state::ApiState, store_error, traits::StateProvider};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListBooksResponse {
    pub books: Vec<Book>,
}

impl IntoResponse for ListBooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "Every book in the store", body = ListBooksResponse),
        (status = 500, description = "The store failed"),
    ),
    tag = "books"
)]
pub async fn list_books(State(state): State<ApiState>) -> Result<ListBooksResponse, ApiError> {
    let books = state
        .book_store()
        .list()
        .await
        .map_err(store_error!(state))?;

    tracing::debug!(count = books.len(), "Listed books");

    Ok(ListBooksResponse { books })
}
