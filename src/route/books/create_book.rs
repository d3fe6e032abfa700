use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::Book, error::ApiError, extractor::validated::ValidatedJson, state::ApiState,
    store_error, traits::StateProvider,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateBookResponse {
    pub book: Book,
}

impl IntoResponse for CreateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Create a book
///
/// Every field is required. All schema violations are reported at once.
#[utoipa::path(
    post,
    path = "/books",
    request_body = Book,
    responses(
        (status = 201, description = "The created book", body = CreateBookResponse),
        (status = 400, description = "The payload violates the book schema"),
        (status = 409, description = "A book with this isbn already exists"),
    ),
    tag = "books"
)]
pub async fn create_book(
    State(state): State<ApiState>,
    ValidatedJson(book): ValidatedJson<Book>,
) -> Result<CreateBookResponse, ApiError> {
    let book = state
        .book_store()
        .insert(book)
        .await
        .map_err(store_error!(state))?;

    tracing::info!(isbn = %book.isbn, "Book created");

    Ok(CreateBookResponse { book })
}
