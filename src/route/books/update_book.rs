use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::{Book, BookUpdate},
    error::{ApiError, NotFoundError},
    extractor::{path::ApiPath, validated::ValidatedJson},
    state::ApiState,
    store_error,
    traits::StateProvider,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateBookResponse {
    pub book: Book,
}

impl IntoResponse for UpdateBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Update a book
///
/// Replaces every field except the isbn, which is taken from the path.
#[utoipa::path(
    put,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Isbn of the book")),
    request_body = BookUpdate,
    responses(
        (status = 200, description = "The updated book", body = UpdateBookResponse),
        (status = 400, description = "The payload violates the book schema"),
        (status = 404, description = "There is no book with this isbn"),
    ),
    tag = "books"
)]
pub async fn update_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
    ValidatedJson(update): ValidatedJson<BookUpdate>,
) -> Result<UpdateBookResponse, ApiError> {
    let book = state
        .book_store()
        .update(update.into_book(isbn.clone()))
        .await
        .map_err(store_error!(state))?;

    match book {
        Some(book) => {
            tracing::info!(%isbn, "Book updated");

            Ok(UpdateBookResponse { book })
        }
        None => Err(NotFoundError::book(&isbn).into()),
    }
}
