use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{ApiError, NotFoundError},
    extractor::path::ApiPath,
    state::ApiState,
    store_error,
    traits::StateProvider,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteBookResponse {
    pub message: String,
}

impl IntoResponse for DeleteBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Isbn of the book")),
    responses(
        (status = 200, description = "The book was deleted", body = DeleteBookResponse),
        (status = 404, description = "There is no book with this isbn"),
    ),
    tag = "books"
)]
pub async fn delete_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<DeleteBookResponse, ApiError> {
    let deleted = state
        .book_store()
        .delete(&isbn)
        .await
        .map_err(store_error!(state))?;

    match deleted {
        Some(_) => {
            tracing::info!(%isbn, "Book deleted");

            Ok(DeleteBookResponse {
                message: String::from("Book deleted"),
            })
        }
        None => Err(NotFoundError::book(&isbn).into()),
    }
}
