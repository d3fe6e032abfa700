use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    book::Book,
    error::{ApiError, NotFoundError},
    extractor::path::ApiPath,
    state::ApiState,
    store_error,
    traits::StateProvider,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GetBookResponse {
    pub book: Book,
}

impl IntoResponse for GetBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Get a book by its isbn
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    params(("isbn" = String, Path, description = "Isbn of the book")),
    responses(
        (status = 200, description = "The book", body = GetBookResponse),
        (status = 404, description = "There is no book with this isbn"),
    ),
    tag = "books"
)]
pub async fn get_book(
    State(state): State<ApiState>,
    ApiPath(isbn): ApiPath<String>,
) -> Result<GetBookResponse, ApiError> {
    let book = state
        .book_store()
        .find(&isbn)
        .await
        .map_err(store_error!(state))?;

    match book {
        Some(book) => Ok(GetBookResponse { book }),
        None => Err(NotFoundError::book(&isbn).into()),
    }
}
