use axum::http::Uri;

use crate::error::{ApiError, NotFoundError};

/// Fallback for requests that match no route.
pub async fn not_found(uri: Uri) -> ApiError {
    tracing::warn!(%uri, "No route matched");

    NotFoundError::route().into()
}
