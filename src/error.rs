use std::borrow::Cow;

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum ErrorVerbosity {
    /// Server returns the message and the status code.
    #[default]
    Message,
    /// Server additionally returns the reason of internal server errors.
    Full,
}

impl ErrorVerbosity {
    pub fn should_generate_error_reason(&self) -> bool {
        matches!(self, ErrorVerbosity::Full)
    }
}

/// A single message or the complete list of violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Single(Cow<'static, str>),
    List(Vec<String>),
}

/// `{"error": {"message": ..., "status": ...}}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: ErrorMessage,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.error.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status_code, Json(self)).into_response()
    }
}

/// API error
#[derive(Debug, From)]
pub enum ApiError {
    /// Internal server error
    ///
    /// This error is returned when the store fails or anything else unexpected happens.
    InternalServerError(InternalServerError),
    /// Body error
    ///
    /// This error is returned when the body is not valid JSON.
    Body(BodyError),
    /// Path error
    ///
    /// This error is returned when the path parameters can not be parsed.
    Path(PathError),
    /// Validation error
    ///
    /// This error is returned when the body does not match the schema of the resource.
    Validation(ValidationError),
    /// Not found error
    ///
    /// This error is returned when the requested route or resource does not exist.
    NotFound(NotFoundError),
    /// Conflict error
    ///
    /// This error is returned when a resource with the same key already exists.
    Conflict(ConflictError),
    /// Method not allowed
    MethodNotAllowed(MethodNotAllowedError),
}

impl ApiError {
    /// Maps a [`StoreError`] to a conflict or an internal server error.
    pub fn from_store_error(verbosity: ErrorVerbosity, err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { isbn } => ConflictError::new(format!(
                "A book with an isbn of '{isbn}' already exists"
            ))
            .into(),
            err => InternalServerError::from_generic_error(verbosity, err).into(),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
            ApiError::Path(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(error: ApiError) -> Self {
        let status = error.status_code().as_u16();

        let (message, reason) = match error {
            ApiError::InternalServerError(err) => (
                ErrorMessage::Single(Cow::Borrowed("An internal server error has occurred")),
                err.internal_server_error,
            ),
            ApiError::Body(err) => (ErrorMessage::List(vec![err.body_error_reason]), None),
            ApiError::Path(err) => (ErrorMessage::Single(Cow::Owned(err.path_error_reason)), None),
            ApiError::Validation(err) => (ErrorMessage::List(err.violations), None),
            ApiError::NotFound(err) => (ErrorMessage::Single(err.message), None),
            ApiError::Conflict(err) => (ErrorMessage::Single(Cow::Owned(err.message)), None),
            ApiError::MethodNotAllowed(_) => {
                (ErrorMessage::Single(Cow::Borrowed("Method Not Allowed")), None)
            }
        };

        ApiErrorResponse {
            error: ApiErrorBody {
                message,
                status,
                reason,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiErrorResponse::from(self).into_response()
    }
}

#[derive(Debug)]
pub struct InternalServerError {
    internal_server_error: Option<String>,
}

impl InternalServerError {
    pub fn from_generic_error<E: Into<anyhow::Error>>(verbosity: ErrorVerbosity, err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = format!("{err:#}");
        tracing::error!(%err, "Internal server error");

        let internal_server_error = verbosity.should_generate_error_reason().then_some(err);

        InternalServerError {
            internal_server_error,
        }
    }
}

#[derive(Debug)]
pub struct BodyError {
    body_error_reason: String,
}

impl BodyError {
    pub fn from_json_rejection(json_rejection: JsonRejection) -> Self {
        BodyError {
            body_error_reason: json_rejection.body_text(),
        }
    }
}

#[derive(Debug)]
pub struct PathError {
    path_error_reason: String,
}

impl PathError {
    pub fn from_path_rejection(path_rejection: PathRejection) -> Self {
        PathError {
            path_error_reason: path_rejection.body_text(),
        }
    }
}

#[derive(Debug)]
pub struct ValidationError {
    violations: Vec<String>,
}

impl ValidationError {
    pub fn new(violations: Vec<String>) -> Self {
        ValidationError { violations }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    message: Cow<'static, str>,
}

impl NotFoundError {
    /// No route matched the request.
    pub fn route() -> Self {
        NotFoundError {
            message: Cow::Borrowed("Not Found"),
        }
    }

    pub fn book(isbn: &str) -> Self {
        NotFoundError {
            message: Cow::Owned(format!("There is no book with an isbn of '{isbn}'")),
        }
    }
}

#[derive(Debug)]
pub struct ConflictError {
    message: String,
}

impl ConflictError {
    pub fn new(message: String) -> Self {
        ConflictError { message }
    }
}

#[derive(Debug, Default)]
pub struct MethodNotAllowedError;

impl MethodNotAllowedError {
    pub fn new() -> Self {
        MethodNotAllowedError
    }
}

/// Creates a closure mapping a [`StoreError`] to an [`ApiError`] using the verbosity of `$state`.
#[macro_export]
macro_rules! store_error {
    ($state:expr) => {
        |err| {
            $crate::error::ApiError::from_store_error(
                $crate::traits::StateProvider::error_verbosity(&$state),
                err,
            )
        }
    };
}
