use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use serde_json::Value;
use std::fmt::Debug;

use crate::{
    error::{ApiError, ValidationError},
    schema::{self, SchemaValidated},
};

use super::json::ApiJson;

/// Extracts the request body as JSON and validates it against the [`schema::Schema`] of `T`.
///
/// Rejects with every violation found, before the handler runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: SchemaValidated + Debug + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    #[tracing::instrument(name = "validated_extractor", skip_all)]
    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<Value>::from_request(req, state).await?;

        match schema::validate::<T>(value) {
            Ok(payload) => {
                tracing::trace!(?payload, "Validated");

                Ok(ValidatedJson(payload))
            }
            Err(violations) => {
                tracing::warn!(?violations, "Validation errors");

                Err(ValidationError::new(violations).into())
            }
        }
    }
}
