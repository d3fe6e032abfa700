use axum::{
    body::Body,
    extract::{Request, State},
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::Response,
};
use http_body_util::BodyExt;

use crate::{
    error::{ApiError, InternalServerError},
    state::ApiState,
    traits::StateProvider,
};

/// Middleware to trace JSON response bodies.
///
/// The body is only buffered while `TRACE` is enabled. Otherwise the response is passed on untouched.
pub async fn trace_response_body(
    State(state): State<ApiState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let uri = req.uri().clone();
    let res = next.run(req).await;

    if !tracing::enabled!(tracing::Level::TRACE) || !is_json(&res) {
        return Ok(res);
    }

    let (parts, body) = res.into_parts();
    let bytes = body
        .collect()
        .await
        .map_err(|err| InternalServerError::from_generic_error(state.error_verbosity(), err))?
        .to_bytes();

    match std::str::from_utf8(&bytes) {
        Ok(body) => tracing::trace!(%uri, status = %parts.status, %body, "Response body"),
        Err(_) => tracing::trace!(%uri, status = %parts.status, len = bytes.len(), "Response body is not UTF-8"),
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn is_json(res: &Response) -> bool {
    res.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}
