//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// An error returned by an API handler.
///
/// Every failure from the store or the search index is reported as a bad
/// request carrying the error's message; there is no finer-grained code.
#[derive(Debug, Error)]
pub enum ApiError {
  /// An empty result for a single-entity lookup. Rendered as `404 {}`.
  #[error("not found: {0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),
}

impl ApiError {
  pub fn from_source<E: std::error::Error>(err: E) -> Self { Self::BadRequest(err.to_string()) }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { Self::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    warn!(error = %self, "request failed");
    match self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
      ApiError::BadRequest(m) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": m }))).into_response()
      }
    }
  }
}
