//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No valid session on a protected endpoint.
  #[error("Not logged in")]
  Unauthenticated,

  /// The body parsed but a required field was absent.
  #[error(transparent)]
  Validation(#[from] medbuddy_core::Error),

  /// The body could not be parsed as JSON at all.
  #[error("bad request: {0}")]
  BadRequest(String),

  /// A field was present but had the wrong JSON type.
  #[error("invalid request body: {0}")]
  InvalidBody(String),

  #[error("Too many requests")]
  RateLimited,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Unauthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
      Error::Validation(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
      Error::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
      Error::InvalidBody(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
      Error::RateLimited => (StatusCode::TOO_MANY_REQUESTS, self.to_string()),
      Error::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "internal server error".to_owned(),
        )
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
