//! Error types for `medbuddy-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A required input field was absent or null.
  #[error("missing required field: {0}")]
  MissingField(&'static str),

  #[error("invalid user id: {0:?}")]
  InvalidUserId(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unwrap a required input field, naming it in the error if absent.
pub fn required<T>(value: Option<T>, field: &'static str) -> Result<T> {
  value.ok_or(Error::MissingField(field))
}
