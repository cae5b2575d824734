pub mod dashboard;
pub mod health;
pub mod records;
pub mod register;
pub mod views;

use axum::http::{HeaderMap, header};

/// Whether the client asked for JSON rather than a rendered page.
pub(crate) fn wants_json(headers: &HeaderMap) -> bool {
  headers
    .get(header::ACCEPT)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|accept| accept.contains("application/json"))
}
