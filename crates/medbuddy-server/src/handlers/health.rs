//! `GET /api/health` — liveness check. No auth, no store access.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub timestamp: DateTime<Utc>,
}

pub async fn handler() -> Json<Health> {
  Json(Health {
    status:    "OK",
    timestamp: Utc::now(),
  })
}
