//! `GET /dashboard` — the signed-in user's details, records and appointments.
//!
//! Renders HTML by default, or JSON when `Accept` includes
//! `application/json`. Requests without a valid session are redirected to
//! `/`, as are sessions naming a user the store no longer knows.

use axum::{
  Json,
  extract::State,
  http::HeaderMap,
  response::{Html, IntoResponse, Redirect, Response},
};
use medbuddy_core::store::RecordStore;

use crate::{AppState, error::Error, handlers::wants_json, pages, session::MaybeUser};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  MaybeUser(user_id): MaybeUser,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let Some(user_id) = user_id else {
    return Ok(Redirect::to("/").into_response());
  };

  let Some(view) = state
    .store
    .dashboard(user_id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
  else {
    tracing::warn!(%user_id, "session refers to unknown user");
    return Ok(Redirect::to("/").into_response());
  };

  if wants_json(&headers) {
    Ok(Json(view).into_response())
  } else {
    Ok(Html(pages::dashboard(&view)).into_response())
  }
}
