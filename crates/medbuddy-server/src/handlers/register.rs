//! `POST /register` — create a user and sign them in.
//!
//! Body: `{"name": "...", "email": "...", "phone": "..."}`. Emails are not
//! checked for uniqueness. A client that registers twice simply switches its
//! session to the newer user.

use axum::{
  Json,
  extract::State,
  response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;
use medbuddy_core::{store::RecordStore, user::{NewUser, UserId}};
use serde::Serialize;

use crate::{
  AppState,
  body::{JsonBody, RegisterBody},
  error::Error,
  session::session_cookie,
};

#[derive(Debug, Serialize)]
pub struct Registered {
  pub success: bool,
  pub user_id: UserId,
}

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  jar: SignedCookieJar,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<Response, Error>
where
  S: RecordStore + Clone + 'static,
{
  let input = NewUser::try_from(body)?;
  let user = state
    .store
    .add_user(input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(user_id = %user.id, "registered user");

  Ok(
    (
      jar.add(session_cookie(user.id)),
      Json(Registered { success: true, user_id: user.id }),
    )
      .into_response(),
  )
}
