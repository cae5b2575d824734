//! Signed session cookies and the extractors built on them.
//!
//! The cookie carries the user id, signed through [`SignedCookieJar`] with a
//! [`Key`] derived from the configured secret. The server keeps no
//! per-session state: anyone holding a cookie with a valid signature is that
//! user. There is no logout or expiry.

use std::convert::Infallible;

use axum::{
  extract::{FromRef, FromRequestParts},
  http::request::Parts,
};
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use medbuddy_core::{store::RecordStore, user::UserId};
use rand_core::{OsRng, RngCore};
use thiserror::Error;

use crate::{AppState, error::Error};

pub const COOKIE_NAME: &str = "medbuddy_session";

/// Shortest secret accepted from configuration, in bytes. Key derivation
/// needs at least this much input.
pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Error)]
pub enum KeyError {
  #[error("session secret is not valid hex: {0}")]
  Hex(#[from] hex::FromHexError),

  #[error("session secret must be at least {MIN_SECRET_LEN} bytes, got {0}")]
  TooShort(usize),
}

// ─── Key ─────────────────────────────────────────────────────────────────────

/// The process-wide key used to sign and verify session cookies.
#[derive(Clone)]
pub struct SessionKey(Key);

impl SessionKey {
  pub fn new(secret: &[u8]) -> Result<Self, KeyError> {
    if secret.len() < MIN_SECRET_LEN {
      return Err(KeyError::TooShort(secret.len()));
    }
    Ok(Self(Key::derive_from(secret)))
  }

  /// Parse a hex-encoded secret, as found in configuration.
  pub fn from_hex(secret: &str) -> Result<Self, KeyError> {
    Self::new(&hex::decode(secret.trim())?)
  }

  /// A fresh random key. Cookies signed with it die with the process.
  pub fn generate() -> Self { Self(Key::derive_from(&generate_secret())) }

  pub fn key(&self) -> &Key { &self.0 }
}

impl<S: RecordStore> FromRef<AppState<S>> for Key {
  fn from_ref(state: &AppState<S>) -> Self { state.session.key().clone() }
}

/// Random secret bytes suitable for [`SessionKey::new`].
pub fn generate_secret() -> [u8; MIN_SECRET_LEN] {
  let mut secret = [0u8; MIN_SECRET_LEN];
  OsRng.fill_bytes(&mut secret);
  secret
}

// ─── Cookie ──────────────────────────────────────────────────────────────────

/// The unsigned session cookie for `user_id`; the jar signs it on the way out.
pub fn session_cookie(user_id: UserId) -> Cookie<'static> {
  Cookie::build((COOKIE_NAME, user_id.to_string()))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .build()
}

/// The user named by a genuinely signed session cookie in `jar`, if any.
pub fn user_from_jar(jar: &SignedCookieJar) -> Option<UserId> {
  let cookie = jar.get(COOKIE_NAME)?;
  match cookie.value().parse() {
    Ok(user_id) => Some(user_id),
    Err(e) => {
      tracing::debug!(error = %e, "ignoring session cookie with malformed user id");
      None
    }
  }
}

// ─── Extractors ──────────────────────────────────────────────────────────────

/// The signed-in user. Rejects with [`Error::Unauthenticated`] otherwise.
pub struct CurrentUser(pub UserId);

impl<S> FromRequestParts<AppState<S>> for CurrentUser
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let MaybeUser(user_id) = MaybeUser::from_request_parts(parts, state)
      .await
      .unwrap_or_else(|never| match never {});
    user_id.map(CurrentUser).ok_or(Error::Unauthenticated)
  }
}

/// The signed-in user, if any. Page views use this to redirect instead of
/// failing.
pub struct MaybeUser(pub Option<UserId>);

impl<S> FromRequestParts<AppState<S>> for MaybeUser
where
  S: RecordStore + Clone + 'static,
{
  type Rejection = Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let jar = SignedCookieJar::<Key>::from_request_parts(parts, state).await?;
    Ok(MaybeUser(user_from_jar(&jar)))
  }
}
