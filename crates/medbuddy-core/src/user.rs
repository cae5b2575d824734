//! Users: the owners of every record and appointment.
//!
//! Users are created on registration and never updated or deleted. There is
//! no uniqueness constraint on email.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Store-assigned identity of a [`User`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { fmt::Display::fmt(&self.0, f) }
}

impl FromStr for UserId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    // Only the canonical decimal form: no sign, no leading zeros.
    s.parse::<i64>()
      .ok()
      .filter(|id| *id > 0 && id.to_string() == s)
      .map(UserId)
      .ok_or_else(|| Error::InvalidUserId(s.to_owned()))
  }
}

impl From<i64> for UserId {
  fn from(id: i64) -> Self { Self(id) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id:    UserId,
  pub name:  String,
  pub email: String,
  pub phone: String,
}

/// Input for registering a new user. No field is validated beyond presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
  pub name:  String,
  pub email: String,
  pub phone: String,
}
