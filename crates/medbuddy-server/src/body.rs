//! Typed JSON request bodies.
//!
//! Every field is optional at the deserialisation layer so that an absent
//! field becomes a [`medbuddy_core::Error::MissingField`] naming it, rather
//! than an opaque extractor rejection.

use axum::{
  Json,
  extract::{FromRequest, Request, rejection::JsonRejection},
};
use medbuddy_core::{
  appointment::NewAppointment,
  error::required,
  record::NewRecord,
  user::NewUser,
};
use serde::{Deserialize, de::DeserializeOwned};

use crate::error::Error;

// ─── Extractor ───────────────────────────────────────────────────────────────

/// Like [`Json`], but rejects with this crate's JSON error body: 422 for
/// well-formed JSON of the wrong shape, 400 for anything unparseable.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
  T: DeserializeOwned,
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state)
      .await
      .map_err(|rejection| match rejection {
        JsonRejection::JsonDataError(e) => Error::InvalidBody(e.body_text()),
        other => Error::BadRequest(other.body_text()),
      })?;
    Ok(Self(value))
  }
}

// ─── Bodies ──────────────────────────────────────────────────────────────────

/// `POST /register`
#[derive(Debug, Default, Deserialize)]
pub struct RegisterBody {
  pub name:  Option<String>,
  pub email: Option<String>,
  pub phone: Option<String>,
}

impl TryFrom<RegisterBody> for NewUser {
  type Error = medbuddy_core::Error;

  fn try_from(body: RegisterBody) -> Result<Self, Self::Error> {
    Ok(NewUser {
      name:  required(body.name, "name")?,
      email: required(body.email, "email")?,
      phone: required(body.phone, "phone")?,
    })
  }
}

/// `POST /add_record`
#[derive(Debug, Default, Deserialize)]
pub struct RecordBody {
  pub condition:  Option<String>,
  pub medication: Option<String>,
}

impl TryFrom<RecordBody> for NewRecord {
  type Error = medbuddy_core::Error;

  fn try_from(body: RecordBody) -> Result<Self, Self::Error> {
    Ok(NewRecord {
      condition:  required(body.condition, "condition")?,
      medication: required(body.medication, "medication")?,
    })
  }
}

/// `POST /add_appointment`
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentBody {
  pub doctor_name:      Option<String>,
  pub appointment_date: Option<String>,
  pub notes:            Option<String>,
}

impl TryFrom<AppointmentBody> for NewAppointment {
  type Error = medbuddy_core::Error;

  fn try_from(body: AppointmentBody) -> Result<Self, Self::Error> {
    Ok(NewAppointment {
      doctor_name:      required(body.doctor_name, "doctor_name")?,
      appointment_date: required(body.appointment_date, "appointment_date")?,
      notes:            required(body.notes, "notes")?,
    })
  }
}

#[cfg(test)]
mod tests {
  use medbuddy_core::Error as CoreError;

  use super::*;

  #[test]
  fn complete_register_body_converts() {
    let body: RegisterBody =
      serde_json::from_str(r#"{"name":"Ann","email":"a@b.c","phone":"1"}"#).unwrap();
    let user = NewUser::try_from(body).unwrap();
    assert_eq!(user.name, "Ann");
  }

  #[test]
  fn first_missing_field_is_reported() {
    let body: RegisterBody = serde_json::from_str(r#"{"name":"Ann"}"#).unwrap();
    assert_eq!(NewUser::try_from(body), Err(CoreError::MissingField("email")));
  }

  #[test]
  fn null_counts_as_missing() {
    let body: RecordBody =
      serde_json::from_str(r#"{"condition":"flu","medication":null}"#).unwrap();
    assert_eq!(NewRecord::try_from(body), Err(CoreError::MissingField("medication")));
  }

  #[test]
  fn empty_strings_are_accepted() {
    let body: AppointmentBody = serde_json::from_str(
      r#"{"doctor_name":"","appointment_date":"","notes":""}"#,
    )
    .unwrap();
    assert!(NewAppointment::try_from(body).is_ok());
  }

  #[test]
  fn unknown_fields_are_ignored() {
    let body: RecordBody = serde_json::from_str(
      r#"{"condition":"flu","medication":"rest","severity":"high"}"#,
    )
    .unwrap();
    assert!(NewRecord::try_from(body).is_ok());
  }
}
