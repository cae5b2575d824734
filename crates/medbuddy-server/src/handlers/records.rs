//! Append-only writes for the signed-in user.
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `POST` | `/add_record` | `{"condition": "...", "medication": "..."}` |
//! | `POST` | `/add_appointment` | `{"doctor_name": "...", "appointment_date": "...", "notes": "..."}` |
//!
//! Both require a session. The session is checked before the body is read,
//! so an anonymous request gets 401 whatever it sends.

use axum::{Json, extract::State};
use medbuddy_core::{
  appointment::NewAppointment,
  record::NewRecord,
  store::RecordStore,
};
use serde::Serialize;

use crate::{
  AppState,
  body::{AppointmentBody, JsonBody, RecordBody},
  error::Error,
  session::CurrentUser,
};

#[derive(Debug, Serialize)]
pub struct Ack {
  pub success: bool,
}

const ACK: Ack = Ack { success: true };

/// `POST /add_record`
pub async fn add_record<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user_id): CurrentUser,
  JsonBody(body): JsonBody<RecordBody>,
) -> Result<Json<Ack>, Error>
where
  S: RecordStore + Clone + 'static,
{
  let input = NewRecord::try_from(body)?;
  let record = state
    .store
    .add_record(user_id, input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::debug!(%user_id, record_id = record.id, "added medical record");
  Ok(Json(ACK))
}

/// `POST /add_appointment`
pub async fn add_appointment<S>(
  State(state): State<AppState<S>>,
  CurrentUser(user_id): CurrentUser,
  JsonBody(body): JsonBody<AppointmentBody>,
) -> Result<Json<Ack>, Error>
where
  S: RecordStore + Clone + 'static,
{
  let input = NewAppointment::try_from(body)?;
  let appointment = state
    .store
    .add_appointment(user_id, input)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  tracing::debug!(%user_id, appointment_id = appointment.id, "added appointment");
  Ok(Json(ACK))
}
