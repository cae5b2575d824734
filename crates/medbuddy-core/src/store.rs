//! The `RecordStore` trait and the dashboard view assembled from it.
//!
//! The trait is implemented by storage backends (e.g. `medbuddy-store-sqlite`).
//! The server depends on this abstraction, not on any concrete backend.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{
  appointment::{Appointment, NewAppointment},
  record::{MedicalRecord, NewRecord},
  user::{NewUser, User, UserId},
};

// ─── Views ───────────────────────────────────────────────────────────────────

/// Everything shown on a user's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
  pub user:         User,
  /// In storage order.
  pub records:      Vec<MedicalRecord>,
  /// In storage order.
  pub appointments: Vec<Appointment>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Medical Buddy store backend.
///
/// Every table is append-only: there is deliberately no update or delete
/// method.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Persist a new user and return it with its assigned id.
  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Retrieve a user by id. Returns `None` if not found.
  fn get_user(
    &self,
    id: UserId,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  // ── Medical records ───────────────────────────────────────────────────

  /// Persist a record for `user_id`, stamped with the current time.
  fn add_record(
    &self,
    user_id: UserId,
    input: NewRecord,
  ) -> impl Future<Output = Result<MedicalRecord, Self::Error>> + Send + '_;

  fn list_records(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<MedicalRecord>, Self::Error>> + Send + '_;

  // ── Appointments ──────────────────────────────────────────────────────

  /// Persist an appointment for `user_id` exactly as supplied.
  fn add_appointment(
    &self,
    user_id: UserId,
    input: NewAppointment,
  ) -> impl Future<Output = Result<Appointment, Self::Error>> + Send + '_;

  fn list_appointments(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Vec<Appointment>, Self::Error>> + Send + '_;

  // ── Views ─────────────────────────────────────────────────────────────

  /// Assemble the dashboard for `user_id`, or `None` if the user is unknown.
  fn dashboard(
    &self,
    user_id: UserId,
  ) -> impl Future<Output = Result<Option<Dashboard>, Self::Error>> + Send + '_ {
    async move {
      let Some(user) = self.get_user(user_id).await? else {
        return Ok(None);
      };
      let records = self.list_records(user_id).await?;
      let appointments = self.list_appointments(user_id).await?;
      Ok(Some(Dashboard { user, records, appointments }))
    }
  }
}
