//! Appointments with a doctor.

use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A stored appointment. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
  pub id:               i64,
  pub user_id:          UserId,
  pub doctor_name:      String,
  /// Free-form, exactly as the caller supplied it. Never parsed.
  pub appointment_date: String,
  pub notes:            String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
  pub doctor_name:      String,
  pub appointment_date: String,
  pub notes:            String,
}
