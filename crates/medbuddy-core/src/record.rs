//! Medical records: a condition and the medication taken for it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// A stored medical record. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
  pub id:         i64,
  pub user_id:    UserId,
  pub condition:  String,
  pub medication: String,
  /// Server-assigned at insert time.
  pub date_added: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
  pub condition:  String,
  pub medication: String,
}
