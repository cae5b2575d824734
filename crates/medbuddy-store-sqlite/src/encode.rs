//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings.

use chrono::{DateTime, Utc};
use medbuddy_core::{record::MedicalRecord, user::UserId};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// A `medical_records` row before its timestamp has been parsed.
///
/// Decoding happens outside the connection closure so parse failures surface
/// as [`Error::DateParse`] rather than as opaque database errors.
pub struct RawRecord {
  pub id:         i64,
  pub user_id:    i64,
  pub condition:  String,
  pub medication: String,
  pub date_added: String,
}

impl RawRecord {
  pub const COLUMNS: &'static str = "id, user_id, condition, medication, date_added";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      user_id:    row.get(1)?,
      condition:  row.get(2)?,
      medication: row.get(3)?,
      date_added: row.get(4)?,
    })
  }

  pub fn into_record(self) -> Result<MedicalRecord> {
    Ok(MedicalRecord {
      id:         self.id,
      user_id:    UserId(self.user_id),
      condition:  self.condition,
      medication: self.medication,
      date_added: decode_dt(&self.date_added)?,
    })
  }
}
