//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use medbuddy_core::{
  appointment::{Appointment, NewAppointment},
  record::{MedicalRecord, NewRecord},
  store::RecordStore,
  user::{NewUser, User, UserId},
};

use crate::{
  encode::{RawRecord, encode_dt},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    tracing::debug!("schema initialised");
    Ok(())
  }
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
  Ok(User {
    id:    UserId(row.get(0)?),
    name:  row.get(1)?,
    email: row.get(2)?,
    phone: row.get(3)?,
  })
}

fn appointment_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Appointment> {
  Ok(Appointment {
    id:               row.get(0)?,
    user_id:          UserId(row.get(1)?),
    doctor_name:      row.get(2)?,
    appointment_date: row.get(3)?,
    notes:            row.get(4)?,
  })
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let NewUser { name, email, phone } = input;

    let user = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (name, email, phone) VALUES (?1, ?2, ?3)",
          rusqlite::params![name, email, phone],
        )?;
        Ok(User {
          id: UserId(conn.last_insert_rowid()),
          name,
          email,
          phone,
        })
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: UserId) -> Result<Option<User>> {
    let user = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, name, email, phone FROM users WHERE id = ?1",
            rusqlite::params![id.0],
            user_from_row,
          )
          .optional()?)
      })
      .await?;

    Ok(user)
  }

  // ── Medical records ───────────────────────────────────────────────────────

  async fn add_record(&self, user_id: UserId, input: NewRecord) -> Result<MedicalRecord> {
    let date_added = Utc::now();
    let at_str = encode_dt(date_added);
    let NewRecord { condition, medication } = input;

    let record = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO medical_records (user_id, condition, medication, date_added)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![user_id.0, condition, medication, at_str],
        )?;
        Ok(MedicalRecord {
          id: conn.last_insert_rowid(),
          user_id,
          condition,
          medication,
          date_added,
        })
      })
      .await?;

    Ok(record)
  }

  async fn list_records(&self, user_id: UserId) -> Result<Vec<MedicalRecord>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM medical_records WHERE user_id = ?1 ORDER BY id",
          RawRecord::COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![user_id.0], RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRecord::into_record).collect()
  }

  // ── Appointments ──────────────────────────────────────────────────────────

  async fn add_appointment(
    &self,
    user_id: UserId,
    input: NewAppointment,
  ) -> Result<Appointment> {
    let NewAppointment { doctor_name, appointment_date, notes } = input;

    let appointment = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO appointments (user_id, doctor_name, appointment_date, notes)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![user_id.0, doctor_name, appointment_date, notes],
        )?;
        Ok(Appointment {
          id: conn.last_insert_rowid(),
          user_id,
          doctor_name,
          appointment_date,
          notes,
        })
      })
      .await?;

    Ok(appointment)
  }

  async fn list_appointments(&self, user_id: UserId) -> Result<Vec<Appointment>> {
    let appointments = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, user_id, doctor_name, appointment_date, notes
           FROM appointments WHERE user_id = ?1 ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![user_id.0], appointment_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(appointments)
  }
}
