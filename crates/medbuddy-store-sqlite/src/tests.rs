//! Integration tests for `SqliteStore` against in-memory and on-disk databases.

use chrono::Utc;
use medbuddy_core::{
  appointment::NewAppointment,
  record::NewRecord,
  store::RecordStore,
  user::{NewUser, UserId},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn alice() -> NewUser {
  NewUser {
    name:  "Alice Liddell".into(),
    email: "alice@example.com".into(),
    phone: "555-0100".into(),
  }
}

fn flu() -> NewRecord {
  NewRecord {
    condition:  "flu".into(),
    medication: "ibuprofen".into(),
  }
}

fn checkup(date: &str) -> NewAppointment {
  NewAppointment {
    doctor_name:      "Dr. Who".into(),
    appointment_date: date.into(),
    notes:            "annual checkup".into(),
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;

  let user = s.add_user(alice()).await.unwrap();
  assert!(user.id.0 > 0);

  let fetched = s.get_user(user.id).await.unwrap().unwrap();
  assert_eq!(fetched, user);
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(UserId(999)).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_is_allowed() {
  let s = store().await;

  let first = s.add_user(alice()).await.unwrap();
  let second = s.add_user(alice()).await.unwrap();

  assert_ne!(first.id, second.id);
  assert_eq!(first.email, second.email);
}

// ─── Records ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_record_stamps_current_time() {
  let s = store().await;
  let user = s.add_user(alice()).await.unwrap();

  let before = Utc::now();
  let record = s.add_record(user.id, flu()).await.unwrap();

  let records = s.list_records(user.id).await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0], record);
  assert_eq!(records[0].condition, "flu");
  assert_eq!(records[0].medication, "ibuprofen");
  assert!(records[0].date_added >= before);
}

#[tokio::test]
async fn records_are_listed_in_insertion_order() {
  let s = store().await;
  let user = s.add_user(alice()).await.unwrap();

  for condition in ["asthma", "flu", "migraine"] {
    s.add_record(user.id, NewRecord {
      condition:  condition.into(),
      medication: "rest".into(),
    })
    .await
    .unwrap();
  }

  let conditions: Vec<_> = s
    .list_records(user.id)
    .await
    .unwrap()
    .into_iter()
    .map(|r| r.condition)
    .collect();
  assert_eq!(conditions, ["asthma", "flu", "migraine"]);
}

#[tokio::test]
async fn records_are_scoped_to_their_owner() {
  let s = store().await;
  let alice = s.add_user(alice()).await.unwrap();
  let bob = s
    .add_user(NewUser {
      name:  "Bob".into(),
      email: "bob@example.com".into(),
      phone: "555-0199".into(),
    })
    .await
    .unwrap();

  s.add_record(alice.id, flu()).await.unwrap();

  assert_eq!(s.list_records(alice.id).await.unwrap().len(), 1);
  assert!(s.list_records(bob.id).await.unwrap().is_empty());
}

// ─── Appointments ────────────────────────────────────────────────────────────

#[tokio::test]
async fn appointment_date_is_stored_verbatim() {
  let s = store().await;
  let user = s.add_user(alice()).await.unwrap();

  s.add_appointment(user.id, checkup("next tuesday-ish"))
    .await
    .unwrap();

  let appointments = s.list_appointments(user.id).await.unwrap();
  assert_eq!(appointments.len(), 1);
  assert_eq!(appointments[0].appointment_date, "next tuesday-ish");
  assert_eq!(appointments[0].doctor_name, "Dr. Who");
  assert_eq!(appointments[0].user_id, user.id);
}

// ─── Dashboard ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn dashboard_for_new_user_has_empty_lists() {
  let s = store().await;
  let user = s.add_user(alice()).await.unwrap();

  let dash = s.dashboard(user.id).await.unwrap().unwrap();
  assert_eq!(dash.user, user);
  assert!(dash.records.is_empty());
  assert!(dash.appointments.is_empty());
}

#[tokio::test]
async fn dashboard_for_unknown_user_is_none() {
  let s = store().await;
  assert!(s.dashboard(UserId(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn dashboard_collects_records_and_appointments() {
  let s = store().await;
  let user = s.add_user(alice()).await.unwrap();
  s.add_record(user.id, flu()).await.unwrap();
  s.add_appointment(user.id, checkup("2024-05-01")).await.unwrap();
  s.add_appointment(user.id, checkup("2024-06-01")).await.unwrap();

  let dash = s.dashboard(user.id).await.unwrap().unwrap();
  assert_eq!(dash.records.len(), 1);
  assert_eq!(dash.appointments.len(), 2);
  assert_eq!(dash.appointments[1].appointment_date, "2024-06-01");
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_file_preserves_rows() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("medical_buddy.db");

  let user_id = {
    let s = SqliteStore::open(&path).await.unwrap();
    let user = s.add_user(alice()).await.unwrap();
    s.add_record(user.id, flu()).await.unwrap();
    s.add_appointment(user.id, checkup("2024-05-01")).await.unwrap();
    user.id
  };

  let s = SqliteStore::open(&path).await.unwrap();
  let dash = s.dashboard(user_id).await.unwrap().unwrap();
  assert_eq!(dash.user.name, "Alice Liddell");
  assert_eq!(dash.records.len(), 1);
  assert_eq!(dash.appointments.len(), 1);
}
