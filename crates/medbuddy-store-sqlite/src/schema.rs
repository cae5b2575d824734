//! SQL schema for the Medical Buddy SQLite store.
//!
//! Executed at every connection startup. Reopening an existing file leaves
//! stored rows untouched.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Foreign keys are declared but not enforced: `PRAGMA foreign_keys` is left
/// at its default (off) and there are no cascade actions.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id     INTEGER PRIMARY KEY,
    name   TEXT NOT NULL,
    email  TEXT NOT NULL,          -- not unique
    phone  TEXT NOT NULL
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS medical_records (
    id          INTEGER PRIMARY KEY,
    user_id     INTEGER NOT NULL,
    condition   TEXT NOT NULL,
    medication  TEXT NOT NULL,
    date_added  TEXT NOT NULL,     -- RFC 3339 UTC; server-assigned
    FOREIGN KEY (user_id) REFERENCES users (id)
);

-- Append-only. No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS appointments (
    id                INTEGER PRIMARY KEY,
    user_id           INTEGER NOT NULL,
    doctor_name       TEXT NOT NULL,
    appointment_date  TEXT NOT NULL,  -- caller-supplied, unparsed
    notes             TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id)
);

CREATE INDEX IF NOT EXISTS medical_records_user_idx ON medical_records(user_id);
CREATE INDEX IF NOT EXISTS appointments_user_idx    ON appointments(user_id);

PRAGMA user_version = 1;
";
