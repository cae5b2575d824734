//! Core types and trait definitions for the Medical Buddy record service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store and server crates depend on it; it depends on nothing of theirs.

pub mod appointment;
pub mod error;
pub mod record;
pub mod store;
pub mod user;

pub use error::{Error, Result};
