//! SQLite storage backend for rollcall
//!
//! Implements the core repository traits over a `sqlx::SqlitePool`. The
//! presence table carries a uniqueness constraint on
//! `(user_id, course_id, session_id)`, so the duplicate-check-in invariant
//! holds even under concurrent writers.

pub mod migrations;
pub mod repositories;

pub use repositories::{SqlitePresenceRepository, SqliteRepositoryProvider, SqliteTokenRepository};
