//! Core functionality for the rollcall project
//!
//! This module contains the core functionality for the rollcall attendance
//! backend: the token and presence record models, the repository traits that
//! storage backends implement, and the services that hold the check-in logic.
//!
//! The crate never talks to a concrete storage backend. Services are generic
//! over the repository traits in [`repositories`], and backends plug in by
//! implementing [`repositories::RepositoryProvider`].
//!
//! See [`QrToken`] for the issued-token model, [`PresenceRecord`] for the
//! check-in record, and [`services`] for the three operations.

pub mod error;
pub mod id;
pub mod presence;
pub mod repositories;
pub mod services;
pub mod token;
pub mod validation;

pub use error::Error;
pub use presence::{AttendanceState, AttendanceStatus, PresenceId, PresenceRecord, PresenceStatus};
pub use repositories::RepositoryProvider;
pub use token::{IssuedToken, QrToken, TokenId};
