//! Axum integration for Rollcall
//!
//! Exposes the three attendance operations over HTTP with a uniform JSON
//! envelope: every response body is `{"ok": true, "data": …}` or
//! `{"ok": false, "error": "<code>"}`. Identifier fields in request bodies
//! may arrive as JSON strings or numbers; both are accepted.
//!
//! # Routes
//!
//! | Method | Path        | Operation                 |
//! | ------ | ----------- | ------------------------- |
//! | POST   | `/tokens`   | Issue a check-in token    |
//! | POST   | `/checkins` | Record a check-in         |
//! | GET    | `/status`   | Attendance status lookup  |
//! | GET    | `/health`   | Storage health probe      |
//!
//! Any other path answers `endpoint_not_found`.

pub mod error;
pub mod routes;
pub mod types;

pub use error::ApiError;
pub use routes::{AppState, create_router};
pub use types::{ApiResponse, CheckinRequest, FieldValue, IssueTokenRequest, StatusParams};
