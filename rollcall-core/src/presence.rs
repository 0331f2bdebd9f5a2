//! Presence record model
//!
//! A presence record is the durable result of one successful check-in.
//! Records are append-only and immutable; the system-wide invariant is that
//! at most one record exists per `(user_id, course_id, session_id)` triple.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{PRESENCE_PREFIX, PRESENCE_SUFFIX_LEN, generate_prefixed_id};
use crate::token::TokenId;

/// Unique identifier for a presence record, e.g. `PR-4B7D90E2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresenceId(String);

impl PresenceId {
    /// Wrap an existing identifier string
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Generate a new random presence identifier
    pub fn generate() -> Self {
        Self(generate_prefixed_id(PRESENCE_PREFIX, PRESENCE_SUFFIX_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PresenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PresenceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Status carried by a presence record.
///
/// A single member today; modeled as an enum so new record states can be
/// added without changing the storage contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    CheckedIn,
}

impl PresenceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PresenceStatus::CheckedIn => "checked_in",
        }
    }
}

impl std::fmt::Display for PresenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PresenceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "checked_in" => Ok(PresenceStatus::CheckedIn),
            other => Err(ValidationError::InvalidField(format!(
                "unknown presence status: {other}"
            ))),
        }
    }
}

/// One completed check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    pub presence_id: PresenceId,
    pub user_id: String,
    pub device_id: String,
    pub course_id: String,
    pub session_id: String,
    pub token: TokenId,
    pub status: PresenceStatus,
    pub timestamp: DateTime<Utc>,
}

/// Answer to a status query, covering both the checked-in and the
/// not-checked-in case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    CheckedIn,
    NotCheckedIn,
}

impl From<PresenceStatus> for AttendanceState {
    fn from(status: PresenceStatus) -> Self {
        match status {
            PresenceStatus::CheckedIn => AttendanceState::CheckedIn,
        }
    }
}

/// Result of a status lookup.
///
/// Absence of a check-in is a successful, expected answer, never an error:
/// `status` is `NotCheckedIn` and `last_ts` is `None`.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceStatus {
    pub user_id: String,
    pub course_id: String,
    pub session_id: String,
    pub status: AttendanceState,
    pub last_ts: Option<DateTime<Utc>>,
}
