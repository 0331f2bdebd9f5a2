//! Issued QR token model
//!
//! A token scopes a check-in window to one course/session pair. The core
//! token struct is defined as follows:
//!
//! | Field        | Type       | Description                                   |
//! | ------------ | ---------- | --------------------------------------------- |
//! | `token`      | `TokenId`  | The unique identifier for the token.          |
//! | `course_id`  | `String`   | The course the token was issued under.        |
//! | `session_id` | `String`   | The session the token was issued under.       |
//! | `expires_at` | `DateTime` | The instant after which the token is expired. |
//! | `issued_at`  | `DateTime` | The timestamp when the token was issued.      |
//!
//! Tokens are immutable once written and are never deleted; expiry is a
//! comparison at validation time, not a lifecycle event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::{TOKEN_PREFIX, TOKEN_SUFFIX_LEN, generate_prefixed_id};

/// Unique identifier for an issued QR token, e.g. `TKN-9F3A1C`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Wrap an existing identifier string
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Generate a new random token identifier
    pub fn generate() -> Self {
        Self(generate_prefixed_id(TOKEN_PREFIX, TOKEN_SUFFIX_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One issued QR check-in token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrToken {
    pub token: TokenId,
    pub course_id: String,
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
    pub issued_at: DateTime<Utc>,
}

impl QrToken {
    /// Whether the token is expired at `now`.
    ///
    /// The boundary is strict: a check-in at exactly `expires_at` is still
    /// valid.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether the token is expired against the server clock
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Caller-visible result of issuing a token.
///
/// `issued_at` is stored but deliberately not part of this contract.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: TokenId,
    pub expires_at: DateTime<Utc>,
}
