//! # Rollcall
//!
//! Rollcall is a small attendance backend: it issues short-lived QR check-in
//! tokens for a teaching session, validates check-in submissions against
//! them, records attendance with a per-user duplicate guarantee, and answers
//! status queries.
//!
//! The crate coordinates three services over an injected storage backend:
//! - token issuance, scoped to a `(course_id, session_id)` pair
//! - check-in validation and recording
//! - attendance status lookup
//!
//! ## Storage Support
//!
//! Storage is abstracted behind `rollcall_core::repositories`; the SQLite
//! backend ships behind the `sqlite` feature (on by default).
//!
//! ## Example
//!
//! ```rust,no_run
//! use rollcall::Rollcall;
//! use rollcall_storage_sqlite::SqliteRepositoryProvider;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let repositories = Arc::new(
//!         SqliteRepositoryProvider::connect("sqlite::memory:")
//!             .await
//!             .unwrap(),
//!     );
//!
//!     let rollcall = Rollcall::new(repositories);
//!     rollcall.migrate().await.unwrap();
//!
//!     let issued = rollcall.issue_token("C1", "S1").await.unwrap();
//!     println!("scan within 5 minutes: {}", issued.token);
//! }
//! ```
use std::sync::Arc;

use chrono::Duration;
use rollcall_core::{
    RepositoryProvider,
    repositories::{PresenceRepositoryAdapter, TokenRepositoryAdapter},
    services::{CheckinService, StatusService, TokenService},
};

/// Re-export core types from rollcall_core
///
/// These types are commonly used when working with the Rollcall API.
pub use rollcall_core::{
    AttendanceState, AttendanceStatus, Error, IssuedToken, PresenceId, PresenceRecord,
    PresenceStatus, QrToken, TokenId,
};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding
/// feature is enabled.
#[cfg(feature = "sqlite")]
pub use rollcall_storage_sqlite::SqliteRepositoryProvider;

/// The configuration for issued check-in tokens.
///
/// The expiry window is fixed server policy, never caller-supplied. The
/// default mirrors the classroom QR flow: a token displayed on screen is
/// good for five minutes.
///
/// # Example
///
/// ```rust
/// use rollcall::TokenConfig;
///
/// let config = TokenConfig::default();
/// ```
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// The duration until an issued token expires
    pub expires_in: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            expires_in: Duration::minutes(5),
        }
    }
}

impl TokenConfig {
    /// Set the token expiry window
    ///
    /// # Arguments
    ///
    /// * `duration` - The duration until an issued token expires
    pub fn expires_in(mut self, duration: Duration) -> Self {
        self.expires_in = duration;
        self
    }
}

/// The main coordinator that wires services to a storage backend.
///
/// `Rollcall` is the single entry point applications use: construct it with
/// a repository provider, run `migrate()`, then call the three operations.
///
/// # Example
///
/// ```rust,no_run
/// use rollcall::Rollcall;
/// use rollcall_storage_sqlite::SqliteRepositoryProvider;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repositories = Arc::new(SqliteRepositoryProvider::connect("sqlite::memory:").await?);
///
///     let rollcall = Rollcall::new(repositories);
///     rollcall.migrate().await?;
///
///     let issued = rollcall.issue_token("C1", "S1").await?;
///     let record = rollcall
///         .check_in("U1", "D1", "C1", "S1", issued.token.as_str())
///         .await?;
///     println!("checked in: {}", record.presence_id);
///
///     Ok(())
/// }
/// ```
pub struct Rollcall<R: RepositoryProvider> {
    repositories: Arc<R>,
    token_service: Arc<TokenService<TokenRepositoryAdapter<R>>>,
    checkin_service: Arc<CheckinService<TokenRepositoryAdapter<R>, PresenceRepositoryAdapter<R>>>,
    status_service: Arc<StatusService<PresenceRepositoryAdapter<R>>>,
    token_config: TokenConfig,
}

impl<R: RepositoryProvider> Rollcall<R> {
    /// Create a new Rollcall instance with the default token configuration
    pub fn new(repositories: Arc<R>) -> Self {
        let token_service = Arc::new(TokenService::new(Arc::new(TokenRepositoryAdapter::new(
            repositories.clone(),
        ))));
        let checkin_service = Arc::new(CheckinService::new(
            Arc::new(TokenRepositoryAdapter::new(repositories.clone())),
            Arc::new(PresenceRepositoryAdapter::new(repositories.clone())),
        ));
        let status_service = Arc::new(StatusService::new(Arc::new(
            PresenceRepositoryAdapter::new(repositories.clone()),
        )));

        Self {
            repositories,
            token_service,
            checkin_service,
            status_service,
            token_config: TokenConfig::default(),
        }
    }

    /// Override the token configuration
    pub fn with_token_config(mut self, config: TokenConfig) -> Self {
        self.token_config = config;
        self
    }

    /// Issue a new check-in token for a course/session pair
    pub async fn issue_token(&self, course_id: &str, session_id: &str) -> Result<IssuedToken, Error> {
        self.token_service
            .issue(course_id, session_id, self.token_config.expires_in)
            .await
    }

    /// Validate a check-in submission and record attendance
    pub async fn check_in(
        &self,
        user_id: &str,
        device_id: &str,
        course_id: &str,
        session_id: &str,
        token: &str,
    ) -> Result<PresenceRecord, Error> {
        self.checkin_service
            .check_in(user_id, device_id, course_id, session_id, token)
            .await
    }

    /// Look up the latest attendance status for an identity
    pub async fn status(
        &self,
        user_id: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<AttendanceStatus, Error> {
        self.status_service
            .status(user_id, course_id, session_id)
            .await
    }

    /// Run storage migrations
    pub async fn migrate(&self) -> Result<(), Error> {
        tracing::info!("running storage migrations");
        self.repositories.migrate().await
    }

    /// Check that the storage backend is reachable
    pub async fn health_check(&self) -> Result<(), Error> {
        self.repositories.health_check().await
    }
}
