//! Repository traits for data access layer
//!
//! This module defines the repository interfaces that services use to
//! interact with storage. The original system bound to its two tables by
//! name at call time; here that is re-architected as injected traits so the
//! core logic never depends on a concrete backend.
//!
//! # Trait Hierarchy
//!
//! - Individual `*Repository` traits define the operations for each data
//!   domain (tokens, presence)
//! - Individual `*RepositoryProvider` traits provide access to each
//!   repository type
//! - [`RepositoryProvider`] is a supertrait combining both provider traits
//!   plus lifecycle methods
//!
//! Backends are free to satisfy the lookup operations with indexes instead
//! of full scans; external behavior is identical.

pub mod adapter;
pub mod presence;
pub mod token;

pub use adapter::{PresenceRepositoryAdapter, TokenRepositoryAdapter};
pub use presence::PresenceRepository;
pub use token::TokenRepository;

use async_trait::async_trait;

use crate::Error;

/// Provider trait for token repository access.
///
/// Implement this trait to provide token issuance and lookup functionality.
pub trait TokenRepositoryProvider: Send + Sync + 'static {
    /// The token repository implementation type
    type TokenRepo: TokenRepository;

    /// Get the token repository
    fn token(&self) -> &Self::TokenRepo;
}

/// Provider trait for presence repository access.
///
/// Implement this trait to provide check-in record functionality.
pub trait PresenceRepositoryProvider: Send + Sync + 'static {
    /// The presence repository implementation type
    type PresenceRepo: PresenceRepository;

    /// Get the presence repository
    fn presence(&self) -> &Self::PresenceRepo;
}

/// Provider trait that storage implementations must implement to provide
/// all repositories.
///
/// # Implementing a Custom Storage Backend
///
/// 1. Implement each individual `*Repository` trait for your backend
/// 2. Implement each individual `*RepositoryProvider` trait
/// 3. Implement the `RepositoryProvider` trait with `migrate()` and
///    `health_check()`
#[async_trait]
pub trait RepositoryProvider: TokenRepositoryProvider + PresenceRepositoryProvider {
    /// Run migrations for all repositories
    async fn migrate(&self) -> Result<(), Error>;

    /// Health check for all repositories
    async fn health_check(&self) -> Result<(), Error>;
}
