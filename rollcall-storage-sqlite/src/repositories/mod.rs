//! Repository implementations for SQLite storage

pub mod presence;
pub mod token;

pub use presence::SqlitePresenceRepository;
pub use token::SqliteTokenRepository;

use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;
use rollcall_core::{
    Error,
    error::StorageError,
    repositories::{PresenceRepositoryProvider, RepositoryProvider, TokenRepositoryProvider},
};

/// Repository provider implementation for SQLite
///
/// This struct implements the individual repository provider traits as well
/// as the unified `RepositoryProvider` trait.
pub struct SqliteRepositoryProvider {
    pool: SqlitePool,
    token: Arc<SqliteTokenRepository>,
    presence: Arc<SqlitePresenceRepository>,
}

impl SqliteRepositoryProvider {
    pub fn new(pool: SqlitePool) -> Self {
        let token = Arc::new(SqliteTokenRepository::new(pool.clone()));
        let presence = Arc::new(SqlitePresenceRepository::new(pool.clone()));

        Self {
            pool,
            token,
            presence,
        }
    }

    /// Connect to a SQLite database and build a provider around the pool
    pub async fn connect(url: &str) -> Result<Self, Error> {
        let pool = SqlitePool::connect(url)
            .await
            .map_err(|e| Error::Storage(StorageError::Connection(e.to_string())))?;
        Ok(Self::new(pool))
    }
}

// Implement individual provider traits

impl TokenRepositoryProvider for SqliteRepositoryProvider {
    type TokenRepo = SqliteTokenRepository;

    fn token(&self) -> &Self::TokenRepo {
        &self.token
    }
}

impl PresenceRepositoryProvider for SqliteRepositoryProvider {
    type PresenceRepo = SqlitePresenceRepository;

    fn presence(&self) -> &Self::PresenceRepo {
        &self.presence
    }
}

// Implement the unified RepositoryProvider trait

#[async_trait]
impl RepositoryProvider for SqliteRepositoryProvider {
    async fn migrate(&self) -> Result<(), Error> {
        use crate::migrations::{
            CreateIndexes, CreatePresenceTable, CreateTokensTable, SqliteMigrationManager,
        };
        use rollcall_migration::{Migration, MigrationManager};

        let manager = SqliteMigrationManager::new(self.pool.clone());
        manager.initialize().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to initialize migrations");
            Error::Storage(StorageError::Migration(
                "Failed to initialize migrations".to_string(),
            ))
        })?;

        let migrations: Vec<Box<dyn Migration<_>>> = vec![
            Box::new(CreateTokensTable),
            Box::new(CreatePresenceTable),
            Box::new(CreateIndexes),
        ];
        manager.up(&migrations).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            Error::Storage(StorageError::Migration(
                "Failed to run migrations".to_string(),
            ))
        })?;

        Ok(())
    }

    async fn health_check(&self) -> Result<(), Error> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| Error::Storage(StorageError::Unavailable(e.to_string())))?;
        Ok(())
    }
}
