use crate::{
    Error,
    presence::PresenceRecord,
    repositories::{PresenceRepository, RepositoryProvider, TokenRepository},
    token::{QrToken, TokenId},
};
use async_trait::async_trait;
use std::sync::Arc;

/// Adapter that wraps a RepositoryProvider and implements the token
/// repository trait
pub struct TokenRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> TokenRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> TokenRepository for TokenRepositoryAdapter<R> {
    async fn create(&self, token: QrToken) -> Result<QrToken, Error> {
        self.provider.token().create(token).await
    }

    async fn find_by_scope(
        &self,
        token: &TokenId,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<QrToken>, Error> {
        self.provider
            .token()
            .find_by_scope(token, course_id, session_id)
            .await
    }
}

pub struct PresenceRepositoryAdapter<R: RepositoryProvider> {
    provider: Arc<R>,
}

impl<R: RepositoryProvider> PresenceRepositoryAdapter<R> {
    pub fn new(provider: Arc<R>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<R: RepositoryProvider> PresenceRepository for PresenceRepositoryAdapter<R> {
    async fn create(&self, record: PresenceRecord) -> Result<PresenceRecord, Error> {
        self.provider.presence().create(record).await
    }

    async fn find_latest(
        &self,
        user_id: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<PresenceRecord>, Error> {
        self.provider
            .presence()
            .find_latest(user_id, course_id, session_id)
            .await
    }
}
