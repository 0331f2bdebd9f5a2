use crate::{
    Error,
    repositories::TokenRepository,
    token::{IssuedToken, QrToken, TokenId},
    validation::require_field,
};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Service for issuing QR check-in tokens
pub struct TokenService<T: TokenRepository> {
    repository: Arc<T>,
}

impl<T: TokenRepository> TokenService<T> {
    /// Create a new TokenService with the given repository
    pub fn new(repository: Arc<T>) -> Self {
        Self { repository }
    }

    /// Issue a new token scoped to a course/session pair.
    ///
    /// `issued_at` comes from the server clock; callers never supply
    /// timestamps. The issued-at instant is stored but not returned.
    pub async fn issue(
        &self,
        course_id: &str,
        session_id: &str,
        expires_in: Duration,
    ) -> Result<IssuedToken, Error> {
        let course_id = require_field("course_id", course_id)?;
        let session_id = require_field("session_id", session_id)?;

        let now = Utc::now();
        let token = QrToken {
            token: TokenId::generate(),
            course_id,
            session_id,
            expires_at: now + expires_in,
            issued_at: now,
        };

        let token = self.repository.create(token).await?;
        tracing::debug!(
            token = %token.token,
            course_id = %token.course_id,
            session_id = %token.session_id,
            expires_at = %token.expires_at,
            "issued check-in token"
        );

        Ok(IssuedToken {
            token: token.token,
            expires_at: token.expires_at,
        })
    }
}
