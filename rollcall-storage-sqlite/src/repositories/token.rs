use async_trait::async_trait;
use chrono::DateTime;
use rollcall_core::{
    Error,
    error::StorageError,
    repositories::TokenRepository,
    token::{QrToken, TokenId},
};
use sqlx::SqlitePool;

pub struct SqliteTokenRepository {
    pool: SqlitePool,
}

impl SqliteTokenRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

// Timestamps are stored as unix milliseconds: the expiry boundary is strict,
// so second granularity would fold the first second past expiry into the
// valid window.
#[derive(Debug, Clone, sqlx::FromRow)]
struct SqliteToken {
    token: String,
    course_id: String,
    session_id: String,
    expires_at: i64,
    issued_at: i64,
}

impl SqliteToken {
    fn into_token(self) -> Result<QrToken, Error> {
        Ok(QrToken {
            token: TokenId::from(self.token),
            course_id: self.course_id,
            session_id: self.session_id,
            expires_at: DateTime::from_timestamp_millis(self.expires_at).ok_or_else(|| {
                Error::Storage(StorageError::Database(format!(
                    "invalid expires_at timestamp: {}",
                    self.expires_at
                )))
            })?,
            issued_at: DateTime::from_timestamp_millis(self.issued_at).ok_or_else(|| {
                Error::Storage(StorageError::Database(format!(
                    "invalid issued_at timestamp: {}",
                    self.issued_at
                )))
            })?,
        })
    }
}

#[async_trait]
impl TokenRepository for SqliteTokenRepository {
    async fn create(&self, token: QrToken) -> Result<QrToken, Error> {
        sqlx::query(
            r#"
            INSERT INTO tokens (token, course_id, session_id, expires_at, issued_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(token.token.as_str())
        .bind(&token.course_id)
        .bind(&token.session_id)
        .bind(token.expires_at.timestamp_millis())
        .bind(token.issued_at.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        Ok(token)
    }

    async fn find_by_scope(
        &self,
        token: &TokenId,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<QrToken>, Error> {
        // Oldest appended row wins when identical tuples exist
        let row = sqlx::query_as::<_, SqliteToken>(
            r#"
            SELECT token, course_id, session_id, expires_at, issued_at
            FROM tokens
            WHERE token = ?1 AND course_id = ?2 AND session_id = ?3
            ORDER BY rowid ASC
            LIMIT 1
            "#,
        )
        .bind(token.as_str())
        .bind(course_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        row.map(SqliteToken::into_token).transpose()
    }
}
