use async_trait::async_trait;
use chrono::DateTime;
use rollcall_core::{
    Error,
    error::StorageError,
    presence::{PresenceId, PresenceRecord, PresenceStatus},
    repositories::PresenceRepository,
    token::TokenId,
};
use sqlx::SqlitePool;

pub struct SqlitePresenceRepository {
    pool: SqlitePool,
}

impl SqlitePresenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct SqlitePresence {
    presence_id: String,
    user_id: String,
    device_id: String,
    course_id: String,
    session_id: String,
    token: String,
    status: String,
    timestamp: i64,
}

impl SqlitePresence {
    fn into_record(self) -> Result<PresenceRecord, Error> {
        Ok(PresenceRecord {
            presence_id: PresenceId::from(self.presence_id),
            user_id: self.user_id,
            device_id: self.device_id,
            course_id: self.course_id,
            session_id: self.session_id,
            token: TokenId::from(self.token),
            status: self
                .status
                .parse::<PresenceStatus>()
                .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?,
            timestamp: DateTime::from_timestamp_millis(self.timestamp).ok_or_else(|| {
                Error::Storage(StorageError::Database(format!(
                    "invalid timestamp: {}",
                    self.timestamp
                )))
            })?,
        })
    }
}

fn map_insert_error(e: sqlx::Error) -> Error {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Storage(StorageError::Constraint(db_err.message().to_string()))
        }
        _ => Error::Storage(StorageError::Database(e.to_string())),
    }
}

#[async_trait]
impl PresenceRepository for SqlitePresenceRepository {
    async fn create(&self, record: PresenceRecord) -> Result<PresenceRecord, Error> {
        sqlx::query(
            r#"
            INSERT INTO presence (presence_id, user_id, device_id, course_id, session_id, token, status, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(record.presence_id.as_str())
        .bind(&record.user_id)
        .bind(&record.device_id)
        .bind(&record.course_id)
        .bind(&record.session_id)
        .bind(record.token.as_str())
        .bind(record.status.as_str())
        .bind(record.timestamp.timestamp_millis())
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(record)
    }

    async fn find_latest(
        &self,
        user_id: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<PresenceRecord>, Error> {
        let row = sqlx::query_as::<_, SqlitePresence>(
            r#"
            SELECT presence_id, user_id, device_id, course_id, session_id, token, status, timestamp
            FROM presence
            WHERE user_id = ?1 AND course_id = ?2 AND session_id = ?3
            ORDER BY rowid DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Error::Storage(StorageError::Database(e.to_string())))?;

        row.map(SqlitePresence::into_record).transpose()
    }
}
