use crate::{
    Error,
    presence::{AttendanceState, AttendanceStatus},
    repositories::PresenceRepository,
    validation::require_field,
};
use std::sync::Arc;

/// Service for attendance status lookups
pub struct StatusService<P: PresenceRepository> {
    repository: Arc<P>,
}

impl<P: PresenceRepository> StatusService<P> {
    /// Create a new StatusService with the given repository
    pub fn new(repository: Arc<P>) -> Self {
        Self { repository }
    }

    /// Look up the latest check-in for an identity within a course/session.
    ///
    /// Absence of a record is a successful answer (`NotCheckedIn`,
    /// `last_ts = None`), never an error. Echoed identifiers are the
    /// normalized forms.
    pub async fn status(
        &self,
        user_id: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<AttendanceStatus, Error> {
        let user_id = require_field("user_id", user_id)?;
        let course_id = require_field("course_id", course_id)?;
        let session_id = require_field("session_id", session_id)?;

        let record = self
            .repository
            .find_latest(&user_id, &course_id, &session_id)
            .await?;

        Ok(match record {
            Some(record) => AttendanceStatus {
                user_id,
                course_id,
                session_id,
                status: record.status.into(),
                last_ts: Some(record.timestamp),
            },
            None => AttendanceStatus {
                user_id,
                course_id,
                session_id,
                status: AttendanceState::NotCheckedIn,
                last_ts: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::presence::{PresenceId, PresenceRecord, PresenceStatus};
    use crate::token::TokenId;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::Mutex;

    /// Mock repository for testing
    struct MockPresenceRepository {
        records: Mutex<Vec<PresenceRecord>>,
    }

    impl MockPresenceRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
            }
        }

        fn seed(&self, user_id: &str, course_id: &str, session_id: &str, ts: DateTime<Utc>) {
            self.records.lock().unwrap().push(PresenceRecord {
                presence_id: PresenceId::generate(),
                user_id: user_id.to_string(),
                device_id: "D1".to_string(),
                course_id: course_id.to_string(),
                session_id: session_id.to_string(),
                token: TokenId::new("TKN-AAAAAA"),
                status: PresenceStatus::CheckedIn,
                timestamp: ts,
            });
        }
    }

    #[async_trait]
    impl PresenceRepository for MockPresenceRepository {
        async fn create(&self, record: PresenceRecord) -> Result<PresenceRecord, Error> {
            self.records.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn find_latest(
            &self,
            user_id: &str,
            course_id: &str,
            session_id: &str,
        ) -> Result<Option<PresenceRecord>, Error> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .rev()
                .find(|r| {
                    r.user_id == user_id
                        && r.course_id == course_id
                        && r.session_id == session_id
                })
                .cloned())
        }
    }

    #[tokio::test]
    async fn test_status_before_any_checkin() {
        let service = StatusService::new(Arc::new(MockPresenceRepository::new()));

        let status = service.status("U1", "C1", "S1").await.unwrap();
        assert_eq!(status.status, AttendanceState::NotCheckedIn);
        assert_eq!(status.last_ts, None);
        assert_eq!(status.user_id, "U1");
        assert_eq!(status.course_id, "C1");
        assert_eq!(status.session_id, "S1");
    }

    #[tokio::test]
    async fn test_status_after_checkin() {
        let repository = Arc::new(MockPresenceRepository::new());
        let ts = Utc::now();
        repository.seed("U1", "C1", "S1", ts);
        let service = StatusService::new(repository);

        let status = service.status("U1", "C1", "S1").await.unwrap();
        assert_eq!(status.status, AttendanceState::CheckedIn);
        assert_eq!(status.last_ts, Some(ts));
    }

    #[tokio::test]
    async fn test_status_returns_most_recent_record() {
        // The invariant forbids duplicates going through the service, but the
        // lookup is still defined as most-recently-appended-first.
        let repository = Arc::new(MockPresenceRepository::new());
        let older = Utc::now() - Duration::minutes(10);
        let newer = Utc::now();
        repository.seed("U1", "C1", "S1", older);
        repository.seed("U1", "C1", "S1", newer);
        let service = StatusService::new(repository);

        let status = service.status("U1", "C1", "S1").await.unwrap();
        assert_eq!(status.last_ts, Some(newer));
    }

    #[tokio::test]
    async fn test_status_normalizes_and_echoes_identifiers() {
        let repository = Arc::new(MockPresenceRepository::new());
        repository.seed("42", "C1", "S1", Utc::now());
        let service = StatusService::new(repository);

        // Whitespace-padded query matches the trimmed stored triple
        let status = service.status(" 42 ", "C1 ", " S1").await.unwrap();
        assert_eq!(status.status, AttendanceState::CheckedIn);
        assert_eq!(status.user_id, "42");
        assert_eq!(status.course_id, "C1");
        assert_eq!(status.session_id, "S1");
    }

    #[tokio::test]
    async fn test_status_scoped_to_session() {
        let repository = Arc::new(MockPresenceRepository::new());
        repository.seed("U1", "C1", "S1", Utc::now());
        let service = StatusService::new(repository);

        let status = service.status("U1", "C1", "S2").await.unwrap();
        assert_eq!(status.status, AttendanceState::NotCheckedIn);
        assert_eq!(status.last_ts, None);
    }

    #[tokio::test]
    async fn test_status_rejects_missing_fields() {
        let service = StatusService::new(Arc::new(MockPresenceRepository::new()));

        let err = service.status("", "C1", "S1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(name)) if name == "user_id"
        ));

        let err = service.status("U1", "  ", "S1").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(name)) if name == "course_id"
        ));

        let err = service.status("U1", "C1", "").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(name)) if name == "session_id"
        ));
    }
}
