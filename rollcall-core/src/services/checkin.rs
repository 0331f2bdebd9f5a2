use crate::{
    Error,
    error::{CheckinError, StorageError},
    presence::{PresenceId, PresenceRecord, PresenceStatus},
    repositories::{PresenceRepository, TokenRepository},
    token::TokenId,
    validation::require_field,
};
use chrono::Utc;
use std::sync::Arc;

/// Service for recording attendance against issued tokens.
///
/// This is where every invariant of the system is enforced: the validation
/// pipeline runs in order and short-circuits on the first failure, so a
/// rejected request performs no writes.
pub struct CheckinService<T: TokenRepository, P: PresenceRepository> {
    token_repository: Arc<T>,
    presence_repository: Arc<P>,
}

impl<T: TokenRepository, P: PresenceRepository> CheckinService<T, P> {
    /// Create a new CheckinService with the given repositories
    pub fn new(token_repository: Arc<T>, presence_repository: Arc<P>) -> Self {
        Self {
            token_repository,
            presence_repository,
        }
    }

    /// Validate a check-in request and append the presence record.
    ///
    /// Pipeline: field presence, token lookup scoped to the course/session
    /// it was issued under, expiry, duplicate suppression, commit. A token
    /// is not consumed by use; only the per-user duplicate rule limits
    /// repeat check-ins.
    pub async fn check_in(
        &self,
        user_id: &str,
        device_id: &str,
        course_id: &str,
        session_id: &str,
        token: &str,
    ) -> Result<PresenceRecord, Error> {
        let user_id = require_field("user_id", user_id)?;
        let device_id = require_field("device_id", device_id)?;
        let course_id = require_field("course_id", course_id)?;
        let session_id = require_field("session_id", session_id)?;
        let token = TokenId::from(require_field("token", token)?);

        let issued = self
            .token_repository
            .find_by_scope(&token, &course_id, &session_id)
            .await?
            .ok_or(Error::Checkin(CheckinError::TokenInvalid))?;

        if issued.is_expired() {
            tracing::debug!(token = %token, expires_at = %issued.expires_at, "rejected expired token");
            return Err(CheckinError::TokenExpired.into());
        }

        if self
            .presence_repository
            .find_latest(&user_id, &course_id, &session_id)
            .await?
            .is_some()
        {
            return Err(CheckinError::AlreadyCheckedIn.into());
        }

        let record = PresenceRecord {
            presence_id: PresenceId::generate(),
            user_id,
            device_id,
            course_id,
            session_id,
            token,
            status: PresenceStatus::CheckedIn,
            timestamp: Utc::now(),
        };

        // Two racing requests can both pass the duplicate scan above; the
        // storage uniqueness constraint decides the winner on commit.
        match self.presence_repository.create(record).await {
            Ok(record) => {
                tracing::debug!(
                    presence_id = %record.presence_id,
                    user_id = %record.user_id,
                    course_id = %record.course_id,
                    session_id = %record.session_id,
                    "recorded check-in"
                );
                Ok(record)
            }
            Err(Error::Storage(StorageError::Constraint(_))) => {
                Err(CheckinError::AlreadyCheckedIn.into())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::token::QrToken;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration};
    use std::sync::Mutex;

    /// Mock repositories for testing
    struct MockTokenRepository {
        tokens: Mutex<Vec<QrToken>>,
    }

    impl MockTokenRepository {
        fn new() -> Self {
            Self {
                tokens: Mutex::new(Vec::new()),
            }
        }

        fn seed(&self, token: &str, course_id: &str, session_id: &str, expires_at: DateTime<Utc>) {
            self.tokens.lock().unwrap().push(QrToken {
                token: TokenId::new(token),
                course_id: course_id.to_string(),
                session_id: session_id.to_string(),
                expires_at,
                issued_at: expires_at - Duration::minutes(5),
            });
        }
    }

    #[async_trait]
    impl TokenRepository for MockTokenRepository {
        async fn create(&self, token: QrToken) -> Result<QrToken, Error> {
            self.tokens.lock().unwrap().push(token.clone());
            Ok(token)
        }

        async fn find_by_scope(
            &self,
            token: &TokenId,
            course_id: &str,
            session_id: &str,
        ) -> Result<Option<QrToken>, Error> {
            let tokens = self.tokens.lock().unwrap();
            Ok(tokens
                .iter()
                .find(|t| {
                    &t.token == token && t.course_id == course_id && t.session_id == session_id
                })
                .cloned())
        }
    }

    struct MockPresenceRepository {
        records: Mutex<Vec<PresenceRecord>>,
        reject_with_constraint: bool,
    }

    impl MockPresenceRepository {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                reject_with_constraint: false,
            }
        }

        fn rejecting_inserts() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                reject_with_constraint: true,
            }
        }
    }

    #[async_trait]
    impl PresenceRepository for MockPresenceRepository {
        async fn create(&self, record: PresenceRecord) -> Result<PresenceRecord, Error> {
            if self.reject_with_constraint {
                return Err(Error::Storage(StorageError::Constraint(
                    "UNIQUE constraint failed: presence.user_id, presence.course_id, presence.session_id".to_string(),
                )));
            }
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

    fn service_with(
        tokens: MockTokenRepository,
        presence: MockPresenceRepository,
    ) -> (
        CheckinService<MockTokenRepository, MockPresenceRepository>,
        Arc<MockTokenRepository>,
        Arc<MockPresenceRepository>,
    ) {
        let tokens = Arc::new(tokens);
        let presence = Arc::new(presence);
        (
            CheckinService::new(tokens.clone(), presence.clone()),
            tokens,
            presence,
        )
    }

    #[tokio::test]
    async fn test_successful_checkin() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, presence) = service_with(tokens, MockPresenceRepository::new());

        let record = service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap();

        assert!(record.presence_id.as_str().starts_with("PR-"));
        assert_eq!(record.presence_id.as_str().len(), "PR-".len() + 8);
        assert_eq!(record.status, PresenceStatus::CheckedIn);
        assert_eq!(record.token, TokenId::new("TKN-AAAAAA"));
        assert_eq!(presence.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_fields_short_circuit() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, presence) = service_with(tokens, MockPresenceRepository::new());

        for (user, device, course, session, token, expected) in [
            ("", "D1", "C1", "S1", "TKN-AAAAAA", "user_id"),
            ("U1", "  ", "C1", "S1", "TKN-AAAAAA", "device_id"),
            ("U1", "D1", "", "S1", "TKN-AAAAAA", "course_id"),
            ("U1", "D1", "C1", "", "TKN-AAAAAA", "session_id"),
            ("U1", "D1", "C1", "S1", "", "token"),
        ] {
            let err = service
                .check_in(user, device, course, session, token)
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::Validation(ValidationError::MissingField(ref name)) if name == expected
                ),
                "expected missing {expected}"
            );
        }

        // No writes happened
        assert!(presence.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_token_is_invalid() {
        let (service, _, _) =
            service_with(MockTokenRepository::new(), MockPresenceRepository::new());

        let err = service
            .check_in("U1", "D1", "C1", "S1", "TKN-ZZZZZZ")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_token_is_scoped_to_its_session() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, _) = service_with(tokens, MockPresenceRepository::new());

        // Same token string, different session: not valid there
        let err = service
            .check_in("U1", "D1", "C1", "S2", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::TokenInvalid)));
    }

    #[tokio::test]
    async fn test_expired_token_is_rejected() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() - Duration::milliseconds(1));
        let (service, _, presence) = service_with(tokens, MockPresenceRepository::new());

        let err = service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::TokenExpired)));
        assert!(presence.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_checkin_is_rejected() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, presence) = service_with(tokens, MockPresenceRepository::new());

        service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap();

        // Identical resubmission
        let err = service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::AlreadyCheckedIn)));

        // Different device, same identity: still a duplicate
        let err = service
            .check_in("U1", "D2", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::AlreadyCheckedIn)));

        // Whitespace-padded resubmission normalizes to the same triple
        let err = service
            .check_in(" U1 ", "D1", " C1", "S1 ", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::AlreadyCheckedIn)));

        assert_eq!(presence.records.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_token_not_consumed_by_use() {
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, presence) = service_with(tokens, MockPresenceRepository::new());

        service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap();

        // A second user can check in with the same token
        service
            .check_in("U2", "D2", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap();

        assert_eq!(presence.records.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_constraint_violation_maps_to_already_checked_in() {
        // The duplicate scan sees nothing, but the commit hits the storage
        // uniqueness constraint (the racing-writer case).
        let tokens = MockTokenRepository::new();
        tokens.seed("TKN-AAAAAA", "C1", "S1", Utc::now() + Duration::minutes(5));
        let (service, _, _) = service_with(tokens, MockPresenceRepository::rejecting_inserts());

        let err = service
            .check_in("U1", "D1", "C1", "S1", "TKN-AAAAAA")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Checkin(CheckinError::AlreadyCheckedIn)));
    }
}
