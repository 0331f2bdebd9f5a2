use crate::{Error, presence::PresenceRecord};
use async_trait::async_trait;

/// Repository for presence record data access
#[async_trait]
pub trait PresenceRepository: Send + Sync + 'static {
    /// Append a completed check-in.
    ///
    /// Backends that enforce the one-record-per-(user, course, session)
    /// invariant at the storage layer return `StorageError::Constraint` when
    /// the append would violate it; the check-in service maps that to a
    /// duplicate rejection.
    async fn create(&self, record: PresenceRecord) -> Result<PresenceRecord, Error>;

    /// Find the most recently appended record for the given triple.
    ///
    /// Inputs are expected pre-normalized (trimmed); stored columns hold
    /// trimmed text, so the comparison is plain equality.
    async fn find_latest(
        &self,
        user_id: &str,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<PresenceRecord>, Error>;
}
