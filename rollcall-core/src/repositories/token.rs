use crate::{
    Error,
    token::{QrToken, TokenId},
};
use async_trait::async_trait;

/// Repository for issued QR token data access
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Append a newly issued token.
    ///
    /// Tokens are write-once; no update or delete operations exist, and no
    /// uniqueness probe against existing identifiers is performed.
    async fn create(&self, token: QrToken) -> Result<QrToken, Error>;

    /// Find a token by identifier within its issuing course/session scope.
    ///
    /// A token is only valid for the scope it was issued under, so all three
    /// values participate in the match. If several identical tuples exist the
    /// oldest appended row wins.
    async fn find_by_scope(
        &self,
        token: &TokenId,
        course_id: &str,
        session_id: &str,
    ) -> Result<Option<QrToken>, Error>;
}
