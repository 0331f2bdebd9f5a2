use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Check-in error: {0}")]
    Checkin(#[from] CheckinError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum CheckinError {
    #[error("Token invalid")]
    TokenInvalid,

    #[error("Token expired")]
    TokenExpired,

    #[error("Already checked in")]
    AlreadyCheckedIn,
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid field: {0}")]
    InvalidField(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Record not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl Error {
    /// True for the caller-facing check-in rejections (invalid, expired,
    /// duplicate), as opposed to validation or storage failures.
    pub fn is_checkin_rejection(&self) -> bool {
        matches!(
            self,
            Error::Checkin(CheckinError::TokenInvalid)
                | Error::Checkin(CheckinError::TokenExpired)
                | Error::Checkin(CheckinError::AlreadyCheckedIn)
        )
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::Validation(ValidationError::MissingField(_))
                | Error::Validation(ValidationError::InvalidField(_))
        )
    }

    pub fn is_storage_error(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}
