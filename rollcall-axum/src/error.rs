use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use rollcall_core::error::{CheckinError, StorageError, ValidationError};

use crate::types::ApiResponse;

/// Caller-facing error codes.
///
/// The `Display` string of each variant is the wire code carried in the
/// envelope's `error` field.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing_field: {0}")]
    MissingField(String),

    #[error("no_post_data")]
    NoPostData,

    #[error("token_invalid")]
    TokenInvalid,

    #[error("token_expired")]
    TokenExpired,

    #[error("already_checked_in")]
    AlreadyCheckedIn,

    #[error("endpoint_not_found")]
    EndpointNotFound,

    #[error("storage_unavailable: {0}")]
    StorageUnavailable(String),

    #[error("server_error: {0}")]
    ServerError(String),
}

impl From<rollcall_core::Error> for ApiError {
    fn from(err: rollcall_core::Error) -> Self {
        match err {
            rollcall_core::Error::Validation(ValidationError::MissingField(name)) => {
                ApiError::MissingField(name)
            }
            rollcall_core::Error::Checkin(CheckinError::TokenInvalid) => ApiError::TokenInvalid,
            rollcall_core::Error::Checkin(CheckinError::TokenExpired) => ApiError::TokenExpired,
            rollcall_core::Error::Checkin(CheckinError::AlreadyCheckedIn) => {
                ApiError::AlreadyCheckedIn
            }
            rollcall_core::Error::Storage(StorageError::Unavailable(detail)) => {
                ApiError::StorageUnavailable(detail)
            }
            // Anything not enumerated above is unexpected; keep the cause
            // message for diagnostics.
            other => ApiError::ServerError(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::MissingField(_) | ApiError::NoPostData => StatusCode::BAD_REQUEST,
            ApiError::TokenInvalid | ApiError::TokenExpired => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::AlreadyCheckedIn => StatusCode::CONFLICT,
            ApiError::EndpointNotFound => StatusCode::NOT_FOUND,
            ApiError::StorageUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
