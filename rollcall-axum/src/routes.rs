use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use rollcall::Rollcall;
use rollcall_core::RepositoryProvider;

use crate::{
    error::{ApiError, Result},
    types::*,
};

/// Shared state for route handlers
pub struct AppState<R: RepositoryProvider> {
    pub rollcall: Arc<Rollcall<R>>,
}

// An absent body (or one that was never JSON to begin with) is a distinct
// condition from JSON that fails to parse; the latter surfaces with its
// cause message.
fn map_json_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::NoPostData,
        other => ApiError::ServerError(other.to_string()),
    }
}

impl<R: RepositoryProvider> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            rollcall: self.rollcall.clone(),
        }
    }
}

pub fn create_router<R>(rollcall: Arc<Rollcall<R>>) -> Router
where
    R: RepositoryProvider + 'static,
{
    let state = AppState { rollcall };

    Router::new()
        .route("/health", get(health_handler))
        .route("/tokens", post(issue_token_handler))
        .route("/checkins", post(checkin_handler))
        .route("/status", get(status_handler))
        .fallback(endpoint_not_found_handler)
        .method_not_allowed_fallback(endpoint_not_found_handler)
        .with_state(state)
}

async fn health_handler<R>(State(state): State<AppState<R>>) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    state.rollcall.health_check().await?;

    Ok(Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })))
}

async fn issue_token_handler<R>(
    State(state): State<AppState<R>>,
    payload: std::result::Result<Json<IssueTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let Json(payload) = payload.map_err(map_json_rejection)?;
    let course_id = text_or_empty(payload.course_id);
    let session_id = text_or_empty(payload.session_id);

    let issued = state.rollcall.issue_token(&course_id, &session_id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(issued))))
}

async fn checkin_handler<R>(
    State(state): State<AppState<R>>,
    payload: std::result::Result<Json<CheckinRequest>, JsonRejection>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let Json(payload) = payload.map_err(map_json_rejection)?;
    let user_id = text_or_empty(payload.user_id);
    let device_id = text_or_empty(payload.device_id);
    let course_id = text_or_empty(payload.course_id);
    let session_id = text_or_empty(payload.session_id);
    let token = text_or_empty(payload.token);

    let record = state
        .rollcall
        .check_in(&user_id, &device_id, &course_id, &session_id, &token)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CheckinResponse {
            presence_id: record.presence_id,
            status: record.status,
        })),
    ))
}

async fn status_handler<R>(
    State(state): State<AppState<R>>,
    Query(params): Query<StatusParams>,
) -> Result<impl IntoResponse>
where
    R: RepositoryProvider,
{
    let status = state
        .rollcall
        .status(
            params.user_id.as_deref().unwrap_or(""),
            params.course_id.as_deref().unwrap_or(""),
            params.session_id.as_deref().unwrap_or(""),
        )
        .await?;

    Ok(Json(ApiResponse::success(status)))
}

async fn endpoint_not_found_handler() -> ApiError {
    ApiError::EndpointNotFound
}
