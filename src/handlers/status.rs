use crate::error::{ApiError, ErrorResponse};
use crate::models::{StatusCheckCreate, StatusCheckResponse};
use crate::routes;
use crate::state::AppState;
use crate::store::StatusCheck;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

/// Most status checks returned by one listing
const STATUS_LIST_LIMIT: usize = 1000;

impl From<StatusCheck> for StatusCheckResponse {
    fn from(check: StatusCheck) -> Self {
        StatusCheckResponse {
            id: check.id,
            client_name: check.client_name,
            timestamp: check.timestamp.to_rfc3339(),
        }
    }
}

/// POST /api/status handler - Record a client status check
#[utoipa::path(
    post,
    path = routes::STATUS,
    request_body = StatusCheckCreate,
    responses(
        (status = 200, description = "Status check recorded", body = StatusCheckResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "status"
)]
pub async fn create_status_handler(
    State(state): State<AppState>,
    Json(request): Json<StatusCheckCreate>,
) -> Result<(StatusCode, Json<StatusCheckResponse>), ApiError> {
    let check = StatusCheck {
        id: Uuid::new_v4().to_string(),
        client_name: request.client_name,
        timestamp: Utc::now(),
    };

    state
        .store
        .insert_status_check(&check)
        .await
        .map_err(|e| ApiError::storage("record status check", e))?;

    tracing::info!("Recorded status check {} from {}", check.id, check.client_name);
    Ok((StatusCode::OK, Json(check.into())))
}

/// GET /api/status handler - List recorded status checks, newest first
#[utoipa::path(
    get,
    path = routes::STATUS,
    responses(
        (status = 200, description = "Recorded status checks", body = [StatusCheckResponse]),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    tag = "status"
)]
pub async fn list_status_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<StatusCheckResponse>>), ApiError> {
    let checks = state
        .store
        .list_status_checks(STATUS_LIST_LIMIT)
        .await
        .map_err(|e| ApiError::storage("list status checks", e))?;

    tracing::debug!("Listed {} status checks", checks.len());
    Ok((
        StatusCode::OK,
        Json(checks.into_iter().map(Into::into).collect()),
    ))
}
