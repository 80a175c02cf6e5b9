use crate::auth::AdminSession;
use crate::error::{ApiError, ErrorResponse};
use crate::models::{ContentUpdateRequest, SuccessResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// PUT /api/content/update handler - Create or replace one content value
///
/// Requires an admin bearer token. The token is checked before the body is
/// read, so rejected callers never reach storage.
#[utoipa::path(
    put,
    path = routes::CONTENT_UPDATE,
    request_body = ContentUpdateRequest,
    responses(
        (status = 200, description = "Content stored", body = SuccessResponse),
        (status = 400, description = "Empty key", body = ErrorResponse),
        (status = 401, description = "Missing, malformed or expired token", body = ErrorResponse),
        (status = 403, description = "Token is not for the admin identity", body = ErrorResponse),
        (status = 500, description = "Storage error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "content"
)]
pub async fn put_handler(
    State(state): State<AppState>,
    session: AdminSession,
    Json(request): Json<ContentUpdateRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    if request.key.is_empty() {
        return Err(ApiError::InvalidRequest("key must not be empty".to_string()));
    }

    let item = state
        .content
        .upsert(&request.key, &request.value, &session.identity)
        .await
        .map_err(|e| ApiError::storage("update content", e))?;

    tracing::info!("Content '{}' updated by {}", item.key, item.updated_by);
    Ok((
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: format!("Content '{}' updated successfully", item.key),
        }),
    ))
}
