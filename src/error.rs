use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps authentication and storage failures to HTTP status codes and
/// formats them as JSON `{"error": ...}` bodies.
#[derive(Debug)]
pub enum ApiError {
    /// Login with the wrong email or password
    InvalidCredentials,
    /// Missing, malformed, badly signed or expired bearer token
    InvalidToken,
    /// Token is valid but its principal may not edit content
    Forbidden,
    /// Request body is well-formed JSON but semantically unusable
    InvalidRequest(String),
    /// Storage layer failed; `action` names what the caller was doing
    StorageUnavailable {
        action: &'static str,
        source: anyhow::Error,
    },
    /// Unexpected server-side failure
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Invalid or missing token".to_string(),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                "Not authorized to modify content".to_string(),
            ),
            ApiError::InvalidRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid request: {}", msg),
            ),
            ApiError::StorageUnavailable { action, source } => {
                // Details stay in the server log; clients get a generic message.
                tracing::error!("Storage error while trying to {}: {:#}", action, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to {}", action),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            // Expiry is deliberately indistinguishable from a bad token.
            AuthError::InvalidToken | AuthError::Expired => ApiError::InvalidToken,
            AuthError::Unauthorized => ApiError::Forbidden,
            AuthError::Signing(msg) => ApiError::Internal(msg),
        }
    }
}

impl ApiError {
    pub fn storage(action: &'static str, source: anyhow::Error) -> Self {
        ApiError::StorageUnavailable { action, source }
    }
}
