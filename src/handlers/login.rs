use crate::error::{ApiError, ErrorResponse};
use crate::models::{LoginRequest, LoginResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /api/auth/login handler - Exchange admin credentials for a token
#[utoipa::path(
    post,
    path = routes::LOGIN,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed session token", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login_handler(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let token = state
        .verifier
        .login(&request.email, &request.password)
        .inspect_err(|_| tracing::info!("Rejected admin login attempt"))?;

    tracing::info!("Admin logged in: {}", request.email);
    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            token,
            message: "Login successful".to_string(),
        }),
    ))
}
