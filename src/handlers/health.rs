use crate::error::{HealthResponse, UnhealthyResponse};
use crate::models::RootResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/ handler - Identify the service
#[utoipa::path(
    get,
    path = routes::ROOT,
    responses(
        (status = 200, description = "Service banner", body = RootResponse)
    ),
    tag = "health"
)]
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Site content API".to_string(),
    })
}

/// GET /api/health handler - Health check endpoint
///
/// Runs a trivial query against the storage backend.
/// Returns 200 OK if it answers, 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.store.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                    message: "Site content API is running".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: "Cannot connect to database".to_string(),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialVerifier;
    use crate::config::tests::test_config;
    use crate::state::tests::{json_body, test_state};
    use crate::store::tests::UnreachableStore;
    use axum::{body::Body, http::Request, routing::get, Router};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_for(state: AppState) -> Router {
        Router::new()
            .route(routes::ROOT, get(root_handler))
            .route(routes::HEALTH, get(health_handler))
            .with_state(state)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (state, _) = test_state();

        let response = app_for(state).oneshot(get_request("/api/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: RootResponse = json_body(response).await;
        assert_eq!(body.message, "Site content API");
    }

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let (state, _) = test_state();

        let response = app_for(state).oneshot(get_request("/api/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = json_body(response).await;
        assert_eq!(body.status, "healthy");
        assert_eq!(body.message, "Site content API is running");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let verifier = CredentialVerifier::from_config(&test_config());
        let state = AppState::new(Arc::new(UnreachableStore), verifier);

        let response = app_for(state).oneshot(get_request("/api/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: UnhealthyResponse = json_body(response).await;
        assert_eq!(body.status, "unhealthy");
        assert!(body.error.contains("database"));
    }
}
