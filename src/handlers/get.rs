use crate::models::ContentValueResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// GET /api/content/{key} handler - Look up one content value
///
/// Unknown keys are not an error: the response carries `"value": null`.
#[utoipa::path(
    get,
    path = routes::CONTENT_ITEM,
    params(
        ("key" = String, Path, description = "Content key, case-sensitive")
    ),
    responses(
        (status = 200, description = "Stored value, or null when absent", body = ContentValueResponse)
    ),
    tag = "content"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<ContentValueResponse>) {
    let value = state.content.get_by_key(&key).await;
    if value.is_none() {
        tracing::debug!("No content stored for key: {}", key);
    }

    (StatusCode::OK, Json(ContentValueResponse { key, value }))
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

    fn get_request(key: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(format!("/api/content/{}", key))
            .body(Body::empty())
            .unwrap()
    }

    fn app_for(state: AppState) -> Router {
        Router::new()
            .route(routes::CONTENT_ITEM, get(get_handler))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_get_stored_value() {
        let (state, _) = test_state();
        state
            .content
            .upsert("platform_name", "Example Platform", "admin@example.com")
            .await
            .unwrap();

        let response = app_for(state).oneshot(get_request("platform_name")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ContentValueResponse = json_body(response).await;
        assert_eq!(body.key, "platform_name");
        assert_eq!(body.value.as_deref(), Some("Example Platform"));
    }

    #[tokio::test]
    async fn test_get_unknown_key_is_null() {
        let (state, _) = test_state();

        let response = app_for(state).oneshot(get_request("never_written")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = json_body(response).await;
        assert_eq!(body, serde_json::json!({"key": "never_written", "value": null}));
    }

    #[tokio::test]
    async fn test_get_degrades_when_store_unreachable() {
        let verifier = CredentialVerifier::from_config(&test_config());
        let state = AppState::new(Arc::new(UnreachableStore), verifier);

        let response = app_for(state).oneshot(get_request("site_title")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: ContentValueResponse = json_body(response).await;
        assert_eq!(body.value, None);
    }
}
