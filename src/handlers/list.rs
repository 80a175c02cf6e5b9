use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use std::collections::BTreeMap;

/// GET /api/content handler - All content as a `{key: value}` object
///
/// Always answers 200. If storage is unreachable the object is empty.
#[utoipa::path(
    get,
    path = routes::CONTENT,
    responses(
        (status = 200, description = "Every stored content value keyed by content key", body = BTreeMap<String, String>)
    ),
    tag = "content"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<BTreeMap<String, String>>) {
    let content = state.content.get_all().await;

    tracing::info!("Listed {} content entries", content.len());

    (StatusCode::OK, Json(content))
}
