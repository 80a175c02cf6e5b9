// Route path constants - single source of truth for all API paths

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const ROOT: &str = "/api/";
pub const HEALTH: &str = "/api/health";
pub const LOGIN: &str = "/api/auth/login";
pub const CONTENT: &str = "/api/content";
pub const CONTENT_UPDATE: &str = "/api/content/update";
pub const CONTENT_ITEM: &str = "/api/content/{key}";
pub const STATUS: &str = "/api/status";
pub const CONTACT: &str = "/api/contact";
pub const DEMO: &str = "/api/demo";

pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the full application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(ROOT, get(handlers::root_handler))
        .route(HEALTH, get(handlers::health_handler))
        .route(LOGIN, post(handlers::login_handler))
        .route(CONTENT, get(handlers::list_handler))
        // Static segment wins over `{key}`, so "update" is never read as a key.
        .route(CONTENT_UPDATE, put(handlers::put_handler))
        .route(CONTENT_ITEM, get(handlers::get_handler))
        .route(
            STATUS,
            post(handlers::create_status_handler).get(handlers::list_status_handler),
        )
        .route(CONTACT, post(handlers::contact_handler))
        .route(DEMO, post(handlers::demo_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
