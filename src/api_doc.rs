use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{
    ContactForm, ContentUpdateRequest, ContentValueResponse, LoginRequest, LoginResponse,
    RootResponse, StatusCheckCreate, StatusCheckResponse, SuccessResponse,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "site-content-api",
        version = "1.0.0",
        description = "Editable marketing-site content with a single admin editor"
    ),
    paths(
        handlers::health::root_handler,
        handlers::health::health_handler,
        handlers::login::login_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::put::put_handler,
        handlers::status::create_status_handler,
        handlers::status::list_status_handler,
        handlers::forms::contact_handler,
        handlers::forms::demo_handler
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            ContentUpdateRequest,
            ContentValueResponse,
            SuccessResponse,
            RootResponse,
            StatusCheckCreate,
            StatusCheckResponse,
            ContactForm,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health", description = "Service probes"),
        (name = "auth", description = "Admin login"),
        (name = "content", description = "Site content key-value store"),
        (name = "status", description = "Client status checks"),
        (name = "forms", description = "Contact and demo form relays")
    )
)]
pub struct ApiDoc;

/// Registers the `bearer_auth` scheme referenced by protected routes
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
