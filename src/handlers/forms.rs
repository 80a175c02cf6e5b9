use crate::models::{ContactForm, SuccessResponse};
use crate::routes;
use axum::{http::StatusCode, Json};
use serde_json::{Map, Value as JsonValue};

/// POST /api/contact handler - Accept a contact form submission
///
/// Nothing is stored; the submission is written to the log for relay.
#[utoipa::path(
    post,
    path = routes::CONTACT,
    request_body = ContactForm,
    responses(
        (status = 200, description = "Submission accepted", body = SuccessResponse)
    ),
    tag = "forms"
)]
pub async fn contact_handler(Json(form): Json<ContactForm>) -> (StatusCode, Json<SuccessResponse>) {
    tracing::info!(
        name = %form.name,
        email = %form.email,
        phone = %form.phone,
        message_len = form.message.len(),
        "Contact form submitted"
    );

    (
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Contact form submitted successfully".to_string(),
        }),
    )
}

/// POST /api/demo handler - Accept a demo booking request
///
/// The booking is free-form JSON and is only logged.
#[utoipa::path(
    post,
    path = routes::DEMO,
    request_body = serde_json::Value,
    responses(
        (status = 200, description = "Booking accepted", body = SuccessResponse)
    ),
    tag = "forms"
)]
pub async fn demo_handler(
    Json(booking): Json<Map<String, JsonValue>>,
) -> (StatusCode, Json<SuccessResponse>) {
    tracing::info!("Demo booking: {}", JsonValue::Object(booking));

    (
        StatusCode::OK,
        Json(SuccessResponse {
            success: true,
            message: "Demo booking submitted successfully".to_string(),
        }),
    )
}
