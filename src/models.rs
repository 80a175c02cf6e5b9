use serde::{Deserialize, Serialize};

/// Admin login request body
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response type for a successful login
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub message: String,
}

/// Request body for the content update endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContentUpdateRequest {
    pub key: String,
    pub value: String,
}

/// Response type for single-key content lookups
///
/// `value` is `null` when nothing has been stored under `key`.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContentValueResponse {
    pub key: String,
    pub value: Option<String>,
}

/// Generic acknowledgement for mutations and form submissions
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Response type for the API root
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct StatusCheckResponse {
    pub id: String,
    pub client_name: String,
    pub timestamp: String,
}

/// Contact form submission; relayed to the log only
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub message: String,
}
