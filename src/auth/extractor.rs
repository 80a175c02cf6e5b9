use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use super::AuthError;
use crate::error::ApiError;
use crate::state::AppState;

/// Verified admin principal for a request.
///
/// Extracts the `Authorization: Bearer {token}` header and checks it with the
/// [`CredentialVerifier`](super::CredentialVerifier). Handlers that take this
/// extractor never run for unauthenticated callers.
pub struct AdminSession {
    pub identity: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or(AuthError::InvalidToken)?;

        let identity = state.verifier.verify(token).inspect_err(|e| {
            tracing::info!("Rejected admin token: {}", e);
        })?;

        Ok(AdminSession { identity })
    }
}

/// Pull the token out of a `Bearer` authorization value
fn bearer_token(raw: &str) -> Option<&str> {
    let (scheme, rest) = raw.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = rest.trim();
    if token.is_empty() {
        return None;
    }

    Some(token)
}
