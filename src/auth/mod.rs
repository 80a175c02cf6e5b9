//! Admin authentication: login, token verification and the request guard.

pub mod extractor;
pub mod jwt;
pub mod verifier;

pub use extractor::AdminSession;
pub use verifier::CredentialVerifier;

/// Authentication failures.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing, malformed or wrongly signed token.
    #[error("Invalid or missing token")]
    InvalidToken,

    /// Well-signed token past its `exp`.
    #[error("Token expired")]
    Expired,

    /// Valid token for a principal that may not edit content.
    #[error("Not authorized to modify content")]
    Unauthorized,

    #[error("Token signing failed: {0}")]
    Signing(String),
}
