//! Minimal HS256 JWT utilities.
//!
//! Only JSON objects are accepted for header and payload. Segments are
//! base64url WITHOUT padding, and the signature is checked with
//! `Hmac::verify_slice` (constant time).

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::AuthError;

#[derive(Debug, Serialize, Deserialize)]
struct JwtHeader {
    alg: String,
    typ: String,
}

fn b64url_encode(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

fn b64url_decode(s: &str) -> Result<Vec<u8>, AuthError> {
    URL_SAFE_NO_PAD
        .decode(s.as_bytes())
        .map_err(|_| AuthError::InvalidToken)
}

fn mac_for(secret: &[u8], signing_input: &str) -> Result<Hmac<Sha256>, AuthError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret)
        .map_err(|e| AuthError::Signing(format!("Invalid HMAC key: {e}")))?;
    mac.update(signing_input.as_bytes());
    Ok(mac)
}

/// Encode claims as an HS256-signed JWT.
pub fn encode_hs256<T: Serialize>(secret: &[u8], claims: &T) -> Result<String, AuthError> {
    let header = JwtHeader {
        alg: "HS256".to_string(),
        typ: "JWT".to_string(),
    };

    let header_json = serde_json::to_vec(&header)
        .map_err(|e| AuthError::Signing(format!("Failed to serialize JWT header: {e}")))?;
    let claims_json = serde_json::to_vec(claims)
        .map_err(|e| AuthError::Signing(format!("Failed to serialize JWT claims: {e}")))?;

    let signing_input = format!("{}.{}", b64url_encode(&header_json), b64url_encode(&claims_json));
    let signature = mac_for(secret, &signing_input)?.finalize().into_bytes();

    Ok(format!("{signing_input}.{}", b64url_encode(&signature)))
}

/// Decode an HS256 JWT and verify its signature.
///
/// Claims such as `exp` are not validated here; callers must do that.
pub fn decode_hs256<T: DeserializeOwned>(secret: &[u8], token: &str) -> Result<T, AuthError> {
    let mut parts = token.trim().split('.');
    let (Some(header_b64), Some(payload_b64), Some(sig_b64), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(AuthError::InvalidToken);
    };

    let header: JwtHeader =
        serde_json::from_slice(&b64url_decode(header_b64)?).map_err(|_| AuthError::InvalidToken)?;
    if header.alg != "HS256" || !header.typ.eq_ignore_ascii_case("JWT") {
        return Err(AuthError::InvalidToken);
    }

    let signature = b64url_decode(sig_b64)?;
    mac_for(secret, &format!("{header_b64}.{payload_b64}"))?
        .verify_slice(&signature)
        .map_err(|_| AuthError::InvalidToken)?;

    serde_json::from_slice(&b64url_decode(payload_b64)?).map_err(|_| AuthError::InvalidToken)
}
