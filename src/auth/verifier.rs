use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use super::jwt::{decode_hs256, encode_hs256};
use super::AuthError;
use crate::config::{AdminCredentials, Config};

/// Claims carried by an admin session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Checks admin credentials and issues/validates signed session tokens.
///
/// Holds no mutable state: every call is a pure function of its inputs, the
/// configured admin identity and the signing secret.
pub struct CredentialVerifier {
    admin: AdminCredentials,
    secret: Vec<u8>,
    token_ttl: Duration,
}

impl CredentialVerifier {
    pub fn new(admin: AdminCredentials, secret: impl Into<Vec<u8>>, token_ttl: Duration) -> Self {
        Self {
            admin,
            secret: secret.into(),
            token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.admin.clone(),
            config.jwt_secret.as_bytes(),
            Duration::hours(config.token_ttl_hours),
        )
    }

    pub fn admin_identity(&self) -> &str {
        &self.admin.email
    }

    /// Exchange the admin email and password for a session token
    pub fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.login_at(email, password, Utc::now())
    }

    pub fn login_at(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        // Evaluate both comparisons so a wrong email costs the same as a wrong password.
        let email_ok = email.as_bytes().ct_eq(self.admin.email.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.admin.password.as_bytes());
        if !bool::from(email_ok & password_ok) {
            return Err(AuthError::InvalidCredentials);
        }

        self.issue(email, now)
    }

    /// Sign a token for `subject` without checking credentials
    pub fn issue(&self, subject: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let expires_at = now
            .checked_add_signed(self.token_ttl)
            .ok_or_else(|| AuthError::Signing("Token expiry is out of range".to_string()))?;

        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        encode_hs256(&self.secret, &claims)
    }

    /// Validate a bearer token and return the identity it was issued to
    pub fn verify(&self, token: &str) -> Result<String, AuthError> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims: SessionClaims = decode_hs256(&self.secret, token)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }

        if claims.sub != self.admin.email {
            return Err(AuthError::Unauthorized);
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::test_config;

    fn verifier() -> CredentialVerifier {
        CredentialVerifier::from_config(&test_config())
    }

    #[test]
    fn test_login_then_verify_yields_admin_identity() {
        let verifier = verifier();

        let token = verifier.login("admin@example.com", "correct-pw").unwrap();
        let identity = verifier.verify(&token).unwrap();

        assert_eq!(identity, "admin@example.com");
        assert_eq!(identity, verifier.admin_identity());
    }

    #[test]
    fn test_login_rejects_any_mismatch() {
        let verifier = verifier();

        for (email, password) in [
            ("wrong@example.com", "correct-pw"),
            ("admin@example.com", "wrong-pw"),
            ("ADMIN@example.com", "correct-pw"),
            ("admin@example.com", "correct-pw "),
            ("admin@example.com", ""),
            ("", ""),
        ] {
            let result = verifier.login(email, password);
            assert!(
                matches!(result, Err(AuthError::InvalidCredentials)),
                "({email:?}, {password:?}) should be rejected"
            );
        }
    }

    #[test]
    fn test_password_equal_to_email_is_not_special() {
        let verifier = verifier();
        let result = verifier.login("admin@example.com", "admin@example.com");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_token_expires_after_ttl() {
        let verifier = verifier();
        let issued = Utc::now();
        let token = verifier
            .login_at("admin@example.com", "correct-pw", issued)
            .unwrap();

        let just_before = issued + Duration::hours(24) - Duration::seconds(1);
        assert!(verifier.verify_at(&token, just_before).is_ok());

        let at_expiry = issued + Duration::hours(24);
        assert!(matches!(
            verifier.verify_at(&token, at_expiry),
            Err(AuthError::Expired)
        ));

        let long_after = issued + Duration::days(30);
        assert!(matches!(
            verifier.verify_at(&token, long_after),
            Err(AuthError::Expired)
        ));
    }

    #[test]
    fn test_token_claims_span_configured_ttl() {
        let verifier = verifier();
        let issued = Utc::now();
        let token = verifier.issue("admin@example.com", issued).unwrap();

        let claims: SessionClaims = decode_hs256(b"test-secret", &token).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.iat, issued.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_other_subject_is_unauthorized() {
        let verifier = verifier();
        let token = verifier.issue("editor@example.com", Utc::now()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::Unauthorized)
        ));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let mut config = test_config();
        config.jwt_secret = "another-secret".to_string();
        let foreign = CredentialVerifier::from_config(&config);
        let token = foreign.login("admin@example.com", "correct-pw").unwrap();

        assert!(matches!(
            verifier().verify(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let verifier = CredentialVerifier::new(
            test_config().admin,
            b"test-secret".as_slice(),
            Duration::days(100_000_000_000),
        );

        assert!(matches!(
            verifier.login("admin@example.com", "correct-pw"),
            Err(AuthError::Signing(_))
        ));
    }

    #[test]
    fn test_longest_configured_ttl_issues_tokens() {
        let mut config = test_config();
        config.token_ttl_hours = crate::config::MAX_TOKEN_TTL_HOURS;
        let verifier = CredentialVerifier::from_config(&config);

        let token = verifier.login("admin@example.com", "correct-pw").unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), "admin@example.com");
    }

    #[test]
    fn test_garbage_token_is_invalid() {
        assert!(matches!(
            verifier().verify("definitely.not.valid"),
            Err(AuthError::InvalidToken)
        ));
    }
}
