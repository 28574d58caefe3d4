// JWT issuance and verification

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::auth::{config::AuthConfig, error::AuthError};

/// Signed claim set carried by every access token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's email
    pub sub: String,
    /// Expiration as a unix timestamp
    pub exp: i64,
}

/// Resolved identity of a verified token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub subject: String,
}

/// Token service for issuing and verifying HS256-signed bearer tokens
///
/// Pure with respect to its inputs: issuance depends only on the subject,
/// the current time, and the configured secret. The secret is immutable
/// after construction, so the service can be cloned freely across
/// concurrent requests.
#[derive(Clone)]
pub struct TokenService {
    config: AuthConfig,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Issue a token for `subject`, expiring after the configured TTL
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        let exp = Utc::now().timestamp() + self.config.token_ttl_secs();
        let claims = Claims {
            sub: subject.to_string(),
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.secret()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Verify a token and return the identity it carries
    ///
    /// Checks the signature against the configured secret, then the `exp`
    /// claim against the current time. A token missing the `sub` claim
    /// fails deserialization and is rejected as invalid.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let mut validation = Validation::default();
        // No clock leeway: an exp in the past rejects immediately
        validation.leeway = 0;

        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        Ok(Identity {
            subject: claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new(AuthConfig::new("test_secret_key_for_testing_purposes"))
    }

    // Encode arbitrary claims with the test secret, bypassing the service
    fn encode_raw<T: Serialize>(claims: &T) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret("test_secret_key_for_testing_purposes".as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let service = test_token_service();
        let token = service.issue("a@b.com").unwrap();
        let identity = service.verify(&token).unwrap();
        assert_eq!(identity.subject, "a@b.com");
    }

    #[test]
    fn test_token_is_three_segments() {
        let service = test_token_service();
        let token = service.issue("user@example.com").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let service = test_token_service();

        let claims = Claims {
            sub: "user@example.com".to_string(),
            exp: Utc::now().timestamp() - 1,
        };
        let token = encode_raw(&claims);

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[test]
    fn test_recently_expired_token_gets_no_grace_period() {
        let service = test_token_service();

        // Signed correctly, expired half a minute ago
        let claims = Claims {
            sub: "late@x.com".to_string(),
            exp: Utc::now().timestamp() - 30,
        };
        let token = encode_raw(&claims);

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::ExpiredToken));
    }

    #[test]
    fn test_tampered_signature_is_rejected() {
        let service = test_token_service();
        let token = service.issue("user@example.com").unwrap();

        // Flip one character in the signature segment
        let mut parts: Vec<String> = token.split('.').map(String::from).collect();
        let sig = parts[2].clone();
        let flipped = if sig.starts_with('A') {
            format!("B{}", &sig[1..])
        } else {
            format!("A{}", &sig[1..])
        };
        parts[2] = flipped;
        let tampered = parts.join(".");

        let err = service.verify(&tampered).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new(AuthConfig::new("secret1"));
        let verifier = TokenService::new(AuthConfig::new("secret2"));

        let token = issuer.issue("user@example.com").unwrap();
        assert!(issuer.verify(&token).is_ok());
        assert!(matches!(
            verifier.verify(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_missing_subject_claim_is_rejected() {
        let service = test_token_service();

        // Signed and unexpired, but carries no `sub`
        let token = encode_raw(&serde_json::json!({
            "exp": Utc::now().timestamp() + 900,
        }));

        let err = service.verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        for malformed in ["", "not.a.token", "no_dots_at_all", "a.b"] {
            assert!(service.verify(malformed).is_err(), "{:?}", malformed);
        }
    }

    #[test]
    fn test_ttl_override_is_honored() {
        let service = TokenService::new(AuthConfig::new("secret").with_ttl_secs(60));
        let token = service.issue("user@example.com").unwrap();

        let mut validation = Validation::default();
        validation.validate_exp = false;
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("secret".as_bytes()),
            &validation,
        )
        .unwrap();

        let remaining = data.claims.exp - Utc::now().timestamp();
        assert!(remaining > 0 && remaining <= 60);
    }

    proptest! {
        #[test]
        fn prop_issue_verify_roundtrips_subject(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.issue(&email).unwrap();
            let identity = service.verify(&token).unwrap();
            prop_assert_eq!(identity.subject, email);
        }

        #[test]
        fn prop_random_strings_are_rejected(garbage in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(service.verify(&garbage).is_err());
        }
    }
}
