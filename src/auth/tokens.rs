//! Signed access-token issuance and validation.

use std::collections::HashMap;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id the token was issued for.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
    /// Additional claims supplied at issuance.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Issues and validates signed, time-limited access tokens (HS256).
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl_minutes: i64,
}

impl TokenService {
    /// Create a token service from the signing secret and default lifetime.
    pub fn new(secret: &str, default_ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl_minutes,
        }
    }

    /// Issue a token for the given subject with the default lifetime.
    pub fn issue(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_with(subject, None, HashMap::new())
    }

    /// Issue a token with an explicit lifetime and extra claims.
    pub fn issue_with(
        &self,
        subject: &str,
        ttl_minutes: Option<i64>,
        extra: HashMap<String, serde_json::Value>,
    ) -> Result<String, AuthError> {
        let minutes = ttl_minutes.unwrap_or(self.default_ttl_minutes);
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(minutes)).timestamp(),
            extra,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Decode and validate a token. Malformed, tampered, and expired tokens
    /// all fail with the same error so callers cannot tell them apart.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn service() -> TokenService {
        TokenService::new("test-secret", 60)
    }

    #[test]
    fn test_issue_and_decode_roundtrip() {
        let tokens = service();
        let token = tokens.issue("user-123").expect("Failed to issue token");

        let claims = tokens.decode(&token).expect("Failed to decode token");
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_extra_claims_roundtrip() {
        let tokens = service();
        let mut extra = HashMap::new();
        extra.insert("device".to_string(), json!("gps-head-unit"));

        let token = tokens
            .issue_with("user-123", None, extra)
            .expect("Failed to issue token");
        let claims = tokens.decode(&token).expect("Failed to decode token");
        assert_eq!(claims.extra.get("device"), Some(&json!("gps-head-unit")));
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let tokens = service();
        let token = tokens
            .issue_with("user-123", Some(-5), HashMap::new())
            .expect("Failed to issue token");

        assert!(matches!(
            tokens.decode(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_tampered_token_is_invalid() {
        let tokens = service();
        let mut token = tokens.issue("user-123").expect("Failed to issue token");
        token.push('x');

        assert!(matches!(
            tokens.decode(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = service().issue("user-123").expect("Failed to issue token");
        let other = TokenService::new("other-secret", 60);

        assert!(matches!(other.decode(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_token_is_invalid() {
        assert!(matches!(
            service().decode("not.a.token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
