//! JWT token utilities for authentication.
//!
//! Session tokens are HS256 JWTs whose subject is the account id. They are
//! never stored; verifying one only needs the signing secret.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::ServiceError;

/// JWT Claims structure containing the authenticated account
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Signs and verifies session tokens.
pub trait TokenIssuer: Send + Sync {
    /// Produces a signed token bound to `user_id`.
    fn generate_token(&self, user_id: &str) -> Result<String, ServiceError>;
    /// Checks the signature and expiry of `token` and returns its claims.
    fn validate_token(&self, token: &str) -> Result<Claims, ServiceError>;
}

/// JWT token utility for creating and validating tokens
pub struct JwtUtils {
    secret_present: bool,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expires_in_seconds: u64,
}

impl JwtUtils {
    /// Create a new JwtUtils instance from a secret and token lifetime.
    pub fn new(secret: &str, expires_in_seconds: u64) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        JwtUtils {
            secret_present: !secret.is_empty(),
            encoding_key,
            decoding_key,
            validation,
            expires_in_seconds,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expires_in_seconds)
    }
}

impl TokenIssuer for JwtUtils {
    fn generate_token(&self, user_id: &str) -> Result<String, ServiceError> {
        // An empty key would still "sign", but anyone could forge the result.
        if !self.secret_present {
            return Err(ServiceError::token_issuance("signing secret is not configured"));
        }

        let now = Utc::now();
        let exp = i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                ServiceError::token_issuance(format!(
                    "token lifetime of {} seconds is out of range",
                    self.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::token_issuance(format!("Token generation failed: {}", e)))
    }

    fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        if !self.secret_present {
            return Err(ServiceError::unauthorized("Token validation failed"));
        }

        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| ServiceError::unauthorized(format!("Token validation failed: {}", e)))
    }
}

impl Claims {
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let jwt = JwtUtils::new("test-secret", 3600);
        let token = jwt.generate_token("user-123").unwrap();
        assert!(!token.is_empty());

        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.user_id(), "user-123");
        assert!(claims.exp > Utc::now().timestamp() as usize);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = JwtUtils::new("secret-a", 3600)
            .generate_token("user-123")
            .unwrap();

        let err = JwtUtils::new("secret-b", 3600)
            .validate_token(&token)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized { .. }));
    }

    #[test]
    fn test_empty_secret_cannot_sign() {
        let err = JwtUtils::new("", 3600).generate_token("user-123").unwrap_err();
        assert!(matches!(err, ServiceError::TokenIssuance { .. }));
    }

    #[test]
    fn test_expired_token_rejected() {
        let jwt = JwtUtils::new("test-secret", 3600);
        let issued = Utc::now() - TimeDelta::hours(2);
        let claims = Claims {
            sub: "user-123".to_string(),
            exp: (issued + TimeDelta::hours(1)).timestamp() as usize,
            iat: issued.timestamp() as usize,
        };
        assert!(claims.exp < Utc::now().timestamp() as usize);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(jwt.validate_token(&token).is_err());
    }

    #[test]
    fn test_unrepresentable_lifetime_is_an_issuance_error() {
        for lifetime in [10_000_000_000_000_000, u64::MAX] {
            let err = JwtUtils::new("s", lifetime)
                .generate_token("user-123")
                .unwrap_err();
            assert!(matches!(err, ServiceError::TokenIssuance { .. }));
        }
    }

    #[test]
    fn test_garbage_token_rejected() {
        let jwt = JwtUtils::new("test-secret", 3600);
        assert!(jwt.validate_token("not.a.token").is_err());
    }
}
