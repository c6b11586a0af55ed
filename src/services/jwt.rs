//! # JWT Service
//!
//! This module provides JSON Web Token (JWT) functionality for user
//! authentication. Access tokens carry the user id as the subject claim and
//! expire one hour after issuance. There is no server-side session state:
//! logout is a client-side concern and a token stays valid until it expires.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::utils::constant::ACCESS_TOKEN_EXPIRY;

/// Errors that can occur during JWT operations
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingError(#[from] jsonwebtoken::errors::Error),
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
}

/// JWT claims structure for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as string)
    pub sub: String,
    /// Expiration timestamp (Unix epoch)
    pub exp: u64,
    /// Issued at timestamp (Unix epoch)
    pub iat: u64,
}

/// A freshly issued access token with its lifetime in seconds
#[derive(Debug, Serialize)]
pub struct AccessToken {
    /// JWT access token for API authentication
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
}

/// Service for issuing and validating bearer tokens
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Creates a new JWT service with the provided keys.
    ///
    /// # Arguments
    ///
    /// * `encoding_key` - Key used for signing JWT tokens
    /// * `decoding_key` - Key used for verifying JWT tokens
    pub fn new(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        Self {
            encoding_key,
            decoding_key,
        }
    }

    /// Creates a new access token for the user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Unique identifier for the user
    ///
    /// # Errors
    ///
    /// Returns [`JwtError::EncodingError`] if token signing fails.
    #[instrument(skip(self))]
    pub fn create_access_token(&self, user_id: Uuid) -> Result<AccessToken, JwtError> {
        trace!("Creating new access token");

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("System time should not be before UNIX EPOCH")
            .as_secs();

        let claims = Claims {
            sub: user_id.to_string(),
            exp: now + ACCESS_TOKEN_EXPIRY.as_secs(),
            iat: now,
        };
        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        trace!("Access token created");

        Ok(AccessToken {
            token,
            expires_in: ACCESS_TOKEN_EXPIRY.as_secs(),
        })
    }

    /// Validates an access token and returns its claims.
    ///
    /// This method verifies the token signature and checks expiration.
    /// It does not perform database lookups for validation.
    ///
    /// # Errors
    ///
    /// - [`JwtError::TokenExpired`] - Token has expired
    /// - [`JwtError::InvalidToken`] - Token is malformed or has invalid signature
    #[instrument(skip_all, fields(token_length = token.len()))]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        trace!("Validating access token");

        match decode::<Claims>(token, &self.decoding_key, &Validation::default()) {
            Ok(token_data) => {
                trace!(user_id = %token_data.claims.sub, "Access token validated successfully");
                Ok(token_data.claims)
            }
            Err(e) if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                debug!("Access token expired");
                Err(JwtError::TokenExpired)
            }
            Err(e) => {
                debug!(error = %e, "Invalid access token");
                Err(JwtError::InvalidToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        let secret = b"test-secret-not-for-production";
        JwtService::new(
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    fn now_secs() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    #[test_log::test]
    fn issued_token_round_trips() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let access = service.create_access_token(user_id).unwrap();
        assert_eq!(access.expires_in, ACCESS_TOKEN_EXPIRY.as_secs());

        let claims = service.validate_access_token(&access.token).unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY.as_secs());
    }

    #[test]
    fn token_near_expiry_is_still_valid() {
        // A token issued 59 minutes ago has one minute left on the clock.
        let service = test_service();
        let now = now_secs();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now + 60,
            iat: now - 59 * 60,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(service.validate_access_token(&token).is_ok());
    }

    #[test_log::test]
    fn expired_token_is_rejected() {
        // A token issued 61 minutes ago expired one minute past the default
        // leeway window.
        let service = test_service();
        let now = now_secs();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now - 2 * 60,
            iat: now - 61 * 60,
        };
        let token = encode(&Header::default(), &claims, &service.encoding_key).unwrap();

        assert!(matches!(
            service.validate_access_token(&token),
            Err(JwtError::TokenExpired)
        ));
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = test_service();
        assert!(matches!(
            service.validate_access_token("not-a-jwt"),
            Err(JwtError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_other_key_is_invalid() {
        let service = test_service();
        let other = JwtService::new(
            EncodingKey::from_secret(b"another-secret"),
            DecodingKey::from_secret(b"another-secret"),
        );

        let access = other.create_access_token(Uuid::new_v4()).unwrap();
        assert!(matches!(
            service.validate_access_token(&access.token),
            Err(JwtError::InvalidToken)
        ));
    }
}
