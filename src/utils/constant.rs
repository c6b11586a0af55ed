//! # Application Constants
//!
//! This module defines configuration constants used throughout the CleanLink
//! application.

use std::time::Duration;

/// Expiration time for JWT access tokens
///
/// Tokens remain valid for this duration after issuance; logout is stateless
/// and does not revoke them early.
pub const ACCESS_TOKEN_EXPIRY: Duration = Duration::from_secs(60 * 60);

/// Minimum accepted password length at registration
pub const MIN_PASSWORD_LENGTH: usize = 8;
