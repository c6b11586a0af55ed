//! # Password Service
//!
//! Argon2id hashing and verification for user credentials. Passwords are
//! stored only as PHC-format hash strings; verification parses the stored
//! hash and never touches the plaintext again.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while hashing a password
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed")]
    Hash,
}

/// Hashes a plaintext password with Argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if the hasher rejects the input.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| PasswordError::Hash)
}

/// Verifies a plaintext password against a stored PHC-format hash.
///
/// An unparseable stored hash counts as a failed verification rather than an
/// error; the caller only needs a yes/no answer.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        warn!("Stored password hash is not valid PHC format");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
