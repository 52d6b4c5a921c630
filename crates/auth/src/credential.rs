//! Secret hashing and verification for the login flows.
//!
//! Argon2id with a fresh OS-random salt per hash; the stored form is a PHC
//! string. Verification answers only yes/no — parse failures on the stored
//! hash are indistinguishable from a plain mismatch.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("secret hashing failed: {0}")]
pub struct HashSecretError(String);

/// Hash a plaintext secret for storage.
pub fn hash_secret(secret: &str) -> Result<String, HashSecretError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| HashSecretError(e.to_string()))
}

/// Compare a plaintext secret against a stored hash.
pub fn verify_secret(secret: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok()
}
