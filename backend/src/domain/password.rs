//! Password hashing and verification.
//!
//! Argon2id with per-hash random salts, stored as PHC strings. Verification
//! failure is a normal `false`, not an error; only malformed stored hashes
//! surface as [`PasswordHashError`].

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash as PhcString, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Errors raised while hashing or verifying passwords.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// Hashing the supplied password failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// The stored hash is not a valid PHC string.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Stored password hash (Argon2id PHC string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a plaintext password with a fresh random salt.
    pub fn derive(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordHashError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a PHC string loaded from storage.
    ///
    /// The string is not parsed here; a corrupt value is reported by
    /// [`PasswordHash::verify`] at the point of use.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// Check a candidate password against this hash.
    pub fn verify(&self, candidate: &str) -> Result<bool, PasswordHashError> {
        let parsed = PhcString::new(&self.0).map_err(|err| PasswordHashError::Malformed {
            message: err.to_string(),
        })?;
        match Argon2::default().verify_password(candidate.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::Malformed {
                message: err.to_string(),
            }),
        }
    }

    /// PHC string for storage.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
