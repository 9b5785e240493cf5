//! Password hashing and verification
//!
//! Passwords are hashed with Argon2id using a freshly generated random salt
//! per call, and stored in PHC string format. Verification parses the stored
//! string and re-derives the digest; the digest comparison inside the
//! `argon2` crate is constant-time.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::config::HashingConfig;

/// Argon2id hasher with cost factors fixed at construction
///
/// Parameters are validated once in [`CredentialHasher::new`], so hashing
/// with a valid hasher does not fail in practice.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    /// Create a hasher from the configured cost factors
    pub fn new(config: &HashingConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a password with a fresh random salt
    ///
    /// Returns the Argon2id hash in PHC string format. The plaintext is
    /// borrowed for the duration of the call and nothing derived from it
    /// other than the hash is retained.
    pub fn hash(&self, password: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashError::HashFailed(e.to_string()))
    }

    /// Verify a password against a stored PHC hash string
    ///
    /// Returns `false` for a wrong password and for an unparseable hash.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Error type for hashing operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HashError {
    /// Cost parameters rejected by the Argon2 implementation
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Hashing failed
    #[error("Hash failed: {0}")]
    HashFailed(String),
}
