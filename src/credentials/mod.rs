//! Credential storage and verification
//!
//! This module owns the username-to-record map. Records hold only salted
//! Argon2id hashes; plaintext passwords are discarded as soon as the hash
//! or verification result exists. The store is safe to share across
//! request-handling threads.

pub mod hash;

pub use hash::{CredentialHasher, HashError};

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::config::HashingConfig;
use crate::error::{CreateError, VerifyError};
use crate::models::UserRecord;

// Verified against on the unknown-user path so lookups that miss cost the
// same as lookups that hit. Never a real credential.
const DUMMY_PASSWORD: &str = "authgate-timing-equalizer";

/// Thread-safe in-memory credential store
///
/// Usernames are case-sensitive, unique for the lifetime of the store, and
/// immutable once created. Hashing runs outside the map lock so one slow
/// hash never serializes unrelated operations; the insert re-checks
/// occupancy under the write lock, so concurrent creates for the same
/// username yield exactly one success.
pub struct CredentialStore {
    hasher: CredentialHasher,
    dummy_hash: String,
    users: RwLock<HashMap<String, UserRecord>>,
}

impl CredentialStore {
    /// Create a store with the given hashing cost factors
    ///
    /// Fails only if the cost factors are rejected by the Argon2
    /// implementation. Construction also computes the dummy hash used to
    /// equalize unknown-user timing, which exercises the parameters once.
    pub fn new(config: &HashingConfig) -> Result<Self, HashError> {
        let hasher = CredentialHasher::new(config)?;
        let dummy_hash = hasher.hash(DUMMY_PASSWORD)?;
        Ok(Self {
            hasher,
            dummy_hash,
            users: RwLock::new(HashMap::new()),
        })
    }

    /// Check whether a record exists for a username
    pub fn exists(&self, username: &str) -> bool {
        self.users.read().unwrap().contains_key(username)
    }

    /// Create a record for a new user
    ///
    /// The password is hashed with a fresh random salt before the write
    /// lock is taken, and the plaintext is not retained after this call
    /// returns.
    pub fn create(&self, username: &str, password: &str) -> Result<(), CreateError> {
        // Cheap pre-check so a duplicate does not burn a full hash. The
        // authoritative check is the entry match below.
        if self.exists(username) {
            return Err(CreateError::DuplicateUsername);
        }

        let password_hash = self.hasher.hash(password).map_err(|e| {
            warn!(error = %e, "password hashing failed");
            CreateError::ResourceExhausted
        })?;
        let record = UserRecord::new(username, password_hash);

        let mut users = self.users.write().unwrap();
        match users.entry(username.to_string()) {
            Entry::Occupied(_) => Err(CreateError::DuplicateUsername),
            Entry::Vacant(slot) => {
                slot.insert(record);
                debug!(username, "credential record created");
                Ok(())
            }
        }
    }

    /// Verify a password for an existing user
    ///
    /// Returns `Ok(true)` on a match, `Ok(false)` on a wrong password, and
    /// `Err(UnknownUser)` when no record exists. The unknown-user path
    /// verifies against a fixed dummy hash first, so it costs the same as
    /// the wrong-password path and the service layer can collapse the two
    /// without a timing side channel.
    pub fn verify(&self, username: &str, password: &str) -> Result<bool, VerifyError> {
        let stored_hash = {
            let users = self.users.read().unwrap();
            users.get(username).map(|r| r.password_hash.clone())
        };

        match stored_hash {
            Some(hash) => Ok(self.hasher.verify(password, &hash)),
            None => {
                let _ = self.hasher.verify(password, &self.dummy_hash);
                Err(VerifyError::UnknownUser)
            }
        }
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.users.read().unwrap().len()
    }

    /// Whether the store has no users
    pub fn is_empty(&self) -> bool {
        self.users.read().unwrap().is_empty()
    }
}
