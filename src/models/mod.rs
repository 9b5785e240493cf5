//! Domain models for authgate
//!
//! This module contains the core domain models owned by the credential and
//! session stores. Neither type ever crosses the crate boundary with secret
//! material attached: `UserRecord` stays inside the credential store, and
//! `Session` is only ever reported to callers as its username.

use chrono::{DateTime, Utc};

/// A registered user as stored by the credential store
///
/// Holds the Argon2id hash (PHC string format, salt included) and never the
/// plaintext password. The username is the unique, case-sensitive key and is
/// immutable once the record exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique username
    pub username: String,

    /// Salted Argon2id hash of the password (PHC string format)
    pub password_hash: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Create a new record from an already-hashed password
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// A live session as stored by the session manager
///
/// Existence of a `Session` implies a prior successful login. A session is
/// removed on logout, expiry, or store flush; removal is absence from the
/// map, not a tombstone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// The bearer token identifying this session
    pub token: String,

    /// The authenticated username (back-reference, not an ownership link)
    pub username: String,

    /// When the session was issued
    pub issued_at: DateTime<Utc>,

    /// When the session stops being valid
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Create a session expiring at `expires_at`
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            issued_at: Utc::now(),
            expires_at,
        }
    }

    /// Check whether the session has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    // Test 1: New user record carries the hash, not a password
    #[test]
    fn test_user_record_new() {
        let record = UserRecord::new("alice", "$argon2id$fake");
        assert_eq!(record.username, "alice");
        assert_eq!(record.password_hash, "$argon2id$fake");
        assert!(record.created_at <= Utc::now());
    }

    // Test 2: Session is not expired before its deadline
    #[test]
    fn test_session_not_expired_before_deadline() {
        let expires_at = Utc::now() + Duration::seconds(60);
        let session = Session::new("tok", "alice", expires_at);
        assert!(!session.is_expired(Utc::now()));
    }

    // Test 3: Session is expired at and after its deadline
    #[test]
    fn test_session_expired_at_deadline() {
        let expires_at = Utc::now() - Duration::seconds(1);
        let session = Session::new("tok", "alice", expires_at);
        assert!(session.is_expired(Utc::now()));
        // Boundary: expires_at == now counts as expired
        assert!(session.is_expired(session.expires_at));
    }
}
