//! Session issue, validation, revocation, and expiry
//!
//! This module owns the token-to-session map. A token maps to at most one
//! live session; removal is absence from the map. Expired sessions are
//! evicted eagerly when touched by `validate` and in bulk by
//! `sweep_expired`, which an external scheduler may call periodically to
//! keep memory bounded under many short-lived sessions.

pub mod token;

pub use token::{generate_token, is_valid_token_format, TOKEN_PREFIX};

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::config::SessionConfig;
use crate::error::{IssueError, SessionError};
use crate::models::Session;

// A fresh 256-bit token colliding with a live one is effectively
// impossible; the retry bound exists so issue() cannot loop forever.
const MAX_ISSUE_ATTEMPTS: usize = 8;

/// Thread-safe in-memory session store
///
/// Concurrent validations take the read lock and proceed in parallel;
/// issue, revoke, sweep, and expired-entry eviction take the write lock.
pub struct SessionManager {
    config: SessionConfig,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionManager {
    /// Create a session manager with the given lifetime and capacity limits
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session manager with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SessionConfig::default())
    }

    /// Issue a session token for an authenticated username
    ///
    /// The token expires `ttl` from now. Fails with `ResourceExhausted`
    /// only when the configured capacity cap is reached or no vacant token
    /// slot can be found; neither is expected in normal operation.
    pub fn issue(&self, username: &str, ttl: Duration) -> Result<String, IssueError> {
        let expires_at = expiry_from_now(ttl);

        let mut sessions = self.sessions.write().unwrap();
        if sessions.len() >= self.config.max_sessions {
            warn!(
                live = sessions.len(),
                cap = self.config.max_sessions,
                "session capacity reached"
            );
            return Err(IssueError::ResourceExhausted);
        }

        for _ in 0..MAX_ISSUE_ATTEMPTS {
            let token = generate_token();
            if sessions.contains_key(&token) {
                continue;
            }
            sessions.insert(token.clone(), Session::new(&token, username, expires_at));
            debug!(username, "session issued");
            return Ok(token);
        }

        Err(IssueError::ResourceExhausted)
    }

    /// Validate a token and return the authenticated username
    ///
    /// An expired session is removed as a side effect of being touched,
    /// then reported as `Expired`.
    pub fn validate(&self, token: &str) -> Result<String, SessionError> {
        if !is_valid_token_format(token) {
            return Err(SessionError::NotFound);
        }

        let now = Utc::now();
        {
            let sessions = self.sessions.read().unwrap();
            match sessions.get(token) {
                None => return Err(SessionError::NotFound),
                Some(session) if !session.is_expired(now) => {
                    return Ok(session.username.clone());
                }
                Some(_) => {}
            }
        }

        // Expired: upgrade to the write lock and evict. Another thread may
        // have removed the entry already, which is fine.
        let mut sessions = self.sessions.write().unwrap();
        if let Some(session) = sessions.get(token) {
            if session.is_expired(now) {
                sessions.remove(token);
            }
        }
        Err(SessionError::Expired)
    }

    /// Revoke a session
    ///
    /// Idempotent: revoking an absent token is a no-op.
    pub fn revoke(&self, token: &str) {
        let removed = self.sessions.write().unwrap().remove(token);
        if let Some(session) = removed {
            debug!(username = %session.username, "session revoked");
        }
    }

    /// Remove every session whose expiry is at or before `now`
    ///
    /// Returns the number of sessions removed. Intended for periodic
    /// invocation by the calling layer's scheduler.
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write().unwrap();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        let removed = before - sessions.len();

        if removed > 0 {
            debug!(removed, live = sessions.len(), "expired sessions swept");
        }
        removed
    }

    /// Remove every session unconditionally
    pub fn clear(&self) {
        self.sessions.write().unwrap().clear();
    }

    /// Number of sessions currently held, including not-yet-swept expired ones
    pub fn live_sessions(&self) -> usize {
        self.sessions.read().unwrap().len()
    }
}

/// Compute `now + ttl`, saturating instead of overflowing on absurd TTLs
fn expiry_from_now(ttl: Duration) -> DateTime<Utc> {
    let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
    Utc::now()
        .checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
