//! Authentication service
//!
//! This module composes the password policy, credential store, and session
//! manager into the operations a request-handling layer calls: register,
//! login, logout, and authenticate. The service is where error collapsing
//! happens: callers never learn whether a login failed on the username or
//! the password, nor whether a session was missing or expired.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, CoreConfig};
use crate::credentials::{CredentialStore, HashError};
use crate::error::{AuthenticateError, LoginError, RegisterError};
use crate::policy::PasswordPolicy;
use crate::session::SessionManager;

/// Errors from [`AuthService::new`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuildError {
    /// Configuration failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Hashing cost factors rejected by the Argon2 implementation
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Facade over the credential and session core
///
/// Constructed once at process start and shared by reference with the
/// request-handling layer; all methods take `&self` and are safe to call
/// from concurrent request handlers.
pub struct AuthService {
    policy: PasswordPolicy,
    credentials: CredentialStore,
    sessions: SessionManager,
    session_ttl: Duration,
}

impl AuthService {
    /// Build the service and its owned stores from configuration
    pub fn new(config: &CoreConfig) -> Result<Self, BuildError> {
        config.validate()?;

        Ok(Self {
            policy: PasswordPolicy::new(config.policy.clone()),
            credentials: CredentialStore::new(&config.hashing)?,
            sessions: SessionManager::new(config.session.clone()),
            session_ttl: config.session.ttl(),
        })
    }

    /// Build the service from pre-constructed parts
    ///
    /// Lets tests and unusual deployments inject their own stores.
    pub fn from_parts(
        policy: PasswordPolicy,
        credentials: CredentialStore,
        sessions: SessionManager,
        session_ttl: Duration,
    ) -> Self {
        Self {
            policy,
            credentials,
            sessions,
            session_ttl,
        }
    }

    /// Register a new user
    ///
    /// Checks run in order: field presence, password policy, then the
    /// duplicate-check-and-create, which the credential store makes atomic
    /// per username.
    pub fn register(&self, username: &str, password: &str) -> Result<(), RegisterError> {
        if username.is_empty() || password.is_empty() {
            return Err(RegisterError::MissingField);
        }

        self.policy.validate(password)?;
        self.credentials.create(username, password)?;

        info!(username, "user registered");
        Ok(())
    }

    /// Log a user in and issue a session token
    ///
    /// Unknown-user and wrong-password failures both surface as
    /// `InvalidCredentials`; the credential store equalizes their cost, so
    /// neither the error nor its timing distinguishes the two.
    pub fn login(&self, username: &str, password: &str) -> Result<String, LoginError> {
        if username.is_empty() || password.is_empty() {
            return Err(LoginError::MissingField);
        }

        match self.credentials.verify(username, password) {
            Ok(true) => {}
            Ok(false) | Err(_) => {
                debug!(username, "login rejected");
                return Err(LoginError::InvalidCredentials);
            }
        }

        let token = self.sessions.issue(username, self.session_ttl)?;
        info!(username, "login succeeded");
        Ok(token)
    }

    /// Log a session out
    ///
    /// Idempotent: logging out an unknown or already-revoked token is a
    /// no-op.
    pub fn logout(&self, token: &str) {
        self.sessions.revoke(token);
    }

    /// Resolve a session token to its authenticated username
    ///
    /// Unknown and expired tokens both surface as `InvalidSession`.
    pub fn authenticate(&self, token: &str) -> Result<String, AuthenticateError> {
        Ok(self.sessions.validate(token)?)
    }

    /// The session manager, for the caller's sweep scheduler
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// The credential store, for caller introspection
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }
}
