//! Error types for the authgate core
//!
//! This module defines the error taxonomy used throughout the crate.
//! All error types use `thiserror` for ergonomic error handling, and every
//! public operation reports failures as typed results rather than panics.
//!
//! Security note: `LoginError::InvalidCredentials` deliberately collapses
//! "unknown user" and "wrong password", and `AuthenticateError::InvalidSession`
//! collapses "not found" and "expired", so callers cannot leak which half of
//! a credential pair was wrong. No error carries a plaintext password or a
//! raw session token.

use thiserror::Error;

/// A single password policy rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyRule {
    /// Minimum length requirement
    MinLength(usize),

    /// At least one lowercase letter required
    Lowercase,

    /// At least one uppercase letter required
    Uppercase,

    /// At least one digit required
    Digit,
}

impl std::fmt::Display for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyRule::MinLength(n) => write!(f, "at least {} characters", n),
            PolicyRule::Lowercase => write!(f, "at least one lowercase letter"),
            PolicyRule::Uppercase => write!(f, "at least one uppercase letter"),
            PolicyRule::Digit => write!(f, "at least one digit"),
        }
    }
}

/// Password rejected by the policy
///
/// Carries every rule that failed so the caller can build a complete
/// user-facing message in one round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("password does not satisfy policy ({} rule(s) failed)", failed.len())]
pub struct PolicyViolation {
    /// The rules that did not hold, in policy order
    pub failed: Vec<PolicyRule>,
}

/// Errors from [`CredentialStore::create`](crate::credentials::CredentialStore::create)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateError {
    /// A record with this username already exists
    #[error("username already exists")]
    DuplicateUsername,

    /// The hashing backend could not produce a hash (defensive; parameters
    /// are validated at store construction, so this is not expected)
    #[error("credential store exhausted")]
    ResourceExhausted,
}

/// Errors from [`CredentialStore::verify`](crate::credentials::CredentialStore::verify)
///
/// Internal to the core: the service layer collapses this with the
/// wrong-password case before anything reaches a caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// No record exists for this username
    #[error("unknown user")]
    UnknownUser,
}

/// Errors from [`SessionManager::issue`](crate::session::SessionManager::issue)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// The session store cannot allocate a new session
    #[error("session store exhausted")]
    ResourceExhausted,
}

/// Errors from [`SessionManager::validate`](crate::session::SessionManager::validate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No live session exists for this token
    #[error("session not found")]
    NotFound,

    /// The session existed but its TTL has elapsed
    #[error("session expired")]
    Expired,
}

/// Errors from [`AuthService::register`](crate::service::AuthService::register)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// Username or password was empty
    #[error("username and password are required")]
    MissingField,

    /// Password rejected by the policy
    #[error(transparent)]
    Policy(#[from] PolicyViolation),

    /// A record with this username already exists
    #[error("username already exists")]
    DuplicateUsername,

    /// The credential store cannot allocate a new record (defensive)
    #[error("credential store exhausted")]
    ResourceExhausted,
}

impl From<CreateError> for RegisterError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::DuplicateUsername => RegisterError::DuplicateUsername,
            CreateError::ResourceExhausted => RegisterError::ResourceExhausted,
        }
    }
}

/// Errors from [`AuthService::login`](crate::service::AuthService::login)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Username or password was empty
    #[error("username and password are required")]
    MissingField,

    /// Wrong password or unknown user, indistinguishably
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The session store cannot allocate a new session
    #[error("session store exhausted")]
    ResourceExhausted,
}

impl From<IssueError> for LoginError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::ResourceExhausted => LoginError::ResourceExhausted,
        }
    }
}

/// Errors from [`AuthService::authenticate`](crate::service::AuthService::authenticate)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthenticateError {
    /// Token unknown, revoked, or expired, indistinguishably
    #[error("invalid session")]
    InvalidSession,
}

impl From<SessionError> for AuthenticateError {
    fn from(_: SessionError) -> Self {
        AuthenticateError::InvalidSession
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: Error message formatting
    #[test]
    fn test_error_messages() {
        assert_eq!(
            CreateError::DuplicateUsername.to_string(),
            "username already exists"
        );
        assert_eq!(VerifyError::UnknownUser.to_string(), "unknown user");
        assert_eq!(SessionError::NotFound.to_string(), "session not found");
        assert_eq!(SessionError::Expired.to_string(), "session expired");
        assert_eq!(
            IssueError::ResourceExhausted.to_string(),
            "session store exhausted"
        );
        assert_eq!(
            LoginError::InvalidCredentials.to_string(),
            "invalid username or password"
        );
        assert_eq!(
            AuthenticateError::InvalidSession.to_string(),
            "invalid session"
        );
    }

    // Test 2: PolicyViolation reports how many rules failed
    #[test]
    fn test_policy_violation_message() {
        let violation = PolicyViolation {
            failed: vec![PolicyRule::MinLength(8), PolicyRule::Digit],
        };
        assert_eq!(
            violation.to_string(),
            "password does not satisfy policy (2 rule(s) failed)"
        );
    }

    // Test 3: PolicyRule display is caller-message ready
    #[test]
    fn test_policy_rule_messages() {
        assert_eq!(PolicyRule::MinLength(8).to_string(), "at least 8 characters");
        assert_eq!(
            PolicyRule::Lowercase.to_string(),
            "at least one lowercase letter"
        );
        assert_eq!(
            PolicyRule::Uppercase.to_string(),
            "at least one uppercase letter"
        );
        assert_eq!(PolicyRule::Digit.to_string(), "at least one digit");
    }

    // Test 4: CreateError maps into RegisterError
    #[test]
    fn test_register_error_from_create_error() {
        let err: RegisterError = CreateError::DuplicateUsername.into();
        assert_eq!(err, RegisterError::DuplicateUsername);
    }

    // Test 5: PolicyViolation maps into RegisterError transparently
    #[test]
    fn test_register_error_from_policy_violation() {
        let violation = PolicyViolation {
            failed: vec![PolicyRule::Uppercase],
        };
        let err: RegisterError = violation.clone().into();
        assert_eq!(err, RegisterError::Policy(violation.clone()));
        assert_eq!(err.to_string(), violation.to_string());
    }

    // Test 6: Both SessionError variants collapse to InvalidSession
    #[test]
    fn test_authenticate_error_collapses_session_errors() {
        let from_not_found: AuthenticateError = SessionError::NotFound.into();
        let from_expired: AuthenticateError = SessionError::Expired.into();
        assert_eq!(from_not_found, from_expired);
        assert_eq!(from_not_found, AuthenticateError::InvalidSession);
    }

    // Test 7: IssueError maps into LoginError
    #[test]
    fn test_login_error_from_issue_error() {
        let err: LoginError = IssueError::ResourceExhausted.into();
        assert_eq!(err, LoginError::ResourceExhausted);
    }
}
