//! Password policy validation
//!
//! A pure, deterministic check with no internal state and no I/O. The
//! policy reports every failed rule so the calling layer can build a
//! complete message in one pass; this module does no message formatting
//! itself.

use crate::config::PolicyConfig;
use crate::error::{PolicyRule, PolicyViolation};

/// Password policy derived from [`PolicyConfig`]
///
/// Default rules: length >= 8, at least one lowercase letter, one uppercase
/// letter, and one digit.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    config: PolicyConfig,
}

impl PasswordPolicy {
    /// Create a policy from configuration
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Create a policy with the default rules
    pub fn with_defaults() -> Self {
        Self::new(PolicyConfig::default())
    }

    /// Validate a password against every rule
    ///
    /// Returns `Ok(())` when all rules hold, otherwise a [`PolicyViolation`]
    /// enumerating each rule that failed, in policy order.
    pub fn validate(&self, password: &str) -> Result<(), PolicyViolation> {
        let mut failed = Vec::new();

        // Length counts characters, not bytes, so multibyte input is not
        // over-counted.
        if password.chars().count() < self.config.min_length {
            failed.push(PolicyRule::MinLength(self.config.min_length));
        }
        if self.config.require_lowercase && !password.chars().any(|c| c.is_ascii_lowercase()) {
            failed.push(PolicyRule::Lowercase);
        }
        if self.config.require_uppercase && !password.chars().any(|c| c.is_ascii_uppercase()) {
            failed.push(PolicyRule::Uppercase);
        }
        if self.config.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            failed.push(PolicyRule::Digit);
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(PolicyViolation { failed })
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test 1: A conforming password passes
    #[test]
    fn test_valid_password_passes() {
        let policy = PasswordPolicy::with_defaults();
        assert!(policy.validate("Passw0rd").is_ok());
        assert!(policy.validate("Sup3rSecret").is_ok());
    }

    // Test 2: Too-short password fails the length rule
    #[test]
    fn test_short_password_fails_length() {
        let policy = PasswordPolicy::with_defaults();
        let violation = policy.validate("short1").unwrap_err();
        assert!(violation.failed.contains(&PolicyRule::MinLength(8)));
        // "short1" has lowercase and a digit but no uppercase
        assert!(violation.failed.contains(&PolicyRule::Uppercase));
        assert!(!violation.failed.contains(&PolicyRule::Lowercase));
        assert!(!violation.failed.contains(&PolicyRule::Digit));
    }

    // Test 3: Every rule is reported when all fail
    #[test]
    fn test_all_rules_reported() {
        let policy = PasswordPolicy::with_defaults();
        let violation = policy.validate("").unwrap_err();
        assert_eq!(
            violation.failed,
            vec![
                PolicyRule::MinLength(8),
                PolicyRule::Lowercase,
                PolicyRule::Uppercase,
                PolicyRule::Digit,
            ]
        );
    }

    // Test 4: Each single missing class is caught
    #[test]
    fn test_single_missing_character_class() {
        let policy = PasswordPolicy::with_defaults();

        let no_lower = policy.validate("PASSW0RD").unwrap_err();
        assert_eq!(no_lower.failed, vec![PolicyRule::Lowercase]);

        let no_upper = policy.validate("passw0rd").unwrap_err();
        assert_eq!(no_upper.failed, vec![PolicyRule::Uppercase]);

        let no_digit = policy.validate("Password").unwrap_err();
        assert_eq!(no_digit.failed, vec![PolicyRule::Digit]);
    }

    // Test 5: Validation is deterministic
    #[test]
    fn test_deterministic() {
        let policy = PasswordPolicy::with_defaults();
        for _ in 0..3 {
            assert_eq!(
                policy.validate("weak").unwrap_err(),
                policy.validate("weak").unwrap_err()
            );
            assert!(policy.validate("Passw0rd").is_ok());
        }
    }

    // Test 6: Rules can be relaxed through configuration
    #[test]
    fn test_configurable_rules() {
        let config = PolicyConfig {
            min_length: 4,
            require_lowercase: true,
            require_uppercase: false,
            require_digit: false,
        };
        let policy = PasswordPolicy::new(config);
        assert!(policy.validate("abcd").is_ok());
        assert_eq!(
            policy.validate("ab").unwrap_err().failed,
            vec![PolicyRule::MinLength(4)]
        );
    }

    // Test 7: Multibyte characters count once toward length
    #[test]
    fn test_multibyte_length() {
        let policy = PasswordPolicy::with_defaults();
        // 7 characters, several of them multibyte
        let violation = policy.validate("Pä55wör").unwrap_err();
        assert!(violation.failed.contains(&PolicyRule::MinLength(8)));
    }
}
