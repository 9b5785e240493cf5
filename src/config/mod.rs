//! Configuration management for authgate
//!
//! This module handles loading, parsing, and validating core configuration
//! from YAML files and environment variables. Every field has a default, so
//! an empty configuration is a working configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Top-level core configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    /// Password policy rules
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Argon2id cost parameters
    #[serde(default)]
    pub hashing: HashingConfig,

    /// Session lifetime and capacity
    #[serde(default)]
    pub session: SessionConfig,
}

impl CoreConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileRead(format!("Failed to read config file: {}", e)))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    ///
    /// `${VAR}` references are expanded from the environment before parsing.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(yaml);
        let config: Self = serde_yaml::from_str(&expanded)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables with prefix AUTHGATE_
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = CoreConfig::default();

        if let Ok(min_length) = std::env::var("AUTHGATE_POLICY_MIN_LENGTH") {
            config.policy.min_length = min_length
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid minimum length".to_string()))?;
        }

        if let Ok(memory) = std::env::var("AUTHGATE_HASHING_MEMORY_KIB") {
            config.hashing.memory_kib = memory
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid memory cost".to_string()))?;
        }
        if let Ok(iterations) = std::env::var("AUTHGATE_HASHING_ITERATIONS") {
            config.hashing.iterations = iterations
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid iteration count".to_string()))?;
        }

        if let Ok(ttl) = std::env::var("AUTHGATE_SESSION_TTL_SECS") {
            config.session.ttl_secs = ttl
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid session TTL".to_string()))?;
        }
        if let Ok(max) = std::env::var("AUTHGATE_SESSION_MAX_SESSIONS") {
            config.session.max_sessions = max
                .parse()
                .map_err(|_| ConfigError::Parse("Invalid session capacity".to_string()))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.policy.min_length == 0 {
            return Err(ConfigError::InvalidValue(
                "policy.min_length must be at least 1".to_string(),
            ));
        }
        if self.hashing.iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "hashing.iterations must be at least 1".to_string(),
            ));
        }
        if self.hashing.parallelism == 0 {
            return Err(ConfigError::InvalidValue(
                "hashing.parallelism must be at least 1".to_string(),
            ));
        }
        if self.session.ttl_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "session.ttl_secs must be at least 1".to_string(),
            ));
        }
        if self.session.max_sessions == 0 {
            return Err(ConfigError::InvalidValue(
                "session.max_sessions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Password policy rules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    /// Minimum password length in characters
    #[serde(default = "default_min_length")]
    pub min_length: usize,

    /// Require at least one lowercase letter
    #[serde(default = "default_true")]
    pub require_lowercase: bool,

    /// Require at least one uppercase letter
    #[serde(default = "default_true")]
    pub require_uppercase: bool,

    /// Require at least one digit
    #[serde(default = "default_true")]
    pub require_digit: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            min_length: default_min_length(),
            require_lowercase: true,
            require_uppercase: true,
            require_digit: true,
        }
    }
}

/// Argon2id cost parameters
///
/// Defaults follow the OWASP second recommended configuration
/// (19 MiB memory, 2 iterations, parallelism 1).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HashingConfig {
    /// Memory cost in KiB
    #[serde(default = "default_memory_kib")]
    pub memory_kib: u32,

    /// Number of iterations (time cost)
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Degree of parallelism
    #[serde(default = "default_parallelism")]
    pub parallelism: u32,
}

impl Default for HashingConfig {
    fn default() -> Self {
        Self {
            memory_kib: default_memory_kib(),
            iterations: default_iterations(),
            parallelism: default_parallelism(),
        }
    }
}

/// Session lifetime and capacity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    /// Session time-to-live in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of live sessions the store will hold
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

impl SessionConfig {
    /// The configured TTL as a [`Duration`]
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_min_length() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_memory_kib() -> u32 {
    19456
}

fn default_iterations() -> u32 {
    2
}

fn default_parallelism() -> u32 {
    1
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_max_sessions() -> usize {
    1_000_000
}

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Error reading configuration file
    #[error("Failed to read configuration file: {0}")]
    FileRead(String),

    /// Error parsing configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Invalid configuration value
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Expand `${VAR}` environment variable references in a string
///
/// Unset variables are left as-is.
fn expand_env_vars(input: &str) -> String {
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}")
        .expect("Invalid regex pattern for environment variable expansion");

    re.replace_all(input, |caps: &regex_lite::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| caps[0].to_string())
    })
    .into_owned()
}
