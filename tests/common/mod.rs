//! Common test utilities and helpers for integration tests

#![allow(dead_code)]

use std::time::Duration;

use authgate::config::{CoreConfig, HashingConfig, PolicyConfig, SessionConfig};
use authgate::service::AuthService;

/// Hashing parameters at the Argon2 minimum, so tests stay fast
pub fn fast_hashing_config() -> HashingConfig {
    HashingConfig {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

/// Core configuration with fast hashing and the given session TTL
pub fn test_config(ttl: Duration) -> CoreConfig {
    CoreConfig {
        policy: PolicyConfig::default(),
        hashing: fast_hashing_config(),
        session: SessionConfig {
            ttl_secs: ttl.as_secs().max(1),
            max_sessions: 10_000,
        },
    }
}

/// Create a test service with fast hashing and a one-hour session TTL
pub fn create_test_service() -> AuthService {
    AuthService::new(&test_config(Duration::from_secs(3600)))
        .expect("Failed to create test service")
}
