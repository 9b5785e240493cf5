//! authgate - credential and session management core for login flows
//!
//! This crate provides the in-process core behind a login flow: salted
//! Argon2id credential storage and verification, password policy checks,
//! and session token issue/validate/revoke with TTL expiry. A
//! request-handling layer (HTTP routing, cookies, rendering) consumes it
//! via [`service::AuthService`] and owns everything user-facing.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod policy;
pub mod service;
pub mod session;
