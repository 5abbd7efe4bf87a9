//! Test utilities shared across the gibr workspace
//!
//! This crate provides common testing infrastructure including:
//! - Temporary git repositories with optional bare remotes ([`GitRepoTestGuard`])
//! - Scoped environment variable overrides ([`EnvTestGuard`])
//! - HOME directory isolation ([`HomeEnvTestGuard`])
//! - Temporary `.gibrconfig` projects ([`ConfigFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;
pub mod git;
pub mod home;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use env::EnvTestGuard;
pub use git::GitRepoTestGuard;
pub use home::HomeEnvTestGuard;
