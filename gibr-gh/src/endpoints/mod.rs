//! GitHub API endpoint implementations.

pub mod issues;
