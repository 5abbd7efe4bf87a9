//! # GitHub Issue Tracker
//!
//! GitHub REST API integration for gibr: fetches single issues and lists open
//! issues of one repository, skipping pull requests.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;
pub mod tracker;

// Re-export the client
pub use client::GitHubClient;
// Re-export models
pub use models::{GitHubAuth, GitHubIssue, GitHubIssueType, GitHubUser};
// Re-export the adapter
pub use tracker::{GitHub, GitHubTracker};
