//! # GitLab Issue Tracker
//!
//! GitLab REST API v4 integration for gibr, for gitlab.com and self-managed
//! instances.

pub mod client;
pub mod models;
pub mod tracker;

pub use client::GitLabClient;
pub use models::{GitLabIssue, GitLabUser};
pub use tracker::{GitLab, GitLabTracker};
