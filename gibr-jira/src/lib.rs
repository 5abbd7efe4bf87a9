//! # Jira Issue Tracker
//!
//! Jira REST API v2 integration for gibr. Issues are addressed by key
//! (`PROJ-123`) or by number combined with a configured default project.

pub mod client;
pub mod consts;
pub mod endpoints;
pub mod models;
pub mod tracker;

pub use client::JiraClient;
pub use models::{JiraAuth, JiraIssue, JiraIssueFields, JiraSearchResponse, JiraUser};
pub use tracker::{Jira, JiraTracker};
