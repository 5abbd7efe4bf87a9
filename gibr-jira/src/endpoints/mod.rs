//! Jira API endpoint implementations.

pub mod issues;
