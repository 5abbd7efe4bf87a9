//! # Linear Issue Tracker
//!
//! Linear GraphQL integration for gibr. Issues are addressed by their
//! `TEAM-123` identifier, or by number when a default team is configured.

pub mod client;
pub mod consts;
pub mod models;
pub mod tracker;

pub use client::LinearClient;
pub use models::{LinearIssue, LinearState, LinearUser};
pub use tracker::{Linear, LinearTracker};
