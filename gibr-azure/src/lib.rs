//! # Azure DevOps Issue Tracker
//!
//! Work Item Tracking REST integration for gibr. Listing is scoped to the
//! configured team's current iteration.

pub mod client;
pub mod consts;
pub mod models;
pub mod tracker;
pub mod wiql;

pub use client::AzureClient;
pub use models::{AzureIdentity, WorkItem, WorkItemFields};
pub use tracker::{Azure, AzureTracker};
