//! # Monday.com Board Tracker
//!
//! Treats the items of one Monday.com board as issues, using the platform's
//! GraphQL API.

pub mod client;
pub mod consts;
pub mod models;
pub mod tracker;

pub use client::MondayClient;
pub use models::{ColumnValue, MondayItem};
pub use tracker::{Monday, MondayTracker};
