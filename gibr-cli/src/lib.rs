//! # Gibr CLI
//!
//! Command-line front end for gibr: argument routing, the command handlers
//! and the table of built-in issue trackers.

pub mod cli;
pub mod trackers;
