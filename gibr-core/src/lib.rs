//! # Gibr Core Library
//!
//! Core library for gibr providing the normalized issue model, the tracker
//! registry and adapter traits, the branch name template engine, the
//! `.gibrconfig` loader and the git branch helpers. Tracker crates build on
//! the shared HTTP and GraphQL helpers exported here.

pub mod branch;
pub mod config;
pub mod consts;
pub mod error;
pub mod git;
pub mod graphql;
pub mod http;
pub mod issue;
pub mod output;
pub mod prompts;
pub mod registry;
pub mod text;
pub mod tracker;

// Re-export main types for tracker crates and the CLI
pub use branch::{BranchNameTemplate, TemplateError};
pub use config::{GibrConfig, TrackerSettings};
pub use error::{GibrError, Result};
pub use issue::Issue;
pub use output::{print_error, print_info, print_party, print_success, print_warning};
pub use prompts::{DialoguerPrompter, Prompter, ScriptedPrompter};
pub use registry::{Registry, TrackerEntry};
pub use tracker::{RawIssue, Tracker, TrackerDescriptor};
