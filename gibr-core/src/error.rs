//! # Error Taxonomy
//!
//! Errors surfaced by configuration loading, tracker resolution and tracker
//! adapters. Adapters translate their transport and API failures into these
//! variants so the CLI can report them uniformly.

use thiserror::Error;

use crate::branch::TemplateError;

/// Result alias used across the gibr library crates
pub type Result<T, E = GibrError> = std::result::Result<T, E>;

/// Errors produced by the gibr core and tracker adapters
#[derive(Debug, Error)]
pub enum GibrError {
  /// No configuration file was found while walking up from the working
  /// directory
  #[error("{0} not found in this or any parent directory")]
  ConfigNotFound(String),

  /// A configuration value is missing or malformed
  #[error("{0}")]
  Config(String),

  /// A tracker section lacks a required key
  #[error("Missing key in '{section}' config: {key}")]
  MissingConfigKey { section: String, key: String },

  /// The configured tracker key is not registered or not implemented
  #[error("Unsupported tracker type: {0}")]
  UnsupportedTracker(String),

  /// The adapter could not be constructed
  #[error("Failed to connect to {tracker}: {message}")]
  Connection { tracker: String, message: String },

  /// The tracker reported that the issue does not exist
  #[error("Issue {id} not found in {scope}.")]
  IssueNotFound { id: String, scope: String },

  /// The tracker rejected the request or could not be reached
  #[error("{tracker} API request failed: {message}")]
  RemoteApi { tracker: String, message: String },

  /// The branch name template is invalid
  #[error(transparent)]
  Template(#[from] TemplateError),

  /// Reading or writing a local file failed
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl GibrError {
  /// Build a missing-key error for a tracker section.
  pub fn missing_key(section: &str, key: &str) -> Self {
    Self::MissingConfigKey {
      section: section.to_string(),
      key: key.to_string(),
    }
  }

  /// Build a remote API error for the given tracker.
  pub fn remote(tracker: &str, message: impl Into<String>) -> Self {
    Self::RemoteApi {
      tracker: tracker.to_string(),
      message: message.into(),
    }
  }

  /// Build an issue-not-found error.
  pub fn not_found(id: impl Into<String>, scope: impl Into<String>) -> Self {
    Self::IssueNotFound {
      id: id.into(),
      scope: scope.into(),
    }
  }

  /// Build a connection error for the given tracker.
  pub fn connection(tracker: &str, message: impl Into<String>) -> Self {
    Self::Connection {
      tracker: tracker.to_string(),
      message: message.into(),
    }
  }
}
