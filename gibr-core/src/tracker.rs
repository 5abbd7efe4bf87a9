//! # Tracker Traits
//!
//! The seam between the CLI and the individual issue tracker crates.
//!
//! - [`Tracker`] is the object-safe runtime side: a connected adapter that
//!   fetches issues.
//! - [`TrackerDescriptor`] is the static side: registry metadata plus
//!   construction, interactive configuration and config description.
//! - [`RawIssue`] is implemented by each tracker's wire model to normalize it
//!   into an [`Issue`].

use std::env;

use crate::config::TrackerSettings;
use crate::error::{GibrError, Result};
use crate::issue::Issue;
use crate::output::{print_party, print_warning};
use crate::prompts::Prompter;

/// A connected issue tracker adapter
pub trait Tracker {
  /// Human-readable tracker name, e.g. `GitHub`
  fn display_name(&self) -> &str;

  /// Fetch a single issue by id.
  fn get_issue(&self, issue_id: &str) -> Result<Issue>;

  /// List open issues, most recently changed first.
  fn list_issues(&self) -> Result<Vec<Issue>>;
}

/// Static description of a tracker kind used to populate the registry
pub trait TrackerDescriptor {
  /// Registry key and config section name
  const KEY: &'static str;
  /// Human-readable name
  const DISPLAY_NAME: &'static str;
  /// Whether the tracker is implemented
  const SUPPORTED: bool = true;
  /// Whether issue ids are purely numeric
  const NUMERIC_ISSUES: bool = true;

  /// Build a connected adapter from the tracker's config section.
  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>>;

  /// Ask the user for the settings of a new config section.
  fn configure_interactively(_prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    Err(GibrError::UnsupportedTracker(Self::KEY.to_string()))
  }

  /// Human-readable summary of a config section.
  fn describe_config(settings: &TrackerSettings) -> String {
    let rows: Vec<(String, &str)> = settings
      .iter()
      .map(|(key, value)| (key.replace('_', " "), value.as_str()))
      .collect();
    let rows: Vec<(&str, &str)> = rows.iter().map(|(label, value)| (label.as_str(), *value)).collect();
    describe_rows(Self::DISPLAY_NAME, &rows)
  }
}

/// A tracker API payload that can be normalized into an [`Issue`]
pub trait RawIssue {
  /// Normalized assignee username or slug.
  fn assignee(&self) -> Option<String>;

  /// Convert into the normalized issue model.
  fn into_issue(self) -> Issue;
}

/// Render a `Header:` line followed by aligned `Label : value` rows.
pub fn describe_rows(header: &str, rows: &[(&str, &str)]) -> String {
  let mut out = format!("{header}:");
  for (label, value) in rows {
    out.push_str(&format!("\n        {label:<18} : {value}"));
  }
  out
}

/// Fetch a required key from a tracker section.
pub fn require<'a>(settings: &'a TrackerSettings, section: &str, key: &str) -> Result<&'a str> {
  settings
    .get(key)
    .map(String::as_str)
    .ok_or_else(|| GibrError::missing_key(section, key))
}

/// Fetch an optional key, treating blank values as absent.
pub fn optional<'a>(settings: &'a TrackerSettings, key: &str) -> Option<&'a str> {
  settings
    .get(key)
    .map(|value| value.trim())
    .filter(|value| !value.is_empty())
}

/// Value shown by `describe_config` for a possibly missing key.
pub fn shown<'a>(settings: &'a TrackerSettings, key: &str) -> &'a str {
  settings.get(key).map_or("None", String::as_str)
}

/// Report whether the token environment variable is set.
///
/// Prints a confirmation when it is and setup instructions when it is not.
/// Never fails: the user can export the variable after `init` finishes.
pub fn check_token(display_name: &str, token_var: &str) -> bool {
  match env::var(token_var) {
    Ok(value) if !value.is_empty() => {
      print_party(&format!("Found {display_name} token in environment (${token_var})."));
      true
    }
    _ => {
      print_warning(&format!("Environment variable {token_var} is not set."));
      print_warning(&format!("Set it before using gibr with {display_name}:"));
      if cfg!(windows) {
        print_warning(&format!("  setx {token_var} \"your_token_here\""));
      } else {
        print_warning(&format!("  export {token_var}=\"your_token_here\""));
      }
      false
    }
  }
}

/// Reference a token variable the way it is stored in `.gibrconfig`.
pub fn token_reference(token_var: &str) -> String {
  format!("${{{token_var}}}")
}

/// Reject ids that are not all ASCII digits.
pub fn ensure_numeric_id(display_name: &str, issue_id: &str) -> Result<u64> {
  let trimmed = issue_id.trim().trim_start_matches('#');
  if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
    return Err(GibrError::Config(format!(
      "{display_name} issue ids must be numeric, got '{issue_id}'."
    )));
  }
  trimmed
    .parse::<u64>()
    .map_err(|e| GibrError::Config(format!("Invalid {display_name} issue id '{issue_id}': {e}")))
}
