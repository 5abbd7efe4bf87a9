//! # Issue Model
//!
//! The normalized representation of an issue fetched from any tracker.

use std::fmt;

use crate::consts::DEFAULT_ISSUE_TYPE;
use crate::text::slugify;

/// Simple representation of an issue from any tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
  /// Tracker-specific identifier (`42`, `PROJ-123`, `ENG-7`)
  pub id: String,
  /// Free-text summary
  pub title: String,
  /// Category label such as `issue`, `Bug` or `Task`
  pub issue_type: String,
  /// Normalized username or slug of the assignee
  pub assignee: Option<String>,
}

impl Issue {
  /// Create an unassigned issue with the default type.
  pub fn new(id: impl fmt::Display, title: impl Into<String>) -> Self {
    Self {
      id: id.to_string(),
      title: title.into(),
      issue_type: DEFAULT_ISSUE_TYPE.to_string(),
      assignee: None,
    }
  }

  /// Set the issue type, keeping the default when `issue_type` is empty.
  pub fn with_type(mut self, issue_type: impl Into<String>) -> Self {
    let issue_type = issue_type.into();
    if !issue_type.trim().is_empty() {
      self.issue_type = issue_type;
    }
    self
  }

  /// Set the normalized assignee.
  pub fn with_assignee(mut self, assignee: Option<String>) -> Self {
    self.assignee = assignee;
    self
  }

  /// Branch-safe slug of the title.
  pub fn sanitized_title(&self) -> String {
    slugify(&self.title)
  }
}

impl fmt::Display for Issue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "#{} {}", self.id, self.title)
  }
}
