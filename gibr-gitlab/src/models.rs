use gibr_core::{Issue, RawIssue};
use serde::Deserialize;

/// Represents a GitLab user reference
#[derive(Debug, Deserialize)]
pub struct GitLabUser {
  pub username: String,
}

/// Represents a GitLab issue
#[derive(Debug, Deserialize)]
pub struct GitLabIssue {
  /// Project-scoped issue number
  pub iid: u64,
  pub title: String,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub issue_type: Option<String>,
  #[serde(default)]
  pub assignees: Vec<GitLabUser>,
  #[serde(default)]
  pub assignee: Option<GitLabUser>,
}

impl GitLabIssue {
  pub fn is_closed(&self) -> bool {
    self.state.as_deref() == Some("closed")
  }
}

impl RawIssue for GitLabIssue {
  fn assignee(&self) -> Option<String> {
    self
      .assignees
      .first()
      .or(self.assignee.as_ref())
      .map(|user| user.username.clone())
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    Issue::new(self.iid, self.title)
      .with_type(self.issue_type.unwrap_or_default())
      .with_assignee(assignee)
  }
}
