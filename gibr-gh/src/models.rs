use gibr_core::{Issue, RawIssue};
use serde::Deserialize;
use serde_json::Value;

/// Represents GitHub authentication credentials
#[derive(Clone)]
pub struct GitHubAuth {
  pub token: String,
}

/// Represents a GitHub user
#[derive(Debug, Deserialize)]
pub struct GitHubUser {
  pub login: String,
}

/// Organization-level issue type, present when issue types are enabled
#[derive(Debug, Deserialize)]
pub struct GitHubIssueType {
  pub name: String,
}

/// Represents a GitHub issue as returned by the issues endpoints
#[derive(Debug, Deserialize)]
pub struct GitHubIssue {
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub state: Option<String>,
  #[serde(default)]
  pub assignee: Option<GitHubUser>,
  #[serde(default)]
  pub assignees: Vec<GitHubUser>,
  #[serde(rename = "type", default)]
  pub issue_type: Option<GitHubIssueType>,
  /// Set when the item is a pull request
  #[serde(default)]
  pub pull_request: Option<Value>,
}

impl GitHubIssue {
  pub fn is_pull_request(&self) -> bool {
    self.pull_request.is_some()
  }
}

impl RawIssue for GitHubIssue {
  fn assignee(&self) -> Option<String> {
    self
      .assignee
      .as_ref()
      .or_else(|| self.assignees.first())
      .map(|user| user.login.clone())
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    let issue_type = self.issue_type.map(|t| t.name).unwrap_or_default();
    Issue::new(self.number, self.title)
      .with_type(issue_type)
      .with_assignee(assignee)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_issue_mapping_prefers_assignee_login() {
    let raw: GitHubIssue = serde_json::from_value(json!({
      "number": 42,
      "title": "Add dark mode",
      "assignee": { "login": "octocat" },
      "assignees": [{ "login": "hubot" }],
      "type": { "name": "Feature" }
    }))
    .unwrap();

    let issue = raw.into_issue();
    assert_eq!(issue.id, "42");
    assert_eq!(issue.issue_type, "Feature");
    assert_eq!(issue.assignee.as_deref(), Some("octocat"));
  }

  #[test]
  fn test_issue_mapping_falls_back_to_assignees_and_default_type() {
    let raw: GitHubIssue = serde_json::from_value(json!({
      "number": 7,
      "title": "Crash",
      "assignee": null,
      "assignees": [{ "login": "hubot" }],
      "type": null
    }))
    .unwrap();

    let issue = raw.into_issue();
    assert_eq!(issue.issue_type, "issue");
    assert_eq!(issue.assignee.as_deref(), Some("hubot"));
  }

  #[test]
  fn test_pull_request_detection() {
    let raw: GitHubIssue = serde_json::from_value(json!({
      "number": 8,
      "title": "PR",
      "pull_request": { "url": "https://api.github.com/repos/o/r/pulls/8" }
    }))
    .unwrap();
    assert!(raw.is_pull_request());
  }
}
