use gibr_core::text::{alphanumeric_prefix, slugify};
use gibr_core::{Issue, RawIssue};
use serde::Deserialize;

use crate::consts::{ACCOUNT_ID_PREFIX_LEN, DONE_CATEGORY};

/// Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
#[derive(Debug, Deserialize)]
pub struct JiraIssueFields {
  pub summary: String,
  #[serde(default)]
  pub issuetype: Option<JiraIssueType>,
  #[serde(default)]
  pub assignee: Option<JiraUser>,
  #[serde(default)]
  pub status: Option<JiraStatus>,
}

#[derive(Debug, Deserialize)]
pub struct JiraIssueType {
  pub name: String,
}

/// Jira user. Server/Data Center exposes `name`, Cloud only `accountId`.
#[derive(Debug, Deserialize)]
pub struct JiraUser {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(rename = "displayName", default)]
  pub display_name: Option<String>,
  #[serde(rename = "accountId", default)]
  pub account_id: Option<String>,
}

/// Represents a Jira issue status
#[derive(Debug, Deserialize)]
pub struct JiraStatus {
  pub name: String,
  #[serde(rename = "statusCategory", default)]
  pub status_category: Option<JiraStatusCategory>,
}

#[derive(Debug, Deserialize)]
pub struct JiraStatusCategory {
  pub key: String,
}

/// Response of the search endpoint
#[derive(Debug, Deserialize)]
pub struct JiraSearchResponse {
  #[serde(default)]
  pub issues: Vec<JiraIssue>,
  #[serde(default)]
  pub total: Option<u32>,
}

impl JiraIssue {
  /// Whether the issue's status belongs to the Done category
  pub fn is_done(&self) -> bool {
    self
      .fields
      .status
      .as_ref()
      .and_then(|s| s.status_category.as_ref())
      .is_some_and(|c| c.key.eq_ignore_ascii_case(DONE_CATEGORY))
  }
}

impl JiraUser {
  /// Username, else display-name slug, else a short account id prefix
  pub fn normalized(&self) -> Option<String> {
    non_empty(&self.name)
      .map(str::to_string)
      .or_else(|| non_empty(&self.display_name).map(slugify).filter(|s| !s.is_empty()))
      .or_else(|| non_empty(&self.account_id).map(|a| alphanumeric_prefix(a, ACCOUNT_ID_PREFIX_LEN)))
  }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl RawIssue for JiraIssue {
  fn assignee(&self) -> Option<String> {
    self.fields.assignee.as_ref().and_then(JiraUser::normalized)
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    let issue_type = self.fields.issuetype.map(|t| t.name).unwrap_or_default();
    Issue::new(self.key, self.fields.summary)
      .with_type(issue_type)
      .with_assignee(assignee)
  }
}
