use gibr_core::text::slugify;
use gibr_core::{Issue, RawIssue};
use serde::Deserialize;

use crate::consts::COMPLETED_STATE;

/// Represents a Linear user
#[derive(Debug, Deserialize)]
pub struct LinearUser {
  #[serde(rename = "displayName", default)]
  pub display_name: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
}

/// Workflow state of an issue
#[derive(Debug, Deserialize)]
pub struct LinearState {
  pub name: String,
  #[serde(rename = "type")]
  pub state_type: String,
}

/// Represents a Linear issue
#[derive(Debug, Deserialize)]
pub struct LinearIssue {
  pub identifier: String,
  pub title: String,
  #[serde(default)]
  pub assignee: Option<LinearUser>,
  #[serde(default)]
  pub state: Option<LinearState>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueConnection {
  #[serde(default)]
  pub nodes: Vec<LinearIssue>,
}

/// `data` payload of an `issues` query
#[derive(Debug, Deserialize)]
pub(crate) struct IssuesData {
  pub issues: IssueConnection,
}

impl LinearIssue {
  pub fn is_completed(&self) -> bool {
    self.state.as_ref().is_some_and(|state| state.state_type == COMPLETED_STATE)
  }
}

fn slug_of(value: Option<&str>) -> Option<String> {
  value.map(slugify).filter(|slug| !slug.is_empty())
}

impl RawIssue for LinearIssue {
  fn assignee(&self) -> Option<String> {
    let user = self.assignee.as_ref()?;
    slug_of(user.display_name.as_deref()).or_else(|| slug_of(user.name.as_deref()))
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    Issue::new(self.identifier, self.title).with_assignee(assignee)
  }
}
