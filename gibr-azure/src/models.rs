use gibr_core::text::slugify;
use gibr_core::{Issue, RawIssue};
use serde::Deserialize;

/// A user reference inside work item fields
#[derive(Debug, Deserialize)]
pub struct AzureIdentity {
  #[serde(rename = "displayName", default)]
  pub display_name: Option<String>,
  #[serde(rename = "uniqueName", default)]
  pub unique_name: Option<String>,
}

/// The subset of work item fields gibr reads
#[derive(Debug, Deserialize)]
pub struct WorkItemFields {
  #[serde(rename = "System.Title")]
  pub title: String,
  #[serde(rename = "System.WorkItemType", default)]
  pub work_item_type: Option<String>,
  #[serde(rename = "System.State", default)]
  pub state: Option<String>,
  #[serde(rename = "System.AssignedTo", default)]
  pub assigned_to: Option<AzureIdentity>,
}

/// Represents an Azure DevOps work item
#[derive(Debug, Deserialize)]
pub struct WorkItem {
  pub id: u64,
  pub fields: WorkItemFields,
}

/// Response of a batch work item fetch
#[derive(Debug, Deserialize)]
pub struct WorkItemList {
  #[serde(default)]
  pub value: Vec<WorkItem>,
}

/// Reference returned by a WIQL query
#[derive(Debug, Deserialize)]
pub struct WorkItemReference {
  pub id: u64,
}

/// Response of a WIQL query
#[derive(Debug, Deserialize)]
pub struct WiqlResult {
  #[serde(rename = "workItems", default)]
  pub work_items: Vec<WorkItemReference>,
}

impl WorkItem {
  /// Whether the work item's state is one of `closed_states`
  pub fn is_closed(&self, closed_states: &[String]) -> bool {
    self
      .fields
      .state
      .as_deref()
      .is_some_and(|state| closed_states.iter().any(|closed| closed.eq_ignore_ascii_case(state)))
  }
}

impl RawIssue for WorkItem {
  fn assignee(&self) -> Option<String> {
    let identity = self.fields.assigned_to.as_ref()?;
    identity
      .display_name
      .as_deref()
      .map(slugify)
      .filter(|slug| !slug.is_empty())
      .or_else(|| {
        identity
          .unique_name
          .as_deref()
          .and_then(|unique| unique.split('@').next())
          .filter(|local| !local.is_empty())
          .map(str::to_lowercase)
      })
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    Issue::new(self.id, self.fields.title)
      .with_type(self.fields.work_item_type.unwrap_or_default())
      .with_assignee(assignee)
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_work_item_mapping() {
    let raw: WorkItem = serde_json::from_value(json!({
      "id": 42,
      "fields": {
        "System.Title": "Fix pipeline bug",
        "System.WorkItemType": "Bug",
        "System.State": "Active",
        "System.AssignedTo": { "displayName": "John Doe", "uniqueName": "jdoe@example.com" }
      }
    }))
    .unwrap();

    let issue = raw.into_issue();
    assert_eq!(issue.id, "42");
    assert_eq!(issue.title, "Fix pipeline bug");
    assert_eq!(issue.issue_type, "Bug");
    assert_eq!(issue.assignee.as_deref(), Some("john-doe"));
  }

  #[test]
  fn test_assignee_falls_back_to_unique_name() {
    let raw: WorkItem = serde_json::from_value(json!({
      "id": 1,
      "fields": {
        "System.Title": "Task",
        "System.AssignedTo": { "uniqueName": "JDoe@example.com" }
      }
    }))
    .unwrap();
    assert_eq!(raw.assignee().as_deref(), Some("jdoe"));
  }

  #[test]
  fn test_is_closed_ignores_case() {
    let raw: WorkItem = serde_json::from_value(json!({
      "id": 1,
      "fields": { "System.Title": "Task", "System.State": "done" }
    }))
    .unwrap();
    assert!(raw.is_closed(&["Done".to_string()]));
    assert!(!raw.is_closed(&["Closed".to_string()]));
  }
}
