//! # Jira Issue Endpoints
//!
//! Fetching single issues by key and searching open issues with JQL.

use gibr_core::http::{read_json, send};
use gibr_core::{GibrError, Result};
use tracing::{debug, instrument};

use crate::client::JiraClient;
use crate::consts::{MAX_RESULTS, SEARCH_FIELDS};
use crate::models::{JiraIssue, JiraSearchResponse};

/// JQL selecting open issues, scoped to `project_key` or else to the caller.
pub fn open_issues_jql(project_key: Option<&str>) -> String {
  let scope = match project_key {
    Some(project) => format!("project = \"{project}\""),
    None => "assignee = currentUser()".to_string(),
  };
  format!("{scope} AND statusCategory != Done ORDER BY updated DESC")
}

impl JiraClient {
  /// Get a Jira issue by key. `scope` names where the issue was looked up
  /// for the not-found error.
  #[instrument(skip(self), level = "debug")]
  pub fn get_issue(&self, issue_key: &str, scope: &str) -> Result<JiraIssue> {
    let response = send("Jira", self.get(&format!("/rest/api/2/issue/{issue_key}")))?;
    read_json("Jira", response, || GibrError::not_found(issue_key, scope))
  }

  /// Run a JQL search.
  #[instrument(skip(self), level = "debug")]
  pub fn search_issues(&self, jql: &str) -> Result<Vec<JiraIssue>> {
    let max_results = MAX_RESULTS.to_string();
    let request = self.get("/rest/api/2/search").query(&[
      ("jql", jql),
      ("maxResults", max_results.as_str()),
      ("fields", SEARCH_FIELDS),
    ]);

    let response = send("Jira", request)?;
    let result: JiraSearchResponse = read_json("Jira", response, || {
      GibrError::remote("Jira", "Search endpoint not found; check the Jira URL")
    })?;
    debug!("Jira search returned {} issues (total {:?})", result.issues.len(), result.total);
    Ok(result.issues)
  }
}

#[cfg(test)]
mod tests {
  use mockito::Matcher;

  use super::*;
  use crate::client::create_jira_client;

  #[test]
  fn test_open_issues_jql() {
    assert_eq!(
      open_issues_jql(Some("PROJ")),
      "project = \"PROJ\" AND statusCategory != Done ORDER BY updated DESC"
    );
    assert_eq!(
      open_issues_jql(None),
      "assignee = currentUser() AND statusCategory != Done ORDER BY updated DESC"
    );
  }

  #[test]
  fn test_get_issue() {
    let mut server = mockito::Server::new();
    let mock = server
      .mock("GET", "/rest/api/2/issue/TEST-123")
      .match_header("authorization", Matcher::Regex("^Basic ".to_string()))
      .with_status(200)
      .with_body(
        r#"{
          "id": "10000",
          "key": "TEST-123",
          "fields": {
            "summary": "Test issue",
            "status": {"name": "In Progress", "statusCategory": {"key": "indeterminate"}}
          }
        }"#,
      )
      .create();

    let client = create_jira_client(&server.url(), "test_user", "test_token").unwrap();
    let issue = client.get_issue("TEST-123", "Jira project TEST").unwrap();
    assert_eq!(issue.key, "TEST-123");
    assert_eq!(issue.fields.summary, "Test issue");
    mock.assert();
  }

  #[test]
  fn test_get_issue_not_found() {
    let mut server = mockito::Server::new();
    server.mock("GET", "/rest/api/2/issue/TEST-999").with_status(404).create();

    let client = create_jira_client(&server.url(), "test_user", "test_token").unwrap();
    let err = client.get_issue("TEST-999", "Jira project TEST").unwrap_err();
    assert_eq!(err.to_string(), "Issue TEST-999 not found in Jira project TEST.");
  }

  #[test]
  fn test_search_issues_sends_jql() {
    let mut server = mockito::Server::new();
    let jql = open_issues_jql(Some("TEST"));
    let mock = server
      .mock("GET", "/rest/api/2/search")
      .match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded("jql".into(), jql.clone()),
        Matcher::UrlEncoded("maxResults".into(), "50".into()),
      ]))
      .with_status(200)
      .with_body(r#"{"total": 1, "issues": [{"key": "TEST-1", "fields": {"summary": "One"}}]}"#)
      .create();

    let client = create_jira_client(&server.url(), "test_user", "test_token").unwrap();
    let issues = client.search_issues(&jql).unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].key, "TEST-1");
    mock.assert();
  }
}
