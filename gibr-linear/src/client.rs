//! # Linear GraphQL Client
//!
//! Thin wrapper over the shared GraphQL transport holding Linear's queries.

use gibr_core::graphql::GraphQlClient;
use gibr_core::{GibrError, Result};
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::consts::{API_URL, COMPLETED_STATE, MAX_RESULTS};
use crate::models::{IssuesData, LinearIssue};

const ISSUE_FIELDS: &str = "identifier title assignee { displayName name } state { name type }";

/// Represents a Linear API client
pub struct LinearClient {
  graphql: GraphQlClient,
}

impl LinearClient {
  /// Create a client using a personal API key, sent without a scheme
  pub fn new(token: &str) -> Result<Self> {
    Ok(Self {
      graphql: GraphQlClient::new("Linear", API_URL, token)?,
    })
  }

  /// Send requests to `endpoint` instead of the public API.
  pub fn with_endpoint(mut self, endpoint: &str) -> Self {
    self.graphql.set_endpoint(endpoint);
    self
  }

  pub fn endpoint(&self) -> &str {
    self.graphql.endpoint()
  }

  /// Look up an issue by team key and number.
  #[instrument(skip(self), level = "debug")]
  pub fn get_issue(&self, team_key: &str, number: u64) -> Result<LinearIssue> {
    let query = format!(
      "query IssueByNumber($teamKey: String!, $number: Float!) {{ \
       issues(filter: {{ team: {{ key: {{ eq: $teamKey }} }}, number: {{ eq: $number }} }}, first: 1) \
       {{ nodes {{ {ISSUE_FIELDS} }} }} }}"
    );
    let data: IssuesData = self
      .graphql
      .request(&query, json!({ "teamKey": team_key, "number": number }))?;

    data
      .issues
      .nodes
      .into_iter()
      .next()
      .ok_or_else(|| GibrError::not_found(format!("{team_key}-{number}"), format!("Linear team {team_key}")))
  }

  /// List issues that are not completed, most recently updated first.
  #[instrument(skip(self), level = "debug")]
  pub fn list_open_issues(&self, team_key: Option<&str>) -> Result<Vec<LinearIssue>> {
    let query = format!(
      "query OpenIssues($filter: IssueFilter, $first: Int) {{ \
       issues(filter: $filter, first: $first, orderBy: updatedAt) {{ nodes {{ {ISSUE_FIELDS} }} }} }}"
    );
    let data: IssuesData = self.graphql.request(
      &query,
      json!({ "filter": open_issue_filter(team_key), "first": MAX_RESULTS }),
    )?;

    debug!("Linear returned {} open issues", data.issues.nodes.len());
    Ok(data.issues.nodes)
  }
}

/// Issue filter excluding completed issues, optionally scoped to a team.
pub fn open_issue_filter(team_key: Option<&str>) -> Value {
  let mut filter = json!({ "state": { "type": { "neq": COMPLETED_STATE } } });
  if let Some(team) = team_key {
    filter["team"] = json!({ "key": { "eq": team } });
  }
  filter
}

#[cfg(test)]
mod tests {
  use mockito::Matcher;

  use super::*;

  fn client_for(server: &mockito::Server) -> LinearClient {
    LinearClient::new("lin_api_test")
      .unwrap()
      .with_endpoint(&format!("{}/graphql", server.url()))
  }

  #[test]
  fn test_default_endpoint() {
    assert_eq!(LinearClient::new("lin_api_test").unwrap().endpoint(), API_URL);
  }

  #[test]
  fn test_open_issue_filter() {
    assert_eq!(
      open_issue_filter(None),
      json!({ "state": { "type": { "neq": "completed" } } })
    );
    assert_eq!(
      open_issue_filter(Some("ENG")),
      json!({ "state": { "type": { "neq": "completed" } }, "team": { "key": { "eq": "ENG" } } })
    );
  }

  #[test]
  fn test_get_issue_sends_team_and_number() {
    let mut server = mockito::Server::new();
    let mock = server
      .mock("POST", "/graphql")
      .match_header("authorization", "lin_api_test")
      .match_body(Matcher::PartialJson(json!({ "variables": { "teamKey": "ENG", "number": 42 } })))
      .with_status(200)
      .with_body(r#"{"data": {"issues": {"nodes": [{"identifier": "ENG-42", "title": "Ship it"}]}}}"#)
      .create();

    let issue = client_for(&server).get_issue("ENG", 42).unwrap();
    assert_eq!(issue.identifier, "ENG-42");
    mock.assert();
  }

  #[test]
  fn test_get_issue_empty_result_is_not_found() {
    let mut server = mockito::Server::new();
    server
      .mock("POST", "/graphql")
      .with_status(200)
      .with_body(r#"{"data": {"issues": {"nodes": []}}}"#)
      .create();

    let err = client_for(&server).get_issue("ENG", 999).unwrap_err();
    assert_eq!(err.to_string(), "Issue ENG-999 not found in Linear team ENG.");
  }

  #[test]
  fn test_list_open_issues_sends_filter() {
    let mut server = mockito::Server::new();
    let mock = server
      .mock("POST", "/graphql")
      .match_body(Matcher::PartialJson(json!({
        "variables": { "filter": { "team": { "key": { "eq": "ENG" } } }, "first": 50 }
      })))
      .with_status(200)
      .with_body(
        r#"{"data": {"issues": {"nodes": [
          {"identifier": "ENG-2", "title": "B"},
          {"identifier": "ENG-1", "title": "A"}
        ]}}}"#,
      )
      .create();

    let issues = client_for(&server).list_open_issues(Some("ENG")).unwrap();
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].identifier, "ENG-2");
    mock.assert();
  }
}
