use std::sync::LazyLock;

use gibr_core::tracker::{check_token, describe_rows, optional, require, shown, token_reference};
use gibr_core::{
  GibrError, Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings, print_warning,
};
use regex::Regex;
use tracing::debug;

use crate::client::LinearClient;
use crate::consts::DEFAULT_TOKEN_VAR;

static ISSUE_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([A-Z][A-Z0-9]*)-(\d+)$").expect("Failed to compile Linear issue regex"));

static TEAM_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{0,4}$").expect("Failed to compile Linear team key regex"));

const TEAM_KEY_HINT: &str = "Team keys start with a letter and contain only A-Z and 0-9, 1-5 characters.";

/// Whether `value` is a Linear issue identifier such as `ENG-123`
pub fn is_linear_issue(value: &str) -> bool {
  ISSUE_PATTERN.is_match(value.trim())
}

/// Whether `value` is a Linear team key such as `ENG`
pub fn is_team_key(value: &str) -> bool {
  TEAM_KEY_PATTERN.is_match(value.trim())
}

/// Connected Linear adapter
pub struct LinearTracker {
  client: LinearClient,
  team: Option<String>,
}

impl LinearTracker {
  pub fn new(client: LinearClient, team: Option<String>) -> Self {
    Self { client, team }
  }

  /// Split `ENG-123` into team and number, or pair a bare `123` with the
  /// default team.
  pub fn resolve_issue(&self, issue_id: &str) -> Result<(String, u64)> {
    let candidate = issue_id.trim().to_uppercase();

    if let Some(caps) = ISSUE_PATTERN.captures(&candidate) {
      return Ok((caps[1].to_string(), parse_number(issue_id, &caps[2])?));
    }

    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
      let Some(team) = &self.team else {
        return Err(GibrError::Config(format!(
          "Invalid issue id provided: '{issue_id}'. To use numeric issue ids, set 'team' in the [linear] section of \
           .gibrconfig (e.g. team = ENG)."
        )));
      };
      return Ok((team.clone(), parse_number(issue_id, &candidate)?));
    }

    Err(GibrError::Config(format!(
      "Invalid issue id provided: '{issue_id}'. Expected a Linear id like ENG-123."
    )))
  }
}

fn parse_number(issue_id: &str, digits: &str) -> Result<u64> {
  digits
    .parse()
    .map_err(|e| GibrError::Config(format!("Invalid issue number in '{issue_id}': {e}")))
}

impl Tracker for LinearTracker {
  fn display_name(&self) -> &str {
    Linear::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let (team, number) = self.resolve_issue(issue_id)?;
    debug!("Resolved '{}' to Linear issue {}-{}", issue_id, team, number);
    Ok(self.client.get_issue(&team, number)?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let issues = self.client.list_open_issues(self.team.as_deref())?;
    Ok(
      issues
        .into_iter()
        .filter(|issue| !issue.is_completed())
        .map(RawIssue::into_issue)
        .collect(),
    )
  }
}

/// Registry descriptor for Linear
pub struct Linear;

impl TrackerDescriptor for Linear {
  const KEY: &'static str = "linear";
  const DISPLAY_NAME: &'static str = "Linear";
  const NUMERIC_ISSUES: bool = false;

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let token = require(settings, Self::KEY, "token")?;

    let team = optional(settings, "team").map(str::to_uppercase);
    if let Some(team) = &team
      && !is_team_key(team)
    {
      return Err(GibrError::Config(format!("Invalid Linear team key: {team}. {TEAM_KEY_HINT}")));
    }

    let client = LinearClient::new(token)?;
    Ok(Box::new(LinearTracker::new(client, team)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let team = loop {
      let answer = prompter
        .input("Linear team key (optional, e.g. ENG)", Some(""))?
        .trim()
        .to_uppercase();
      if answer.is_empty() || is_team_key(&answer) {
        break answer;
      }
      print_warning(&format!("Invalid Linear team key: {answer}. {TEAM_KEY_HINT}"));
    };
    let token_var = prompter.input("Environment variable for your Linear API key", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    let mut settings = TrackerSettings::from([("token".to_string(), token_reference(&token_var))]);
    if !team.is_empty() {
      settings.insert("team".to_string(), team);
    }
    Ok(settings)
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    describe_rows(
      Self::DISPLAY_NAME,
      &[("Team Key", shown(settings, "team")), ("Token", shown(settings, "token"))],
    )
  }
}

#[cfg(test)]
mod tests {
  use gibr_core::ScriptedPrompter;

  use super::*;

  fn tracker(server: &mockito::Server, team: Option<&str>) -> LinearTracker {
    let client = LinearClient::new("lin_api_test")
      .unwrap()
      .with_endpoint(&format!("{}/graphql", server.url()));
    LinearTracker::new(client, team.map(str::to_string))
  }

  #[test]
  fn test_identifier_formats() {
    assert!(is_linear_issue("ENG-123"));
    assert!(is_linear_issue(" A1-7 "));
    assert!(!is_linear_issue("eng-123"));
    assert!(!is_linear_issue("123"));

    assert!(is_team_key("ENG"));
    assert!(is_team_key("A1234"));
    assert!(!is_team_key("TOOLONG"));
    assert!(!is_team_key("1ENG"));
  }

  #[test]
  fn test_from_config() {
    let token_only = TrackerSettings::from([("token".to_string(), "lin_api_test".to_string())]);
    assert!(Linear::from_config(&token_only).is_ok());

    let err = Linear::from_config(&TrackerSettings::new()).err().unwrap();
    assert_eq!(err.to_string(), "Missing key in 'linear' config: token");

    let mut bad_team = token_only.clone();
    bad_team.insert("team".to_string(), "WAYTOOLONG".to_string());
    let err = Linear::from_config(&bad_team).err().unwrap();
    assert!(matches!(err, GibrError::Config(_)));
  }

  #[test]
  fn test_resolve_issue() {
    let server = mockito::Server::new();
    let with_team = tracker(&server, Some("ENG"));
    assert_eq!(with_team.resolve_issue("42").unwrap(), ("ENG".to_string(), 42));
    assert_eq!(with_team.resolve_issue("ops-7").unwrap(), ("OPS".to_string(), 7));

    let without_team = tracker(&server, None);
    let err = without_team.resolve_issue("42").unwrap_err();
    assert!(matches!(err, GibrError::Config(_)));
    assert!(err.to_string().contains("'team'"));

    assert!(without_team.resolve_issue("ENG-").is_err());
  }

  #[test]
  fn test_get_issue_with_default_team() {
    let mut server = mockito::Server::new();
    server
      .mock("POST", "/graphql")
      .with_status(200)
      .with_body(
        r#"{"data": {"issues": {"nodes": [{"identifier": "ENG-42", "title": "Ship the thing",
            "assignee": {"displayName": "Jane Smith"}}]}}}"#,
      )
      .create();

    let issue = tracker(&server, Some("ENG")).get_issue("42").unwrap();
    assert_eq!(issue.id, "ENG-42");
    assert_eq!(issue.title, "Ship the thing");
    assert_eq!(issue.assignee.as_deref(), Some("jane-smith"));
  }

  #[test]
  fn test_list_issues_skips_completed() {
    let mut server = mockito::Server::new();
    server
      .mock("POST", "/graphql")
      .with_status(200)
      .with_body(
        r#"{"data": {"issues": {"nodes": [
          {"identifier": "ENG-2", "title": "Open", "state": {"name": "Todo", "type": "unstarted"}},
          {"identifier": "ENG-1", "title": "Done", "state": {"name": "Done", "type": "completed"}}
        ]}}}"#,
      )
      .create();

    let issues = tracker(&server, None).list_issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "ENG-2");
  }

  #[test]
  fn test_describe_config_shows_values() {
    let settings = TrackerSettings::from([
      ("token".to_string(), "${LINEAR_TOKEN}".to_string()),
      ("team".to_string(), "ENG".to_string()),
    ]);
    let text = Linear::describe_config(&settings);
    assert!(text.starts_with("Linear:"));
    assert!(text.contains("Team Key"));
    assert!(text.contains("ENG"));
    assert!(text.contains("${LINEAR_TOKEN}"));
  }

  #[test]
  fn test_configure_interactively_retries_team() {
    let mut prompter = ScriptedPrompter::new(["engineering", "eng", "GIBR_LINEAR_TEST_TOKEN_UNSET"]);
    let settings = Linear::configure_interactively(&mut prompter).unwrap();

    assert_eq!(settings.get("team").map(String::as_str), Some("ENG"));
    assert_eq!(
      settings.get("token").map(String::as_str),
      Some("${GIBR_LINEAR_TEST_TOKEN_UNSET}")
    );
  }
}
