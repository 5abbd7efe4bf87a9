//! # Jira Adapter
//!
//! Resolves user-supplied ids into Jira keys and connects the Jira client to
//! gibr's tracker traits.

use std::sync::LazyLock;

use gibr_core::tracker::{check_token, describe_rows, optional, require, shown, token_reference};
use gibr_core::{
  GibrError, Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings, print_warning,
};
use regex::Regex;
use tracing::debug;

use crate::client::{JiraClient, create_jira_client};
use crate::consts::DEFAULT_TOKEN_VAR;
use crate::endpoints::issues::open_issues_jql;

static ISSUE_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*-\d+$").expect("Failed to compile Jira issue key regex"));

static PROJECT_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").expect("Failed to compile Jira project key regex"));

/// Whether `value` is a full Jira issue key such as `PROJ-123`
pub fn is_issue_key(value: &str) -> bool {
  ISSUE_KEY_PATTERN.is_match(value)
}

/// Whether `value` is a valid Jira project key such as `PROJ`
pub fn is_project_key(value: &str) -> bool {
  PROJECT_KEY_PATTERN.is_match(value)
}

/// Connected Jira adapter
pub struct JiraTracker {
  client: JiraClient,
  project_key: Option<String>,
}

impl JiraTracker {
  pub fn new(client: JiraClient, project_key: Option<String>) -> Self {
    Self { client, project_key }
  }

  /// Turn `PROJ-123`, `proj-123` or a bare `123` into a full issue key.
  pub fn resolve_issue_key(&self, issue_id: &str) -> Result<String> {
    let candidate = issue_id.trim().to_uppercase();
    if is_issue_key(&candidate) {
      return Ok(candidate);
    }

    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
      return match &self.project_key {
        Some(project) => Ok(format!("{project}-{candidate}")),
        None => Err(GibrError::Config(format!(
          "Invalid issue id provided: '{issue_id}'. Use a full key like PROJ-{candidate} or set 'project_key' in \
           the [jira] section of .gibrconfig."
        ))),
      };
    }

    Err(GibrError::Config(format!(
      "Invalid issue id provided: '{issue_id}'. Expected a Jira key like PROJ-123."
    )))
  }

  fn scope(&self) -> String {
    match &self.project_key {
      Some(project) => format!("Jira project {project}"),
      None => "Jira instance".to_string(),
    }
  }
}

impl Tracker for JiraTracker {
  fn display_name(&self) -> &str {
    Jira::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let key = self.resolve_issue_key(issue_id)?;
    debug!("Resolved '{}' to Jira key {}", issue_id, key);
    Ok(self.client.get_issue(&key, &self.scope())?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let jql = open_issues_jql(self.project_key.as_deref());
    let issues = self.client.search_issues(&jql)?;
    Ok(
      issues
        .into_iter()
        .filter(|issue| !issue.is_done())
        .map(RawIssue::into_issue)
        .collect(),
    )
  }
}

/// Registry descriptor for Jira
pub struct Jira;

impl TrackerDescriptor for Jira {
  const KEY: &'static str = "jira";
  const DISPLAY_NAME: &'static str = "Jira";
  const NUMERIC_ISSUES: bool = false;

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let url = require(settings, Self::KEY, "url")?;
    let user = require(settings, Self::KEY, "user")?;
    let token = require(settings, Self::KEY, "token")?;

    let project_key = optional(settings, "project_key").map(str::to_uppercase);
    if let Some(project) = &project_key
      && !is_project_key(project)
    {
      return Err(GibrError::Config(format!(
        "Invalid Jira project key '{project}'. Keys start with a letter followed by letters, digits or '_'."
      )));
    }

    let client = create_jira_client(url, user, token)?;
    Ok(Box::new(JiraTracker::new(client, project_key)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let url = prompter.input("Jira base URL (e.g. https://yourcompany.atlassian.net)", None)?;
    let project_key = loop {
      let answer = prompter
        .input("Default Jira project key (optional, e.g. PROJ)", Some(""))?
        .to_uppercase();
      if answer.is_empty() || is_project_key(&answer) {
        break answer;
      }
      print_warning("Project keys start with a letter followed by letters, digits or '_'.");
    };
    let user = prompter.input("Jira user (usually your email)", None)?;
    let token_var = prompter.input("Environment variable for your Jira API token", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    let mut settings = TrackerSettings::from([
      ("url".to_string(), url),
      ("user".to_string(), user),
      ("token".to_string(), token_reference(&token_var)),
    ]);
    if !project_key.is_empty() {
      settings.insert("project_key".to_string(), project_key);
    }
    Ok(settings)
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    describe_rows(
      Self::DISPLAY_NAME,
      &[
        ("URL", shown(settings, "url")),
        ("Project Key", shown(settings, "project_key")),
        ("User", shown(settings, "user")),
        ("Token", shown(settings, "token")),
      ],
    )
  }
}
