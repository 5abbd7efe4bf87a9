use gibr_core::tracker::{check_token, describe_rows, ensure_numeric_id, require, shown, token_reference};
use gibr_core::{Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings};

use crate::client::GitLabClient;

/// Instance offered by `gibr init`
pub const DEFAULT_URL: &str = "https://gitlab.com";

/// Environment variable suggested for the token
pub const DEFAULT_TOKEN_VAR: &str = "GITLAB_TOKEN";

/// Connected GitLab adapter for one project
pub struct GitLabTracker {
  client: GitLabClient,
  project: String,
}

impl GitLabTracker {
  pub fn new(client: GitLabClient, project: &str) -> Self {
    Self {
      client,
      project: project.trim().to_string(),
    }
  }
}

impl Tracker for GitLabTracker {
  fn display_name(&self) -> &str {
    GitLab::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let iid = ensure_numeric_id(GitLab::DISPLAY_NAME, issue_id)?;
    Ok(self.client.get_issue(&self.project, iid)?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let issues = self.client.list_open_issues(&self.project)?;
    Ok(
      issues
        .into_iter()
        .filter(|issue| !issue.is_closed())
        .map(RawIssue::into_issue)
        .collect(),
    )
  }
}

/// Registry descriptor for GitLab
pub struct GitLab;

impl TrackerDescriptor for GitLab {
  const KEY: &'static str = "gitlab";
  const DISPLAY_NAME: &'static str = "GitLab";

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let url = require(settings, Self::KEY, "url")?;
    let token = require(settings, Self::KEY, "token")?;
    let project = require(settings, Self::KEY, "project")?;

    let client = GitLabClient::new(url, token)?;
    Ok(Box::new(GitLabTracker::new(client, project)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let url = prompter.input("GitLab base URL", Some(DEFAULT_URL))?;
    let project = prompter.input("GitLab project path or id (e.g. group/project)", None)?;
    let token_var = prompter.input("Environment variable for your GitLab token", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    Ok(TrackerSettings::from([
      ("url".to_string(), url),
      ("project".to_string(), project),
      ("token".to_string(), token_reference(&token_var)),
    ]))
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    describe_rows(
      Self::DISPLAY_NAME,
      &[
        ("URL", shown(settings, "url")),
        ("Project", shown(settings, "project")),
        ("Token", shown(settings, "token")),
      ],
    )
  }
}

#[cfg(test)]
mod tests {
  use gibr_core::{GibrError, ScriptedPrompter};
  use mockito::Matcher;

  use super::*;

  fn settings(url: &str) -> TrackerSettings {
    TrackerSettings::from([
      ("url".to_string(), url.to_string()),
      ("token".to_string(), "glpat-test".to_string()),
      ("project".to_string(), "group/proj".to_string()),
    ])
  }

  #[test]
  fn test_from_config_requires_each_key() {
    assert!(GitLab::from_config(&settings(DEFAULT_URL)).is_ok());

    for key in ["url", "token", "project"] {
      let mut partial = settings(DEFAULT_URL);
      partial.remove(key);
      let err = GitLab::from_config(&partial).err().unwrap();
      assert_eq!(err.to_string(), format!("Missing key in 'gitlab' config: {key}"));
    }
  }

  #[test]
  fn test_get_issue_not_found_names_project() {
    let mut server = mockito::Server::new();
    server
      .mock("GET", Matcher::Regex(r"^/api/v4/projects/.*/issues/404$".to_string()))
      .with_status(404)
      .with_body(r#"{"message": "404 Not found"}"#)
      .create();

    let tracker = GitLab::from_config(&settings(&server.url())).unwrap();
    let err = tracker.get_issue("404").unwrap_err();
    assert!(matches!(err, GibrError::IssueNotFound { .. }));
    assert_eq!(err.to_string(), "Issue 404 not found in GitLab project group/proj.");
  }

  #[test]
  fn test_list_issues_skips_closed() {
    let mut server = mockito::Server::new();
    server
      .mock("GET", Matcher::Regex(r"^/api/v4/projects/.*/issues".to_string()))
      .match_query(Matcher::Any)
      .with_status(200)
      .with_body(r#"[{"iid": 2, "title": "Open", "state": "opened"}, {"iid": 1, "title": "Shut", "state": "closed"}]"#)
      .create();

    let tracker = GitLab::from_config(&settings(&server.url())).unwrap();
    let issues = tracker.list_issues().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "2");
  }

  #[test]
  fn test_describe_config_shows_values() {
    let text = GitLab::describe_config(&settings(DEFAULT_URL));
    for value in ["GitLab:", DEFAULT_URL, "group/proj", "glpat-test"] {
      assert!(text.contains(value), "missing {value}");
    }
  }

  #[test]
  fn test_configure_interactively_uses_defaults() {
    let mut prompter = ScriptedPrompter::new(["", "group/proj", ""]);
    let settings = GitLab::configure_interactively(&mut prompter).unwrap();

    assert_eq!(settings.get("url").map(String::as_str), Some(DEFAULT_URL));
    assert_eq!(settings.get("project").map(String::as_str), Some("group/proj"));
    assert_eq!(settings.get("token").map(String::as_str), Some("${GITLAB_TOKEN}"));
  }
}
