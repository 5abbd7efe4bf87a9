//! # GitHub Adapter
//!
//! Connects the GitHub client to gibr's tracker traits.

use gibr_core::tracker::{check_token, describe_rows, ensure_numeric_id, optional, require, shown, token_reference};
use gibr_core::{
  GibrError, Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings, print_warning,
};
use tracing::debug;

use crate::client::GitHubClient;
use crate::consts::{API_BASE_URL, DEFAULT_TOKEN_VAR};
use crate::models::GitHubAuth;

/// Connected GitHub adapter for one repository
pub struct GitHubTracker {
  client: GitHubClient,
  owner: String,
  repo: String,
}

impl GitHubTracker {
  pub fn new(client: GitHubClient, owner: &str, repo: &str) -> Self {
    Self {
      client,
      owner: owner.to_string(),
      repo: repo.to_string(),
    }
  }
}

impl Tracker for GitHubTracker {
  fn display_name(&self) -> &str {
    GitHub::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let number = ensure_numeric_id(GitHub::DISPLAY_NAME, issue_id)?;
    Ok(self.client.get_issue(&self.owner, &self.repo, number)?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let issues = self.client.list_open_issues(&self.owner, &self.repo)?;
    Ok(issues.into_iter().map(RawIssue::into_issue).collect())
  }
}

/// Split `owner/repo`, rejecting anything else.
pub fn parse_repo(repo: &str) -> Result<(&str, &str)> {
  match repo.trim().split_once('/') {
    Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok((owner, name)),
    _ => Err(GibrError::Config(format!(
      "Invalid GitHub repo '{repo}', expected 'owner/repo'."
    ))),
  }
}

/// Registry descriptor for GitHub
pub struct GitHub;

impl TrackerDescriptor for GitHub {
  const KEY: &'static str = "github";
  const DISPLAY_NAME: &'static str = "GitHub";

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let repo = require(settings, Self::KEY, "repo")?;
    let token = require(settings, Self::KEY, "token")?;
    let api_url = optional(settings, "api_url").unwrap_or(API_BASE_URL);
    let (owner, name) = parse_repo(repo)?;

    debug!("Connecting to GitHub repository {}/{} at {}", owner, name, api_url);
    let client = GitHubClient::new(
      api_url,
      GitHubAuth {
        token: token.to_string(),
      },
    )?;
    Ok(Box::new(GitHubTracker::new(client, owner, name)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let repo = loop {
      let repo = prompter.input("GitHub repository (e.g. owner/repo)", None)?;
      if parse_repo(&repo).is_ok() {
        break repo;
      }
      print_warning("Repository must look like 'owner/repo'.");
    };
    let token_var = prompter.input("Environment variable for your GitHub token", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    Ok(TrackerSettings::from([
      ("repo".to_string(), repo),
      ("token".to_string(), token_reference(&token_var)),
    ]))
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    let mut rows = vec![("Repo", shown(settings, "repo")), ("Token", shown(settings, "token"))];
    if let Some(api_url) = settings.get("api_url") {
      rows.push(("API URL", api_url.as_str()));
    }
    describe_rows(Self::DISPLAY_NAME, &rows)
  }
}
