//! GitHub Issues API endpoint implementations.

use gibr_core::http::{read_json, send};
use gibr_core::{GibrError, Result};
use tracing::{debug, info, instrument, trace};

use crate::client::GitHubClient;
use crate::consts::PER_PAGE;
use crate::models::GitHubIssue;

impl GitHubClient {
  /// Get a specific issue by number.
  ///
  /// # Errors
  ///
  /// Returns [`GibrError::IssueNotFound`] when the repository has no such
  /// issue and [`GibrError::RemoteApi`] for authentication, transport and
  /// decoding failures.
  #[instrument(skip(self), level = "debug")]
  pub fn get_issue(&self, owner: &str, repo: &str, issue_number: u64) -> Result<GitHubIssue> {
    info!("Fetching issue #{} for {}/{}", issue_number, owner, repo);

    let path = format!("/repos/{owner}/{repo}/issues/{issue_number}");
    trace!("GitHub API path: {}", path);

    let response = send("GitHub", self.get(&path))?;
    let issue: GitHubIssue = read_json("GitHub", response, || {
      GibrError::not_found(issue_number.to_string(), format!("GitHub repository {owner}/{repo}"))
    })?;
    trace!("Issue: {:?}", issue);
    Ok(issue)
  }

  /// List open issues, most recently updated first, without pull requests.
  #[instrument(skip(self), level = "debug")]
  pub fn list_open_issues(&self, owner: &str, repo: &str) -> Result<Vec<GitHubIssue>> {
    let path = format!("/repos/{owner}/{repo}/issues");
    let per_page = PER_PAGE.to_string();

    let request = self.get(&path).query(&[
      ("state", "open"),
      ("sort", "updated"),
      ("direction", "desc"),
      ("per_page", per_page.as_str()),
    ]);
    let response = send("GitHub", request)?;
    let items: Vec<GitHubIssue> = read_json("GitHub", response, || {
      GibrError::remote("GitHub", format!("Repository {owner}/{repo} not found"))
    })?;

    let total = items.len();
    let issues: Vec<GitHubIssue> = items.into_iter().filter(|item| !item.is_pull_request()).collect();
    debug!("Fetched {} items, {} after dropping pull requests", total, issues.len());
    Ok(issues)
  }
}
