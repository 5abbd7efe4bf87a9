//! # GitLab HTTP Client
//!
//! Blocking client for the GitLab REST API v4, authenticated with a
//! `PRIVATE-TOKEN` header.

use gibr_core::http::{build_client, normalize_base_url, read_json, send};
use gibr_core::{GibrError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::models::GitLabIssue;

/// Page size used when listing issues
pub const PER_PAGE: usize = 100;

/// Upper bound on pages fetched by a single listing
pub const MAX_PAGES: usize = 20;

/// Represents a GitLab API client
pub struct GitLabClient {
  pub(crate) client: Client,
  pub(crate) api_url: String,
  token: String,
}

impl GitLabClient {
  /// Create a client for the instance at `base_url` (e.g. `https://gitlab.com`)
  pub fn new(base_url: &str, token: &str) -> Result<Self> {
    Ok(Self {
      client: build_client("GitLab")?,
      api_url: format!("{}/api/v4", normalize_base_url(base_url)),
      token: token.to_string(),
    })
  }

  pub fn api_url(&self) -> &str {
    &self.api_url
  }

  fn get(&self, path: &str) -> RequestBuilder {
    self
      .client
      .get(format!("{}{}", self.api_url, path))
      .header("PRIVATE-TOKEN", &self.token)
  }

  /// Get an issue by its project-scoped number.
  #[instrument(skip(self), level = "debug")]
  pub fn get_issue(&self, project: &str, iid: u64) -> Result<GitLabIssue> {
    let path = format!("/projects/{}/issues/{iid}", encode_project(project));
    let response = send("GitLab", self.get(&path))?;
    read_json("GitLab", response, || {
      GibrError::not_found(iid.to_string(), format!("GitLab project {project}"))
    })
  }

  /// List open issues, most recently updated first, following pagination.
  #[instrument(skip(self), level = "debug")]
  pub fn list_open_issues(&self, project: &str) -> Result<Vec<GitLabIssue>> {
    let path = format!("/projects/{}/issues", encode_project(project));
    let per_page = PER_PAGE.to_string();
    let mut issues = Vec::new();

    for page in 1..=MAX_PAGES {
      let page_param = page.to_string();
      let request = self.get(&path).query(&[
        ("state", "opened"),
        ("order_by", "updated_at"),
        ("sort", "desc"),
        ("per_page", per_page.as_str()),
        ("page", page_param.as_str()),
      ]);
      let response = send("GitLab", request)?;
      let batch: Vec<GitLabIssue> = read_json("GitLab", response, || {
        GibrError::remote("GitLab", format!("Project {project} not found"))
      })?;

      let last_page = batch.len() < PER_PAGE;
      debug!("Fetched {} issues from page {}", batch.len(), page);
      issues.extend(batch);
      if last_page {
        break;
      }
    }

    Ok(issues)
  }
}

/// Percent-encode a `group/project` path for use as a project id.
pub fn encode_project(project: &str) -> String {
  form_urlencoded::byte_serialize(project.trim().as_bytes()).collect()
}
