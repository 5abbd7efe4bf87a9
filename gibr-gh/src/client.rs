//! # GitHub HTTP Client
//!
//! Blocking HTTP client for the GitHub REST API.

use gibr_core::Result;
use gibr_core::http::{build_client, normalize_base_url};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header;

use crate::consts::{ACCEPT, API_VERSION};
use crate::models::GitHubAuth;

/// Represents a GitHub API client
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: GitHubAuth,
}

impl GitHubClient {
  /// Create a new GitHub client for `base_url`
  pub fn new(base_url: &str, auth: GitHubAuth) -> Result<Self> {
    Ok(Self {
      client: build_client("GitHub")?,
      base_url: normalize_base_url(base_url),
      auth,
    })
  }

  /// Base URL requests are sent to
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// GET `path` with the standard GitHub headers
  pub(crate) fn get(&self, path: &str) -> RequestBuilder {
    self
      .client
      .get(format!("{}{}", self.base_url, path))
      .header(header::ACCEPT, ACCEPT)
      .header("X-GitHub-Api-Version", API_VERSION)
      .bearer_auth(&self.auth.token)
  }
}
