use gibr_core::Result;
use gibr_core::http::{build_client, normalize_base_url};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header;

use crate::models::JiraAuth;

/// Represents a Jira API client
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
  pub(crate) auth: JiraAuth,
}

impl JiraClient {
  /// Create a new Jira client
  pub fn new(base_url: &str, auth: JiraAuth) -> Result<Self> {
    Ok(Self {
      client: build_client("Jira")?,
      base_url: normalize_base_url(base_url),
      auth,
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// GET `path` with basic authentication
  pub(crate) fn get(&self, path: &str) -> RequestBuilder {
    self
      .client
      .get(format!("{}{}", self.base_url, path))
      .header(header::ACCEPT, "application/json")
      .basic_auth(&self.auth.username, Some(&self.auth.api_token))
  }
}

/// Create a Jira client from credentials
pub fn create_jira_client(base_url: &str, username: &str, api_token: &str) -> Result<JiraClient> {
  let auth = JiraAuth {
    username: username.to_string(),
    api_token: api_token.to_string(),
  };

  JiraClient::new(base_url, auth)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_jira_client_creation() {
    let client = create_jira_client("https://test.atlassian.net/", "test_user", "test_token").unwrap();

    assert_eq!(client.base_url(), "https://test.atlassian.net");
    assert_eq!(client.auth.username, "test_user");
    assert_eq!(client.auth.api_token, "test_token");
  }
}
