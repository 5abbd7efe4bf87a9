//! # GraphQL Client
//!
//! Minimal blocking GraphQL transport shared by the Linear and Monday.com
//! adapters.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::error::{GibrError, Result};
use crate::http::{build_client, send};

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
  data: Option<T>,
  #[serde(default)]
  errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
  message: String,
}

/// Blocking GraphQL client for one endpoint
pub struct GraphQlClient {
  pub(crate) client: Client,
  pub(crate) endpoint: String,
  tracker: String,
  authorization: String,
  extra_headers: Vec<(&'static str, String)>,
}

impl GraphQlClient {
  /// Create a client that sends `authorization` verbatim in the
  /// `Authorization` header.
  pub fn new(tracker: &str, endpoint: &str, authorization: &str) -> Result<Self> {
    Ok(Self {
      client: build_client(tracker)?,
      endpoint: endpoint.to_string(),
      tracker: tracker.to_string(),
      authorization: authorization.to_string(),
      extra_headers: Vec::new(),
    })
  }

  /// Send `name: value` with every request.
  pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
    self.extra_headers.push((name, value.to_string()));
    self
  }

  /// Point the client at a different endpoint.
  pub fn set_endpoint(&mut self, endpoint: &str) {
    self.endpoint = endpoint.to_string();
  }

  pub fn endpoint(&self) -> &str {
    &self.endpoint
  }

  /// Execute `query` with `variables` and decode the `data` object.
  #[instrument(skip(self, query, variables), fields(tracker = %self.tracker), level = "debug")]
  pub fn request<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T> {
    let mut request = self
      .client
      .post(&self.endpoint)
      .header(AUTHORIZATION, &self.authorization)
      .header(CONTENT_TYPE, "application/json")
      .json(&json!({ "query": query, "variables": variables }));
    for (name, value) in &self.extra_headers {
      request = request.header(*name, value);
    }

    let response = send(&self.tracker, request)?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().unwrap_or_default();
      debug!("GraphQL request failed with HTTP {}", status);
      return Err(GibrError::remote(&self.tracker, format!("HTTP {status} - {body}")));
    }

    let payload: GraphQlResponse<T> = response
      .json()
      .map_err(|e| GibrError::remote(&self.tracker, format!("Failed to parse response: {e}")))?;

    if !payload.errors.is_empty() {
      let messages: Vec<String> = payload.errors.into_iter().map(|e| e.message).collect();
      return Err(GibrError::remote(&self.tracker, messages.join("; ")));
    }

    payload
      .data
      .ok_or_else(|| GibrError::remote(&self.tracker, "Response contained no data"))
  }
}
