//! # HTTP Helpers
//!
//! Shared plumbing for the REST tracker clients: building the blocking
//! client, sending requests and mapping HTTP status codes onto
//! [`GibrError`] variants.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::trace;

use crate::consts::USER_AGENT;
use crate::error::{GibrError, Result};

/// Build the blocking HTTP client used by a tracker adapter.
pub fn build_client(tracker: &str) -> Result<Client> {
  Client::builder()
    .user_agent(USER_AGENT)
    .build()
    .map_err(|e| GibrError::connection(tracker, e.to_string()))
}

/// Send a request, reporting transport failures as remote API errors.
pub fn send(tracker: &str, request: RequestBuilder) -> Result<Response> {
  let response = request
    .send()
    .map_err(|e| GibrError::remote(tracker, format!("Failed to reach {tracker}: {e}")))?;
  trace!("{} responded with HTTP {}", tracker, response.status());
  Ok(response)
}

/// Decode a JSON response, mapping error statuses.
///
/// `on_not_found` produces the error for HTTP 404 so callers can attach the
/// issue id and scope.
pub fn read_json<T, F>(tracker: &str, response: Response, on_not_found: F) -> Result<T>
where
  T: DeserializeOwned,
  F: FnOnce() -> GibrError,
{
  let status = response.status();
  match status {
    s if s.is_success() => response
      .json::<T>()
      .map_err(|e| GibrError::remote(tracker, format!("Failed to parse response: {e}"))),
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(GibrError::remote(
      tracker,
      format!("Authentication failed (HTTP {status}). Please check your {tracker} credentials."),
    )),
    StatusCode::NOT_FOUND => Err(on_not_found()),
    _ => Err(GibrError::remote(
      tracker,
      format!("Unexpected error: HTTP {status} - {}", response.text().unwrap_or_default()),
    )),
  }
}

/// Strip trailing slashes from a configured base URL.
pub fn normalize_base_url(url: &str) -> String {
  url.trim().trim_end_matches('/').to_string()
}
