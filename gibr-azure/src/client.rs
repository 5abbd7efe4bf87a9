//! # Azure DevOps HTTP Client
//!
//! Blocking client for the Work Item Tracking REST API, authenticated with a
//! personal access token over basic auth.

use gibr_core::http::{build_client, normalize_base_url, read_json, send};
use gibr_core::{GibrError, Result};
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use crate::consts::{API_VERSION, FIELDS, MAX_RESULTS};
use crate::models::{WiqlResult, WorkItem, WorkItemList};

/// Represents an Azure DevOps API client for one project
pub struct AzureClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
  pub(crate) project: String,
  pub(crate) team: String,
  token: String,
}

impl AzureClient {
  /// Create a client for the organization at `org_url`
  pub fn new(org_url: &str, token: &str, project: &str, team: &str) -> Result<Self> {
    let base = normalize_base_url(org_url);
    let base_url = Url::parse(&format!("{base}/"))
      .map_err(|e| GibrError::connection("Azure DevOps", format!("Invalid URL '{org_url}': {e}")))?;

    Ok(Self {
      client: build_client("Azure DevOps")?,
      base_url,
      project: project.to_string(),
      team: team.to_string(),
      token: token.to_string(),
    })
  }

  fn endpoint(&self, segments: &[&str]) -> Result<Url> {
    let mut url = self.base_url.clone();
    url
      .path_segments_mut()
      .map_err(|()| GibrError::connection("Azure DevOps", format!("Invalid base URL '{}'", self.base_url)))?
      .pop_if_empty()
      .extend(segments);
    url.query_pairs_mut().append_pair("api-version", API_VERSION);
    Ok(url)
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    request.basic_auth("", Some(&self.token))
  }

  /// Get a single work item.
  #[instrument(skip(self), level = "debug")]
  pub fn get_work_item(&self, id: u64) -> Result<WorkItem> {
    let id_segment = id.to_string();
    let url = self.endpoint(&[&self.project, "_apis", "wit", "workitems", &id_segment])?;
    let response = send("Azure DevOps", self.authorize(self.client.get(url)))?;
    read_json("Azure DevOps", response, || {
      GibrError::not_found(
        id.to_string(),
        format!("Azure DevOps project {} for team {}", self.project, self.team),
      )
    })
  }

  /// Run a WIQL query in the team's context, returning work item ids.
  #[instrument(skip(self), level = "debug")]
  pub fn query_ids(&self, query: &str) -> Result<Vec<u64>> {
    let mut url = self.endpoint(&[&self.project, &self.team, "_apis", "wit", "wiql"])?;
    url.query_pairs_mut().append_pair("$top", &MAX_RESULTS.to_string());

    let request = self.authorize(self.client.post(url)).json(&json!({ "query": query }));
    let response = send("Azure DevOps", request)?;
    let result: WiqlResult = read_json("Azure DevOps", response, || {
      GibrError::remote(
        "Azure DevOps",
        format!("Project '{}' or team '{}' not found", self.project, self.team),
      )
    })?;

    let ids: Vec<u64> = result.work_items.into_iter().map(|r| r.id).take(MAX_RESULTS).collect();
    debug!("WIQL query matched {} work items", ids.len());
    Ok(ids)
  }

  /// Fetch several work items, returned in the order of `ids`.
  #[instrument(skip(self), level = "debug")]
  pub fn get_work_items(&self, ids: &[u64]) -> Result<Vec<WorkItem>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }

    let joined: Vec<String> = ids.iter().map(u64::to_string).collect();
    let mut url = self.endpoint(&[&self.project, "_apis", "wit", "workitems"])?;
    url
      .query_pairs_mut()
      .append_pair("ids", &joined.join(","))
      .append_pair("fields", FIELDS);

    let response = send("Azure DevOps", self.authorize(self.client.get(url)))?;
    let list: WorkItemList = read_json("Azure DevOps", response, || {
      GibrError::remote("Azure DevOps", format!("Project '{}' not found", self.project))
    })?;

    let mut items = list.value;
    items.sort_by_key(|item| ids.iter().position(|id| *id == item.id).unwrap_or(usize::MAX));
    Ok(items)
  }
}
