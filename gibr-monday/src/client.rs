//! # Monday.com GraphQL Client
//!
//! Reads board items through the shared GraphQL transport. The API token is
//! sent as-is in the `Authorization` header and the API version is pinned.

use gibr_core::graphql::GraphQlClient;
use gibr_core::{GibrError, Result};
use serde_json::json;
use tracing::{debug, instrument};

use crate::consts::{API_URL, API_VERSION, MAX_RESULTS};
use crate::models::{BoardsData, ItemsData, MondayItem};

const ITEM_FIELDS: &str = "id name board { id } column_values { id type text }";

/// Represents a Monday.com API client
pub struct MondayClient {
  graphql: GraphQlClient,
}

impl MondayClient {
  pub fn new(token: &str) -> Result<Self> {
    Ok(Self {
      graphql: GraphQlClient::new("Monday.com", API_URL, token)?.with_header("API-Version", API_VERSION),
    })
  }

  /// Send requests to `endpoint` instead of the public API.
  pub fn with_endpoint(mut self, endpoint: &str) -> Self {
    self.graphql.set_endpoint(endpoint);
    self
  }

  /// Get a single item, checking that it lives on `board_id`.
  #[instrument(skip(self), level = "debug")]
  pub fn get_item(&self, board_id: u64, item_id: u64) -> Result<MondayItem> {
    let query = format!("query ItemById($item_id: [ID!]) {{ items(ids: $item_id) {{ {ITEM_FIELDS} }} }}");
    let data: ItemsData = self.graphql.request(&query, json!({ "item_id": [item_id] }))?;

    data
      .items
      .into_iter()
      .find(|item| item.belongs_to(board_id))
      .ok_or_else(|| GibrError::not_found(item_id.to_string(), format!("Monday.com board {board_id}")))
  }

  /// List board items, most recently updated first.
  #[instrument(skip(self), level = "debug")]
  pub fn list_items(&self, board_id: u64) -> Result<Vec<MondayItem>> {
    let query = format!(
      "query BoardItems($board_id: [ID!], $limit: Int!) {{ boards(ids: $board_id) {{ \
       items_page(limit: $limit, query_params: {{ \
       order_by: [{{ column_id: \"__last_updated__\", direction: desc }}] }}) \
       {{ items {{ {ITEM_FIELDS} }} }} }} }}"
    );
    let data: BoardsData = self
      .graphql
      .request(&query, json!({ "board_id": [board_id], "limit": MAX_RESULTS }))?;

    let board = data.boards.into_iter().next().ok_or_else(|| {
      GibrError::remote(
        "Monday.com",
        format!("Board {board_id} not found or not accessible with this token"),
      )
    })?;

    debug!("Board {} returned {} items", board_id, board.items_page.items.len());
    Ok(board.items_page.items)
  }
}
