use gibr_core::text::slugify;
use gibr_core::{Issue, RawIssue};
use serde::Deserialize;

use crate::consts::{DONE_STATUSES, PEOPLE_COLUMN, STATUS_COLUMN};

/// One column cell of a board item
#[derive(Debug, Deserialize)]
pub struct ColumnValue {
  pub id: String,
  #[serde(rename = "type", default)]
  pub column_type: Option<String>,
  #[serde(default)]
  pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BoardRef {
  pub id: String,
}

/// Represents a Monday.com board item
#[derive(Debug, Deserialize)]
pub struct MondayItem {
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub board: Option<BoardRef>,
  #[serde(default)]
  pub column_values: Vec<ColumnValue>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsData {
  #[serde(default)]
  pub items: Vec<MondayItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ItemsPage {
  #[serde(default)]
  pub items: Vec<MondayItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Board {
  pub items_page: ItemsPage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BoardsData {
  #[serde(default)]
  pub boards: Vec<Board>,
}

impl MondayItem {
  /// Text of the first column of `column_type`, if filled in
  fn column_text(&self, column_type: &str) -> Option<&str> {
    self
      .column_values
      .iter()
      .find(|column| column.column_type.as_deref() == Some(column_type))
      .and_then(|column| column.text.as_deref())
      .map(str::trim)
      .filter(|text| !text.is_empty())
  }

  pub fn status(&self) -> Option<&str> {
    self.column_text(STATUS_COLUMN)
  }

  pub fn is_done(&self) -> bool {
    self
      .status()
      .is_some_and(|status| DONE_STATUSES.iter().any(|done| done.eq_ignore_ascii_case(status)))
  }

  pub fn belongs_to(&self, board_id: u64) -> bool {
    self
      .board
      .as_ref()
      .is_none_or(|board| board.id == board_id.to_string())
  }
}

impl RawIssue for MondayItem {
  fn assignee(&self) -> Option<String> {
    let people = self.column_text(PEOPLE_COLUMN)?;
    people
      .split(',')
      .map(slugify)
      .find(|slug| !slug.is_empty())
  }

  fn into_issue(self) -> Issue {
    let assignee = self.assignee();
    Issue::new(self.id, self.name).with_assignee(assignee)
  }
}
