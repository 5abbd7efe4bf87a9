use gibr_core::tracker::{check_token, describe_rows, ensure_numeric_id, require, shown, token_reference};
use gibr_core::{
  GibrError, Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings, print_warning,
};

use crate::client::MondayClient;
use crate::consts::DEFAULT_TOKEN_VAR;

/// Connected Monday.com adapter for one board
pub struct MondayTracker {
  client: MondayClient,
  board_id: u64,
}

impl MondayTracker {
  pub fn new(client: MondayClient, board_id: u64) -> Self {
    Self { client, board_id }
  }
}

/// Parse a board id, which must be all digits.
pub fn parse_board_id(value: &str) -> Result<u64> {
  let trimmed = value.trim();
  if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
    return Err(GibrError::Config(format!(
      "Invalid Monday.com board id '{value}', expected a number."
    )));
  }
  trimmed
    .parse()
    .map_err(|e| GibrError::Config(format!("Invalid Monday.com board id '{value}': {e}")))
}

impl Tracker for MondayTracker {
  fn display_name(&self) -> &str {
    Monday::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let item_id = ensure_numeric_id(Monday::DISPLAY_NAME, issue_id)?;
    Ok(self.client.get_item(self.board_id, item_id)?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let items = self.client.list_items(self.board_id)?;
    Ok(
      items
        .into_iter()
        .filter(|item| !item.is_done())
        .map(RawIssue::into_issue)
        .collect(),
    )
  }
}

/// Registry descriptor for Monday.com
pub struct Monday;

impl TrackerDescriptor for Monday {
  const KEY: &'static str = "monday";
  const DISPLAY_NAME: &'static str = "Monday.com";

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let token = require(settings, Self::KEY, "token")?;
    let board_id = parse_board_id(require(settings, Self::KEY, "board_id")?)?;

    let client = MondayClient::new(token)?;
    Ok(Box::new(MondayTracker::new(client, board_id)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let board_id = loop {
      let answer = prompter.input("Monday.com board id (the number in the board URL)", None)?;
      match parse_board_id(&answer) {
        Ok(id) => break id,
        Err(e) => print_warning(&e.to_string()),
      }
    };
    let token_var = prompter.input("Environment variable for your Monday.com API token", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    Ok(TrackerSettings::from([
      ("board_id".to_string(), board_id.to_string()),
      ("token".to_string(), token_reference(&token_var)),
    ]))
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    describe_rows(
      Self::DISPLAY_NAME,
      &[
        ("Board ID", shown(settings, "board_id")),
        ("Token", shown(settings, "token")),
      ],
    )
  }
}
