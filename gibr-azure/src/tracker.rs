use gibr_core::tracker::{check_token, describe_rows, ensure_numeric_id, optional, require, shown, token_reference};
use gibr_core::{Issue, Prompter, RawIssue, Result, Tracker, TrackerDescriptor, TrackerSettings};
use tracing::debug;

use crate::client::AzureClient;
use crate::consts::{DEFAULT_TOKEN_VAR, DEFAULT_URL};
use crate::wiql::{current_iteration_query, parse_closed_states};

/// Connected Azure DevOps adapter for one project and team
pub struct AzureTracker {
  client: AzureClient,
  closed_states: Vec<String>,
}

impl AzureTracker {
  pub fn new(client: AzureClient, closed_states: Vec<String>) -> Self {
    Self { client, closed_states }
  }

  pub fn closed_states(&self) -> &[String] {
    &self.closed_states
  }
}

impl Tracker for AzureTracker {
  fn display_name(&self) -> &str {
    Azure::DISPLAY_NAME
  }

  fn get_issue(&self, issue_id: &str) -> Result<Issue> {
    let id = ensure_numeric_id(Azure::DISPLAY_NAME, issue_id)?;
    Ok(self.client.get_work_item(id)?.into_issue())
  }

  fn list_issues(&self) -> Result<Vec<Issue>> {
    let query = current_iteration_query(&self.client.project, &self.client.team, &self.closed_states);
    debug!("WIQL: {}", query);

    let ids = self.client.query_ids(&query)?;
    let items = self.client.get_work_items(&ids)?;
    Ok(
      items
        .into_iter()
        .filter(|item| !item.is_closed(&self.closed_states))
        .map(RawIssue::into_issue)
        .collect(),
    )
  }
}

/// Registry descriptor for Azure DevOps
pub struct Azure;

impl TrackerDescriptor for Azure {
  const KEY: &'static str = "azure";
  const DISPLAY_NAME: &'static str = "Azure DevOps";

  fn from_config(settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    let url = require(settings, Self::KEY, "url")?;
    let token = require(settings, Self::KEY, "token")?;
    let project = require(settings, Self::KEY, "project")?;
    let team = require(settings, Self::KEY, "team")?;
    let closed_states = parse_closed_states(optional(settings, "closed_states"))?;

    let client = AzureClient::new(url, token, project, team)?;
    Ok(Box::new(AzureTracker::new(client, closed_states)))
  }

  fn configure_interactively(prompter: &mut dyn Prompter) -> Result<TrackerSettings> {
    let url = prompter.input("Azure base URL (e.g. https://dev.azure.com/YOURORG)", Some(DEFAULT_URL))?;
    let project = prompter.input("Azure project name (e.g. project)", None)?;
    let team = prompter.input("Team name for issues (e.g. team)", None)?;
    let token_var = prompter.input("Environment variable for your Azure token", Some(DEFAULT_TOKEN_VAR))?;
    check_token(Self::DISPLAY_NAME, &token_var);

    Ok(TrackerSettings::from([
      ("url".to_string(), url),
      ("project".to_string(), project),
      ("team".to_string(), team),
      ("token".to_string(), token_reference(&token_var)),
    ]))
  }

  fn describe_config(settings: &TrackerSettings) -> String {
    let mut rows = vec![
      ("URL", shown(settings, "url")),
      ("Project", shown(settings, "project")),
      ("Team", shown(settings, "team")),
      ("Token", shown(settings, "token")),
    ];
    if let Some(states) = settings.get("closed_states") {
      rows.push(("Closed States", states.as_str()));
    }
    describe_rows(Self::DISPLAY_NAME, &rows)
  }
}
