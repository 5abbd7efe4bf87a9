//! WIQL query construction and `closed_states` parsing.

use gibr_core::{GibrError, Result};

use crate::consts::DEFAULT_CLOSED_STATES;

/// Quote a value for a WIQL string literal.
fn quote(value: &str) -> String {
  format!("'{}'", value.replace('\'', "''"))
}

/// Query selecting the team's open work items in the current iteration,
/// most recently changed first.
pub fn current_iteration_query(project: &str, team: &str, closed_states: &[String]) -> String {
  let iteration = quote(&format!("[{project}]\\{team}"));
  let mut query = format!(
    "SELECT [System.Id] FROM WorkItems WHERE [System.IterationPath] = @CurrentIteration({iteration}) AND \
     [System.TeamProject] = {}",
    quote(project)
  );
  if !closed_states.is_empty() {
    let states: Vec<String> = closed_states.iter().map(|s| quote(s)).collect();
    query.push_str(&format!(" AND [System.State] NOT IN ({})", states.join(", ")));
  }
  query.push_str(" ORDER BY [System.ChangedDate] DESC");
  query
}

/// Parse `closed_states` given as a JSON list or a comma separated list.
///
/// A missing or blank value yields the default states.
pub fn parse_closed_states(raw: Option<&str>) -> Result<Vec<String>> {
  let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
    return Ok(DEFAULT_CLOSED_STATES.iter().map(|s| s.to_string()).collect());
  };

  let states: Vec<String> = if raw.starts_with('[') {
    serde_json::from_str(raw)
      .map_err(|e| GibrError::Config(format!("Unrecognized list format for closed_states: {raw} ({e})")))?
  } else {
    raw.split(',').map(|s| s.trim().to_string()).collect()
  };

  let states: Vec<String> = states.into_iter().filter(|s| !s.trim().is_empty()).collect();
  if states.is_empty() {
    return Err(GibrError::Config(format!("Unrecognized list format for closed_states: {raw}")));
  }
  Ok(states)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_current_iteration_query() {
    let query = current_iteration_query("MyProject", "MyTeam", &["Done".to_string(), "Removed".to_string()]);
    assert_eq!(
      query,
      "SELECT [System.Id] FROM WorkItems WHERE [System.IterationPath] = @CurrentIteration('[MyProject]\\MyTeam') \
       AND [System.TeamProject] = 'MyProject' AND [System.State] NOT IN ('Done', 'Removed') \
       ORDER BY [System.ChangedDate] DESC"
    );
  }

  #[test]
  fn test_query_escapes_quotes() {
    let query = current_iteration_query("O'Brien", "Team", &[]);
    assert!(query.contains("'O''Brien'"));
    assert!(!query.contains("NOT IN"));
  }

  #[test]
  fn test_parse_closed_states() {
    assert_eq!(parse_closed_states(None).unwrap(), vec!["Done", "Removed", "Closed"]);
    assert_eq!(
      parse_closed_states(Some(r#"["Done", "Resolved"]"#)).unwrap(),
      vec!["Done", "Resolved"]
    );
    assert_eq!(parse_closed_states(Some("Done, Cut ,")).unwrap(), vec!["Done", "Cut"]);
  }

  #[test]
  fn test_parse_closed_states_rejects_garbage() {
    let err = parse_closed_states(Some("[not json")).unwrap_err();
    assert!(err.to_string().starts_with("Unrecognized list format for closed_states"));

    assert!(parse_closed_states(Some(", ,")).is_err());
  }
}
