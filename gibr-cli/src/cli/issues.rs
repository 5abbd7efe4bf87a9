//! # Issues Command
//!
//! Lists open issues of the configured tracker as a markdown table.

use anyhow::Result;
use gibr_core::{GibrConfig, Issue, Registry, print_warning};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::with_spinner;

#[derive(Tabled)]
struct IssueRow {
  #[tabled(rename = "Issue")]
  id: String,
  #[tabled(rename = "Type")]
  issue_type: String,
  #[tabled(rename = "Title")]
  title: String,
  #[tabled(rename = "Assignee")]
  assignee: String,
}

impl From<&Issue> for IssueRow {
  fn from(issue: &Issue) -> Self {
    Self {
      id: issue.id.clone(),
      issue_type: issue.issue_type.clone(),
      title: issue.title.clone(),
      assignee: issue.assignee.clone().unwrap_or_default(),
    }
  }
}

pub(crate) fn handle_issues_command(config: &GibrConfig, registry: &Registry) -> Result<()> {
  let tracker = registry.create_tracker(config)?;
  let message = format!("Fetching open issues from {}...", tracker.display_name());
  let issues = with_spinner(&message, || tracker.list_issues())?;

  if issues.is_empty() {
    print_warning("No open issues found.");
    return Ok(());
  }

  println!("{}", render_issue_table(&issues));
  Ok(())
}

/// Render issues as a markdown table with Issue, Type, Title and Assignee.
pub(crate) fn render_issue_table(issues: &[Issue]) -> String {
  let rows: Vec<IssueRow> = issues.iter().map(IssueRow::from).collect();
  Table::new(rows).with(Style::markdown()).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_render_issue_table() {
    let issues = vec![
      Issue::new(17, "Fix login bug")
        .with_type("bug")
        .with_assignee(Some("jdoe".to_string())),
      Issue::new(18, "Write docs"),
    ];
    let table = render_issue_table(&issues);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 4);
    for header in ["Issue", "Type", "Title", "Assignee"] {
      assert!(lines[0].contains(header), "missing header {header}");
    }
    assert!(lines[1].starts_with("|-"));
    assert!(lines[2].contains("Fix login bug") && lines[2].contains("jdoe") && lines[2].contains("bug"));
    assert!(lines[3].contains("Write docs") && lines[3].contains("issue"));
  }
}
