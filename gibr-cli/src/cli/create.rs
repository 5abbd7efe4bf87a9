//! # Create Command
//!
//! Fetches an issue, renders its branch name and creates the branch.

use anyhow::{Context, Result, bail};
use clap::Args;
use gibr_core::git::{BranchOptions, BranchOutcome, create_and_push_branch};
use gibr_core::output::format_branch_name;
use gibr_core::{GibrConfig, Prompter, Registry, Tracker};
use git2::Repository;
use tracing::info;

use super::with_spinner;

/// Arguments for `gibr create`
#[derive(Args)]
pub struct CreateArgs {
  /// Issue id, e.g. 123 or PROJ-123
  #[arg(required = true, index = 1)]
  pub issue_id: String,

  /// Create and check out the branch without pushing it
  #[arg(long = "no-push")]
  pub no_push: bool,
}

pub(crate) fn handle_create_command(
  args: &CreateArgs,
  config: &GibrConfig,
  registry: &Registry,
  prompter: &mut dyn Prompter,
) -> Result<()> {
  let tracker = registry.create_tracker(config)?;
  let repo = Repository::discover(".").context("Not inside a git repository")?;
  let options = BranchOptions {
    push: !args.no_push,
    ..BranchOptions::default()
  };

  create_branch_for_issue(&args.issue_id, config, tracker.as_ref(), &repo, prompter, &options)?;
  Ok(())
}

/// Fetch `issue_id` from `tracker` and create its branch in `repo`.
pub(crate) fn create_branch_for_issue(
  issue_id: &str,
  config: &GibrConfig,
  tracker: &dyn Tracker,
  repo: &Repository,
  prompter: &mut dyn Prompter,
  options: &BranchOptions,
) -> Result<BranchOutcome> {
  let template = config.branch_template()?;

  let message = format!("Fetching issue {issue_id} from {}...", tracker.display_name());
  let issue = with_spinner(&message, || tracker.get_issue(issue_id))?;
  info!("Fetched issue {}", issue);

  if template.requires_assignee() && issue.assignee.is_none() {
    bail!(
      "Branch name format '{}' uses {{assignee}}, but issue {} has no assignee.",
      template.format(),
      issue.id
    );
  }

  let branch_name = template.generate(&issue);
  println!("Generating branch name for issue #{}: {}", issue.id, issue.title);
  println!("Branch name: {}", format_branch_name(&branch_name));

  create_and_push_branch(repo, &branch_name, prompter, options)
}

#[cfg(test)]
mod tests {
  use gibr_core::{GibrError, Issue, ScriptedPrompter};
  use gibr_test_utils::git::GitRepoTestGuard;

  use super::*;

  struct FakeTracker {
    issue: Issue,
  }

  impl Tracker for FakeTracker {
    fn display_name(&self) -> &str {
      "Fake"
    }

    fn get_issue(&self, issue_id: &str) -> gibr_core::Result<Issue> {
      if issue_id == self.issue.id {
        Ok(self.issue.clone())
      } else {
        Err(GibrError::not_found(issue_id, "Fake project"))
      }
    }

    fn list_issues(&self) -> gibr_core::Result<Vec<Issue>> {
      Ok(vec![self.issue.clone()])
    }
  }

  fn config(format: &str) -> GibrConfig {
    let mut config = GibrConfig::new();
    config.set("DEFAULT", "branch_name_format", format);
    config.set("issue-tracker", "name", "fake");
    config
  }

  fn local_only() -> BranchOptions {
    BranchOptions {
      push: false,
      ..BranchOptions::default()
    }
  }

  #[test]
  fn test_creates_branch_from_template() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let tracker = FakeTracker {
      issue: Issue::new(17, "Fix login bug").with_type("bug"),
    };
    let mut prompter = ScriptedPrompter::default();

    let outcome = create_branch_for_issue(
      "17",
      &config("{issuetype}/{issue}-{title}"),
      &tracker,
      &guard.repo,
      &mut prompter,
      &local_only(),
    )
    .unwrap();

    assert_eq!(
      outcome,
      BranchOutcome::Created {
        name: "bug/17-fix-login-bug".to_string(),
        pushed: false
      }
    );
    assert_eq!(guard.current_branch().as_deref(), Some("bug/17-fix-login-bug"));
  }

  #[test]
  fn test_missing_assignee_fails_before_branching() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let tracker = FakeTracker {
      issue: Issue::new(3, "Unowned work"),
    };
    let mut prompter = ScriptedPrompter::default();

    let err = create_branch_for_issue(
      "3",
      &config("{assignee}/{issue}"),
      &tracker,
      &guard.repo,
      &mut prompter,
      &local_only(),
    )
    .unwrap_err();

    assert!(err.to_string().contains("has no assignee"));
    assert!(guard.repo.find_branch("None/3", git2::BranchType::Local).is_err());
  }

  #[test]
  fn test_tracker_errors_propagate() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let tracker = FakeTracker {
      issue: Issue::new(1, "Only issue"),
    };
    let mut prompter = ScriptedPrompter::default();

    let err = create_branch_for_issue(
      "99",
      &config("{issue}-{title}"),
      &tracker,
      &guard.repo,
      &mut prompter,
      &local_only(),
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Issue 99 not found in Fake project.");
  }

  #[test]
  fn test_bad_template_is_reported() {
    let guard = GitRepoTestGuard::with_initial_commit();
    let tracker = FakeTracker {
      issue: Issue::new(1, "Only issue"),
    };
    let mut prompter = ScriptedPrompter::default();

    let err = create_branch_for_issue(
      "1",
      &config("{issue}-{summary}"),
      &tracker,
      &guard.repo,
      &mut prompter,
      &local_only(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("summary"));
  }
}
