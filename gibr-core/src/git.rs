//! # Git Branch Operations
//!
//! Creates the branch for an issue, checks it out and pushes it to `origin`.
//! Name collisions are resolved interactively by offering a suffixed name.

use std::process::Command;

use anyhow::{Context, Result, bail};
use git2::{BranchType, ErrorCode, Repository, StatusOptions};
use tracing::{debug, info};

use crate::consts::{DEFAULT_BRANCH_SUFFIX, DEFAULT_REMOTE, GIT_EXECUTABLE};
use crate::output::{format_branch_name, print_info, print_success, print_warning};
use crate::prompts::Prompter;

/// What [`create_and_push_branch`] ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
  /// A new branch was created and checked out
  Created { name: String, pushed: bool },
  /// The branch already exists and is the current branch
  AlreadyCheckedOut(String),
  /// The user declined to pick another name
  Cancelled,
}

/// Options controlling branch creation
#[derive(Debug, Clone)]
pub struct BranchOptions {
  /// Push the new branch and set its upstream
  pub push: bool,
  /// Remote to push to
  pub remote: String,
}

impl Default for BranchOptions {
  fn default() -> Self {
    Self {
      push: true,
      remote: DEFAULT_REMOTE.to_string(),
    }
  }
}

/// Whether tracked files have uncommitted changes.
pub fn is_dirty(repo: &Repository) -> Result<bool> {
  let mut options = StatusOptions::new();
  options.include_untracked(false).include_ignored(false);
  let statuses = repo.statuses(Some(&mut options)).context("Failed to read repository status")?;
  Ok(!statuses.is_empty())
}

/// Create `branch_name` from HEAD, check it out and push it.
///
/// When the branch already exists and is checked out nothing happens. When it
/// exists but another branch is current, the user is asked for a suffix and
/// `<branch_name>-<suffix>` is tried instead.
pub fn create_and_push_branch(
  repo: &Repository,
  branch_name: &str,
  prompter: &mut dyn Prompter,
  options: &BranchOptions,
) -> Result<BranchOutcome> {
  if is_dirty(repo)? {
    print_warning("Working tree is dirty: uncommitted changes present.");
  }

  let head = match repo.head() {
    Ok(head) => head,
    Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
      bail!("Please make an initial commit before using gibr.")
    }
    Err(e) => return Err(e).context("Failed to get HEAD reference"),
  };

  if repo.head_detached().unwrap_or(false) {
    print_warning("HEAD is detached (not on a branch).");
  }

  let current_branch = head.shorthand().unwrap_or("HEAD").to_string();
  debug!("Current branch: {}", current_branch);

  let mut name = branch_name.to_string();
  while repo.find_branch(&name, BranchType::Local).is_ok() {
    if name == current_branch {
      print_info(&format!(
        "Branch '{}' already exists and is checked out.",
        format_branch_name(&name)
      ));
      return Ok(BranchOutcome::AlreadyCheckedOut(name));
    }

    print_warning(&format!("Branch '{name}' already exists locally."));
    if !prompter.confirm("Would you like to create a new branch with a suffix?", true)? {
      print_info("Operation canceled by user.");
      return Ok(BranchOutcome::Cancelled);
    }
    let suffix = prompter.input("Enter suffix", Some(DEFAULT_BRANCH_SUFFIX))?;
    name = format!("{branch_name}-{suffix}");
    info!("Trying branch name '{}' instead", name);
  }

  let commit = head.peel_to_commit().context("Failed to resolve HEAD commit")?;
  repo
    .branch(&name, &commit, false)
    .with_context(|| format!("Failed to create branch '{name}'"))?;
  print_success(&format!(
    "Created branch '{}' from {current_branch}.",
    format_branch_name(&name)
  ));

  checkout_branch(repo, &name)?;
  print_success(&format!("Checked out branch: {}", format_branch_name(&name)));

  if options.push {
    push_branch(repo, &name, &options.remote)?;
    print_success(&format!("Pushed branch '{}' to {}.", format_branch_name(&name), options.remote));
  }

  Ok(BranchOutcome::Created {
    name,
    pushed: options.push,
  })
}

/// Checkout an existing local branch.
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  // Update the working tree and index before moving HEAD so the index does
  // not keep entries from the previous branch.
  let commit = repo
    .find_branch(branch_name, BranchType::Local)
    .with_context(|| format!("Branch '{branch_name}' not found"))?
    .into_reference()
    .peel_to_commit()
    .with_context(|| format!("Failed to peel branch '{branch_name}' to commit"))?;

  repo
    .checkout_tree(commit.as_object(), Some(git2::build::CheckoutBuilder::new().safe()))
    .with_context(|| format!("Failed to checkout tree for branch '{branch_name}'"))?;

  repo
    .set_head(&format!("refs/heads/{branch_name}"))
    .with_context(|| format!("Failed to set HEAD to branch '{branch_name}'"))?;

  Ok(())
}

/// Push `branch_name` to `remote` and set it as upstream.
///
/// Uses the git executable so the user's credential helpers and SSH agent
/// apply.
pub fn push_branch(repo: &Repository, branch_name: &str, remote: &str) -> Result<()> {
  repo
    .find_remote(remote)
    .with_context(|| format!("No '{remote}' remote configured"))?;
  let workdir = repo.workdir().context("Repository has no working directory")?;

  let refspec = format!("{branch_name}:{branch_name}");
  debug!("Running git push --set-upstream {} {}", remote, refspec);
  let output = Command::new(GIT_EXECUTABLE)
    .args(["push", "--set-upstream", remote, &refspec])
    .current_dir(workdir)
    .output()
    .context("Failed to execute git push")?;

  if !output.status.success() {
    bail!(
      "Git command failed: git push {remote} {refspec}: {}",
      String::from_utf8_lossy(&output.stderr).trim()
    );
  }

  Ok(())
}
