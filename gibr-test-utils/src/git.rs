//! Git repository management for testing
//!
//! Creates throwaway repositories, optionally wired to a bare `origin` so
//! pushes can be exercised without network access.

use std::path::{Path, PathBuf};
use std::{env, fs};

use anyhow::{Context, Result};
use git2::{BranchType, Repository, Signature};
use tempfile::TempDir;

/// A temporary git repository that can move the working directory into
/// itself. The original working directory is restored when dropped.
pub struct GitRepoTestGuard {
  /// The temporary directory containing the git repository
  pub temp_dir: TempDir,
  /// The git repository
  pub repo: Repository,
  /// Bare repository registered as `origin`, if requested
  pub remote_dir: Option<TempDir>,
  original_dir: Option<PathBuf>,
}

impl GitRepoTestGuard {
  /// Create a new repository without changing the working directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let repo = Repository::init(temp_dir.path()).expect("Failed to initialize git repository");

    let mut config = repo.config().expect("Failed to get repository config");
    config
      .set_str("user.name", "Gibr Test User")
      .expect("Failed to set user.name");
    config
      .set_str("user.email", "gibr-test@example.com")
      .expect("Failed to set user.email");

    Self {
      temp_dir,
      repo,
      remote_dir: None,
      original_dir: None,
    }
  }

  /// Create a repository with one commit on its initial branch
  pub fn with_initial_commit() -> Self {
    let guard = Self::new();
    create_commit(&guard.repo, "README.md", "# test\n", "Initial commit").expect("Failed to create initial commit");
    guard
  }

  /// Create a committed repository whose `origin` is a local bare repository
  pub fn with_origin() -> Self {
    let mut guard = Self::with_initial_commit();
    let remote_dir = TempDir::new().expect("Failed to create remote directory");
    Repository::init_bare(remote_dir.path()).expect("Failed to initialize bare remote");

    let url = remote_dir.path().to_string_lossy().to_string();
    guard.repo.remote("origin", &url).expect("Failed to add origin remote");
    guard.remote_dir = Some(remote_dir);
    guard
  }

  /// Get the path to the git repository
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Open the bare `origin` repository, if one was created
  pub fn open_remote(&self) -> Option<Repository> {
    self
      .remote_dir
      .as_ref()
      .and_then(|dir| Repository::open_bare(dir.path()).ok())
  }

  /// Name of the branch HEAD points to
  pub fn current_branch(&self) -> Option<String> {
    self.repo.head().ok().and_then(|head| head.shorthand().map(str::to_string))
  }

  /// Change the working directory into the repository
  pub fn change_dir(&mut self) -> PathBuf {
    if let Some(original_dir) = &self.original_dir {
      return original_dir.clone();
    }

    let original_dir = env::current_dir().expect("Failed to get current directory");
    self.original_dir = Some(original_dir.clone());
    env::set_current_dir(self.temp_dir.path()).expect("Failed to change current directory");

    original_dir
  }

  /// Restore the original working directory if it was changed
  pub fn restore_dir(&mut self) {
    if let Some(original_dir) = self.original_dir.take() {
      env::set_current_dir(original_dir).expect("Failed to restore original directory");
    }
  }
}

impl Default for GitRepoTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for GitRepoTestGuard {
  fn drop(&mut self) {
    self.restore_dir();
  }
}

/// Write `file_name`, stage it and commit on HEAD
pub fn create_commit(repo: &Repository, file_name: &str, content: &str, message: &str) -> Result<()> {
  let repo_path = repo.workdir().context("Repository has no working directory")?;
  fs::write(repo_path.join(file_name), content)?;

  let mut index = repo.index()?;
  index.add_path(Path::new(file_name))?;
  index.write()?;

  let tree_id = index.write_tree()?;
  let tree = repo.find_tree(tree_id)?;
  let signature = Signature::now("Test User", "test@example.com")?;

  match repo.head().ok().and_then(|head| head.peel_to_commit().ok()) {
    Some(parent) => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[&parent])?,
    None => repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &[])?,
  };

  Ok(())
}

/// Create a local branch from HEAD or from `start_point`
pub fn create_branch(repo: &Repository, branch_name: &str, start_point: Option<&str>) -> Result<()> {
  let head = match start_point {
    Some(start) => repo
      .find_branch(start, BranchType::Local)?
      .into_reference()
      .peel_to_commit()?,
    None => repo.head()?.peel_to_commit()?,
  };

  repo.branch(branch_name, &head, false)?;
  Ok(())
}

/// Check out an existing local branch
pub fn checkout_branch(repo: &Repository, branch_name: &str) -> Result<()> {
  let obj = repo
    .revparse_single(&format!("refs/heads/{branch_name}"))?
    .peel_to_commit()?;

  repo.checkout_tree(&obj.into_object(), None)?;
  repo.set_head(&format!("refs/heads/{branch_name}"))?;

  Ok(())
}
