//! Temporary project directories holding a `.gibrconfig`

use std::path::{Path, PathBuf};
use std::{env, fs};

use tempfile::TempDir;

/// File name the gibr config loader searches for
pub const CONFIG_FILENAME: &str = ".gibrconfig";

/// A temporary project directory with an optional `.gibrconfig`. The current
/// working directory is moved into the project and restored on drop.
pub struct ConfigFileGuard {
  /// The temporary project directory
  pub temp_dir: TempDir,
  original_dir: PathBuf,
}

impl ConfigFileGuard {
  /// Create a project containing a `.gibrconfig` with `content` and enter it
  pub fn with_content(content: &str) -> Self {
    let guard = Self::empty();
    fs::write(guard.config_path(), content).expect("Failed to write config file");
    guard
  }

  /// Create a project without any config file and enter it
  pub fn empty() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let original_dir = env::current_dir().expect("Failed to get current directory");
    env::set_current_dir(temp_dir.path()).expect("Failed to change current directory");

    Self { temp_dir, original_dir }
  }

  /// Path of the project directory
  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Path of the project's `.gibrconfig`
  pub fn config_path(&self) -> PathBuf {
    self.temp_dir.path().join(CONFIG_FILENAME)
  }

  /// Create and enter a nested directory below the project root
  pub fn enter_subdir(&self, relative_path: &str) -> PathBuf {
    let dir = self.temp_dir.path().join(relative_path);
    fs::create_dir_all(&dir).expect("Failed to create nested directory");
    env::set_current_dir(&dir).expect("Failed to change current directory");
    dir
  }
}

impl Drop for ConfigFileGuard {
  fn drop(&mut self) {
    let _ = env::set_current_dir(&self.original_dir);
  }
}
