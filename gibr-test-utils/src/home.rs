//! HOME directory management for testing
//!
//! Keeps tests that write user-level files such as `~/.gitconfig` away from
//! the real home directory.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Overrides `HOME` (and `USERPROFILE` on Windows) with a temporary directory
pub struct HomeEnvTestGuard {
  /// The temporary directory used as HOME
  pub temp_dir: TempDir,
  original_home: Option<String>,
  #[cfg(windows)]
  original_userprofile: Option<String>,
}

impl HomeEnvTestGuard {
  /// Create a new guard with a fresh temporary HOME
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let original_home = env::var("HOME").ok();
    #[cfg(windows)]
    let original_userprofile = env::var("USERPROFILE").ok();

    unsafe {
      env::set_var("HOME", temp_dir.path());
      #[cfg(windows)]
      env::set_var("USERPROFILE", temp_dir.path());
    }

    Self {
      temp_dir,
      original_home,
      #[cfg(windows)]
      original_userprofile,
    }
  }

  /// Path of the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Path of a file inside the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl Drop for HomeEnvTestGuard {
  fn drop(&mut self) {
    unsafe {
      match &self.original_home {
        Some(val) => env::set_var("HOME", val),
        None => env::remove_var("HOME"),
      }
      #[cfg(windows)]
      match &self.original_userprofile {
        Some(val) => env::set_var("USERPROFILE", val),
        None => env::remove_var("USERPROFILE"),
      }
    }
  }
}
