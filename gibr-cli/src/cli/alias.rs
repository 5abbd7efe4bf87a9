//! # Alias Command
//!
//! Installs `git <command>` aliases that route back to gibr.

use std::path::Path;

use anyhow::{Context, Result};
use directories::BaseDirs;
use gibr_core::{print_party, print_success};

use super::aliasable_commands;

pub(crate) fn handle_alias_command() -> Result<()> {
  let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
  let gitconfig = base_dirs.home_dir().join(".gitconfig");

  for (name, command) in install_aliases(&gitconfig, &aliasable_commands())? {
    print_success(&format!("Added git alias: git {name} → {command}"));
  }
  print_party("Git aliases successfully added!");
  Ok(())
}

/// Write `alias.<name> = !gibr git <name>` for every command into the git
/// config file at `path`, creating it when missing.
pub(crate) fn install_aliases(path: &Path, commands: &[String]) -> Result<Vec<(String, String)>> {
  let mut config =
    git2::Config::open(path).with_context(|| format!("Failed to set git aliases: cannot open {}", path.display()))?;

  let mut installed = Vec::with_capacity(commands.len());
  for name in commands {
    let command = format!("!gibr git {name}");
    config
      .set_str(&format!("alias.{name}"), &command)
      .with_context(|| format!("Failed to set git alias '{name}'"))?;
    installed.push((name.clone(), command));
  }
  Ok(installed)
}

#[cfg(test)]
mod tests {
  use std::fs;

  use gibr_test_utils::HomeEnvTestGuard;
  use serial_test::serial;
  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_install_aliases_preserves_existing_entries() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".gitconfig");
    fs::write(&path, "[user]\n\tname = Jane Doe\n").unwrap();

    let commands = vec!["create".to_string(), "issues".to_string()];
    let installed = install_aliases(&path, &commands).unwrap();
    assert_eq!(installed[0], ("create".to_string(), "!gibr git create".to_string()));

    let config = git2::Config::open(&path).unwrap();
    assert_eq!(config.get_string("alias.create").unwrap(), "!gibr git create");
    assert_eq!(config.get_string("alias.issues").unwrap(), "!gibr git issues");
    assert_eq!(config.get_string("user.name").unwrap(), "Jane Doe");
  }

  #[test]
  #[serial]
  fn test_alias_command_writes_home_gitconfig() {
    let home = HomeEnvTestGuard::new();

    handle_alias_command().unwrap();

    let config = git2::Config::open(&home.home_path(".gitconfig")).unwrap();
    assert_eq!(config.get_string("alias.create").unwrap(), "!gibr git create");
    assert!(config.get_string("alias.init").is_err());
    assert!(config.get_string("alias.alias").is_err());
  }
}
