//! # Init Command
//!
//! Interactive creation of `.gibrconfig` in the current directory.

use std::path::Path;

use anyhow::Result;
use gibr_core::consts::{
  BRANCH_NAME_FORMAT_KEY, CONFIG_FILENAME, DEFAULT_BRANCH_NAME_FORMAT, DEFAULT_SECTION, TRACKER_NAME_KEY,
  TRACKER_SECTION,
};
use gibr_core::output::{format_command, get_emoji_or_default};
use gibr_core::{GibrConfig, Prompter, Registry, print_success, print_warning};
use tracing::debug;

pub(crate) fn handle_init_command(registry: &Registry, prompter: &mut dyn Prompter) -> Result<()> {
  run_init(registry, prompter, Path::new(CONFIG_FILENAME))?;
  Ok(())
}

/// Ask for a tracker and its settings, then write the config to `path`.
///
/// Returns `false` when nothing was written.
pub(crate) fn run_init(registry: &Registry, prompter: &mut dyn Prompter, path: &Path) -> Result<bool> {
  println!(
    "Welcome to gibr setup! Let's get you started {}\n",
    get_emoji_or_default("rocket", "")
  );

  let entries = registry.menu_entries();
  let labels: Vec<String> = entries.iter().map(|entry| entry.menu_label()).collect();
  let choice = prompter.select("Which issue tracker do you use?", &labels, 0)?;
  let Some(entry) = entries.get(choice) else {
    anyhow::bail!("Invalid tracker selection: {choice}");
  };

  if !entry.supported {
    print_warning(&format!("{} support is coming soon, stay tuned!", entry.display_name));
    return Ok(false);
  }
  println!("\n{} selected.\n", entry.display_name);

  let settings = (entry.configurator)(prompter)?;
  debug!("Collected {} settings for {}", settings.len(), entry.key);

  let mut config = GibrConfig::new();
  config.set(DEFAULT_SECTION, BRANCH_NAME_FORMAT_KEY, DEFAULT_BRANCH_NAME_FORMAT);
  config.set(TRACKER_SECTION, TRACKER_NAME_KEY, entry.key);
  config.set_section(entry.key, settings);

  if path.exists() && !prompter.confirm(&format!("{CONFIG_FILENAME} already exists. Overwrite?"), false)? {
    print_warning("Operation canceled.");
    return Ok(false);
  }

  config.save(path)?;
  print_success(&format!("Created {} with {} settings", path.display(), entry.display_name));
  println!("You're all set! Try: {}\n", format_command("gibr issues"));
  Ok(true)
}
