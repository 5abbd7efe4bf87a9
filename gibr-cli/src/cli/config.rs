//! # Config Command

use anyhow::Result;
use gibr_core::{GibrConfig, Registry};

pub(crate) fn handle_config_command(config: &GibrConfig, registry: &Registry) -> Result<()> {
  println!("{}", render_config(config, registry)?);
  Ok(())
}

/// The configuration summary followed by the tracker's own description.
pub(crate) fn render_config(config: &GibrConfig, registry: &Registry) -> Result<String> {
  let key = config.tracker_name()?;
  let entry = registry.resolve(key)?;
  let tracker_block = (entry.describer)(&config.tracker_settings(key));
  Ok(format!("{config}\n    {tracker_block}"))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::trackers::builtin_registry;

  #[test]
  fn test_render_config_includes_tracker_block() {
    let config = GibrConfig::parse(
      "[DEFAULT]\nbranch_name_format = {issuetype}/{issue}-{title}\n\n[issue-tracker]\nname = gitlab\n\n\
       [gitlab]\nurl = https://gitlab.example\nproject = group/proj\ntoken = glpat-secret\n",
    )
    .unwrap();

    let text = render_config(&config, &builtin_registry()).unwrap();
    assert!(text.starts_with("Gibr Configuration:"));
    assert!(text.contains("{issuetype}/{issue}-{title}"));
    assert!(text.contains("GitLab:"));
    for value in ["https://gitlab.example", "group/proj", "glpat-secret"] {
      assert!(text.contains(value), "missing {value}");
    }
  }

  #[test]
  fn test_render_config_unknown_tracker() {
    let config = GibrConfig::parse("[issue-tracker]\nname = bugzilla\n").unwrap();
    let err = render_config(&config, &builtin_registry()).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported tracker type: bugzilla");
  }
}
