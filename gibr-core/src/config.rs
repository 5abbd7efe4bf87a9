//! # Configuration Management
//!
//! Loads and writes the `.gibrconfig` INI file. The file is discovered by
//! walking up from the working directory, keys are case-insensitive and
//! `${VAR}` / `$VAR` references are expanded from the environment when the
//! file is read. Indented lines continue the previous value, and keys of the
//! `DEFAULT` section are visible from every other section.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::debug;

use crate::branch::BranchNameTemplate;
use crate::consts::{
  BRANCH_NAME_FORMAT_KEY, CONFIG_FILENAME, DEFAULT_BRANCH_NAME_FORMAT, DEFAULT_SECTION, TRACKER_NAME_KEY,
  TRACKER_SECTION,
};
use crate::error::{GibrError, Result};

/// Key/value settings of one tracker section
pub type TrackerSettings = BTreeMap<String, String>;

static ENV_VAR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}|\$([A-Za-z_][A-Za-z0-9_]*)").expect("Failed to compile env var regex")
});

/// Parsed `.gibrconfig` contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GibrConfig {
  path: Option<PathBuf>,
  sections: Vec<(String, TrackerSettings)>,
}

impl GibrConfig {
  /// Create an empty configuration.
  pub fn new() -> Self {
    Self::default()
  }

  /// Locate the config file from the current directory and load it.
  pub fn discover() -> Result<Self> {
    let cwd = std::env::current_dir()?;
    let path = find_config_file(&cwd).ok_or_else(|| GibrError::ConfigNotFound(CONFIG_FILENAME.to_string()))?;
    Self::load(&path)
  }

  /// Load a config file, expanding environment references.
  pub fn load(path: &Path) -> Result<Self> {
    let content = fs::read_to_string(path)?;
    let mut config = Self::parse_with_env(&content, |name| std::env::var(name).ok())?;
    config.path = Some(path.to_path_buf());
    debug!("Loaded config from {}", path.display());
    Ok(config)
  }

  /// Parse INI text, expanding references from the process environment.
  pub fn parse(content: &str) -> Result<Self> {
    Self::parse_with_env(content, |name| std::env::var(name).ok())
  }

  /// Parse INI text, resolving variable references through `lookup`.
  ///
  /// References to variables that `lookup` does not know are kept as written.
  /// Continuation lines are joined to the previous value with `\n`; a blank
  /// line, comment or section header ends the value.
  pub fn parse_with_env<F>(content: &str, lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let mut config = Self::new();
    let mut current: Option<String> = None;
    let mut last_key: Option<String> = None;

    for (index, raw_line) in content.lines().enumerate() {
      let line_no = index + 1;
      let line = raw_line.trim();

      if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
        last_key = None;
        continue;
      }

      if raw_line.starts_with([' ', '\t'])
        && let (Some(section), Some(key)) = (current.as_deref(), last_key.as_deref())
      {
        let continuation = expand_env_vars(line, &lookup);
        if let Some(value) = config.section_mut(section).get_mut(key) {
          if !value.is_empty() {
            value.push('\n');
          }
          value.push_str(&continuation);
        }
        continue;
      }

      if let Some(rest) = line.strip_prefix('[') {
        let name = rest
          .strip_suffix(']')
          .ok_or_else(|| GibrError::Config(format!("Malformed section header on line {line_no}: {line}")))?
          .trim();
        config.section_mut(name);
        current = Some(name.to_string());
        last_key = None;
        continue;
      }

      let Some(section) = current.as_deref() else {
        return Err(GibrError::Config(format!(
          "Line {line_no} appears before any section header: {line}"
        )));
      };

      let split_at = line
        .find(['=', ':'])
        .ok_or_else(|| GibrError::Config(format!("Expected 'key = value' on line {line_no}: {line}")))?;
      let key = line[..split_at].trim().to_lowercase();
      let value = expand_env_vars(line[split_at + 1..].trim(), &lookup);

      if key.is_empty() {
        return Err(GibrError::Config(format!("Empty key on line {line_no}: {line}")));
      }

      config.section_mut(section).insert(key.clone(), value);
      last_key = Some(key);
    }

    Ok(config)
  }

  /// Path the configuration was loaded from, if any.
  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  /// Look up a value, falling back to the `DEFAULT` section.
  pub fn get(&self, section: &str, key: &str) -> Option<&str> {
    let key = key.to_lowercase();
    self
      .section(section)
      .and_then(|settings| settings.get(&key))
      .or_else(|| self.section(DEFAULT_SECTION).and_then(|defaults| defaults.get(&key)))
      .map(String::as_str)
  }

  /// Set a value, creating the section when needed.
  pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
    self.section_mut(section).insert(key.to_lowercase(), value.into());
  }

  /// Borrow a whole section.
  pub fn section(&self, name: &str) -> Option<&TrackerSettings> {
    self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
  }

  /// Replace a section with `settings`.
  pub fn set_section(&mut self, name: &str, settings: TrackerSettings) {
    *self.section_mut(name) = settings;
  }

  /// Section names in file order.
  pub fn section_names(&self) -> impl Iterator<Item = &str> {
    self.sections.iter().map(|(name, _)| name.as_str())
  }

  /// The branch name template, falling back to `{issue}-{title}`.
  pub fn branch_name_format(&self) -> &str {
    self
      .get(DEFAULT_SECTION, BRANCH_NAME_FORMAT_KEY)
      .unwrap_or(DEFAULT_BRANCH_NAME_FORMAT)
  }

  /// Parse the configured branch name template.
  pub fn branch_template(&self) -> Result<BranchNameTemplate> {
    Ok(BranchNameTemplate::parse(self.branch_name_format())?)
  }

  /// Registry key of the selected tracker.
  pub fn tracker_name(&self) -> Result<&str> {
    self
      .get(TRACKER_SECTION, TRACKER_NAME_KEY)
      .filter(|name| !name.is_empty())
      .ok_or_else(|| GibrError::Config(format!("Missing '{TRACKER_SECTION}.{TRACKER_NAME_KEY}' in config.")))
  }

  /// Settings of the section named `key` layered over the `DEFAULT` keys.
  pub fn tracker_settings(&self, key: &str) -> TrackerSettings {
    let mut settings = self.section(DEFAULT_SECTION).cloned().unwrap_or_default();
    if let Some(section) = self.section(key) {
      settings.extend(section.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    settings
  }

  /// Serialize back to INI text.
  pub fn to_ini_string(&self) -> String {
    let mut out = String::new();
    for (index, (name, settings)) in self.sections.iter().enumerate() {
      if index > 0 {
        out.push('\n');
      }
      out.push_str(&format!("[{name}]\n"));
      for (key, value) in settings {
        out.push_str(&format!("{key} = {}\n", value.replace('\n', "\n    ")));
      }
    }
    out
  }

  /// Write the configuration to `path`.
  pub fn save(&self, path: &Path) -> Result<()> {
    fs::write(path, self.to_ini_string())?;
    debug!("Wrote config to {}", path.display());
    Ok(())
  }

  fn section_mut(&mut self, name: &str) -> &mut TrackerSettings {
    let position = match self.sections.iter().position(|(n, _)| n == name) {
      Some(position) => position,
      None => {
        self.sections.push((name.to_string(), TrackerSettings::new()));
        self.sections.len() - 1
      }
    };
    &mut self.sections[position].1
  }
}

impl fmt::Display for GibrConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let show = |value: Option<&str>| value.unwrap_or("None").to_string();
    writeln!(f, "Gibr Configuration:")?;
    writeln!(f, "    Default:")?;
    writeln!(
      f,
      "        {:<18} : {}",
      "Branch Name Format",
      show(self.get(DEFAULT_SECTION, BRANCH_NAME_FORMAT_KEY))
    )?;
    writeln!(f, "    Issue Tracker:")?;
    write!(
      f,
      "        {:<18} : {}",
      "Name",
      show(self.get(TRACKER_SECTION, TRACKER_NAME_KEY))
    )
  }
}

/// Search `start` and its ancestors for `.gibrconfig`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
  start.ancestors().find_map(|dir| {
    let candidate = dir.join(CONFIG_FILENAME);
    debug!("Looking for {} in {}", CONFIG_FILENAME, dir.display());
    candidate.is_file().then_some(candidate)
  })
}

/// Expand `${VAR}` and `$VAR` references, leaving unknown ones untouched.
pub fn expand_env_vars<F>(value: &str, lookup: F) -> String
where
  F: Fn(&str) -> Option<String>,
{
  ENV_VAR_REGEX
    .replace_all(value, |caps: &Captures| {
      let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
      lookup(name).unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use gibr_test_utils::env::EnvTestGuard;
  use serial_test::serial;
  use tempfile::TempDir;

  use super::*;

  const SAMPLE: &str = r#"
# gibr settings
[DEFAULT]
branch_name_format = {issuetype}/{issue}-{title}

[issue-tracker]
name = jira

[jira]
URL = https://example.atlassian.net
project_key: PROJ
; token comes from the environment
token = ${JIRA_TOKEN}
user = $JIRA_USER
"#;

  fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn test_parse_sections_and_keys() {
    let config = GibrConfig::parse_with_env(SAMPLE, lookup(&[("JIRA_TOKEN", "secret")])).unwrap();

    assert_eq!(config.branch_name_format(), "{issuetype}/{issue}-{title}");
    assert_eq!(config.tracker_name().unwrap(), "jira");
    assert_eq!(config.get("jira", "url"), Some("https://example.atlassian.net"));
    assert_eq!(config.get("jira", "project_key"), Some("PROJ"));
    assert_eq!(config.get("jira", "token"), Some("secret"));
    assert_eq!(
      config.section_names().collect::<Vec<_>>(),
      vec!["DEFAULT", "issue-tracker", "jira"]
    );
  }

  #[test]
  fn test_unknown_env_vars_are_kept() {
    let config = GibrConfig::parse_with_env(SAMPLE, lookup(&[])).unwrap();

    assert_eq!(config.get("jira", "token"), Some("${JIRA_TOKEN}"));
    assert_eq!(config.get("jira", "user"), Some("$JIRA_USER"));
  }

  #[test]
  fn test_expand_env_vars_both_forms() {
    let expanded = expand_env_vars("${A}-$B-$C", lookup(&[("A", "1"), ("B", "2")]));
    assert_eq!(expanded, "1-2-$C");
  }

  #[test]
  fn test_missing_tracker_name() {
    let config = GibrConfig::parse_with_env("[DEFAULT]\nbranch_name_format = {issue}\n", lookup(&[])).unwrap();
    let err = config.tracker_name().unwrap_err();
    assert_eq!(err.to_string(), "Missing 'issue-tracker.name' in config.");
  }

  #[test]
  fn test_default_branch_name_format() {
    let config = GibrConfig::parse_with_env("[issue-tracker]\nname = github\n", lookup(&[])).unwrap();
    assert_eq!(config.branch_name_format(), "{issue}-{title}");
    assert!(config.tracker_settings("github").is_empty());
  }

  #[test]
  fn test_key_before_section_is_rejected() {
    let err = GibrConfig::parse_with_env("name = github\n", lookup(&[])).unwrap_err();
    assert!(matches!(err, GibrError::Config(_)));
  }

  #[test]
  fn test_line_without_separator_is_rejected() {
    let err = GibrConfig::parse_with_env("[github]\nrepo\n", lookup(&[])).unwrap_err();
    assert!(err.to_string().contains("line 2"));
  }

  #[test]
  fn test_indented_lines_continue_the_value() {
    let content = "[azure]\nclosed_states = Done,\n    Removed,\n\tClosed\nteam = Core\n";
    let config = GibrConfig::parse_with_env(content, lookup(&[])).unwrap();

    assert_eq!(config.get("azure", "closed_states"), Some("Done,\nRemoved,\nClosed"));
    assert_eq!(config.get("azure", "team"), Some("Core"));
  }

  #[test]
  fn test_multiline_values_survive_serialization() {
    let mut config = GibrConfig::new();
    config.set("azure", "closed_states", "Done,\nClosed");

    let text = config.to_ini_string();
    assert_eq!(text, "[azure]\nclosed_states = Done,\n    Closed\n");
    assert_eq!(GibrConfig::parse_with_env(&text, lookup(&[])).unwrap(), config);
  }

  #[test]
  fn test_indented_line_after_blank_line_needs_separator() {
    let err = GibrConfig::parse_with_env("[github]\nrepo = a/b\n\n  stray\n", lookup(&[])).unwrap_err();
    assert!(err.to_string().contains("line 4"));
  }

  #[test]
  fn test_default_keys_are_inherited() {
    let content = "[DEFAULT]\ntoken = shared\n\n[issue-tracker]\nname = gitlab\n\n\
                   [gitlab]\nurl = https://gl\n\n[github]\ntoken = own\n";
    let config = GibrConfig::parse_with_env(content, lookup(&[])).unwrap();

    assert_eq!(config.get("gitlab", "token"), Some("shared"));
    assert_eq!(config.get("github", "token"), Some("own"));
    let settings = config.tracker_settings("gitlab");
    assert_eq!(settings.get("token").map(String::as_str), Some("shared"));
    assert_eq!(settings.get("url").map(String::as_str), Some("https://gl"));
    assert_eq!(config.tracker_settings("github").get("token").map(String::as_str), Some("own"));
  }

  #[test]
  fn test_write_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILENAME);

    let mut config = GibrConfig::new();
    config.set(DEFAULT_SECTION, BRANCH_NAME_FORMAT_KEY, DEFAULT_BRANCH_NAME_FORMAT);
    config.set(TRACKER_SECTION, TRACKER_NAME_KEY, "github");
    config.set_section(
      "github",
      TrackerSettings::from([
        ("repo".to_string(), "owner/repo".to_string()),
        ("token".to_string(), "${GIBR_TEST_UNSET_TOKEN}".to_string()),
      ]),
    );
    config.save(&path).unwrap();

    let reloaded = GibrConfig::load(&path).unwrap();
    assert_eq!(reloaded.path(), Some(path.as_path()));
    assert_eq!(reloaded.get("github", "repo"), Some("owner/repo"));
    assert_eq!(reloaded.get("github", "token"), Some("${GIBR_TEST_UNSET_TOKEN}"));
    assert_eq!(reloaded.tracker_name().unwrap(), "github");
  }

  #[test]
  fn test_display_summary() {
    let config = GibrConfig::parse_with_env(SAMPLE, lookup(&[])).unwrap();
    let text = config.to_string();

    assert!(text.starts_with("Gibr Configuration:"));
    assert!(text.contains("Branch Name Format : {issuetype}/{issue}-{title}"));
    assert!(text.contains("Name               : jira"));
  }

  #[test]
  fn test_find_config_file_in_parent() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    fs::create_dir_all(&nested).unwrap();
    fs::write(temp_dir.path().join(CONFIG_FILENAME), "[issue-tracker]\nname = github\n").unwrap();

    let found = find_config_file(&nested).unwrap();
    assert_eq!(found, temp_dir.path().join(CONFIG_FILENAME));
  }

  #[test]
  #[serial]
  fn test_load_expands_process_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(CONFIG_FILENAME);
    fs::write(&path, "[github]\ntoken = ${GIBR_CONFIG_TEST_TOKEN}\n").unwrap();

    let env_guard = EnvTestGuard::new();
    env_guard.set_var("GIBR_CONFIG_TEST_TOKEN", "from-env");

    let config = GibrConfig::load(&path).unwrap();
    assert_eq!(config.get("github", "token"), Some("from-env"));
  }
}
