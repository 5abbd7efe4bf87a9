//! # Built-in Trackers
//!
//! The registration table for every tracker gibr knows about, including the
//! placeholders for trackers that are not implemented yet.

use gibr_azure::Azure;
use gibr_core::{GibrError, Registry, Result, Tracker, TrackerDescriptor, TrackerSettings};
use gibr_gh::GitHub;
use gibr_gitlab::GitLab;
use gibr_jira::Jira;
use gibr_linear::Linear;
use gibr_monday::Monday;

/// Forgejo placeholder shown in the `init` menu
pub struct Forgejo;

impl TrackerDescriptor for Forgejo {
  const KEY: &'static str = "forgejo";
  const DISPLAY_NAME: &'static str = "Forgejo";
  const SUPPORTED: bool = false;

  fn from_config(_settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    Err(GibrError::UnsupportedTracker(Self::KEY.to_string()))
  }
}

/// YouTrack placeholder shown in the `init` menu
pub struct YouTrack;

impl TrackerDescriptor for YouTrack {
  const KEY: &'static str = "youtrack";
  const DISPLAY_NAME: &'static str = "YouTrack";
  const SUPPORTED: bool = false;

  fn from_config(_settings: &TrackerSettings) -> Result<Box<dyn Tracker>> {
    Err(GibrError::UnsupportedTracker(Self::KEY.to_string()))
  }
}

/// Build the registry of built-in trackers.
pub fn builtin_registry() -> Registry {
  let mut registry = Registry::new();
  registry
    .register::<GitHub>()
    .register::<Jira>()
    .register::<GitLab>()
    .register::<Azure>()
    .register::<Linear>()
    .register::<Monday>()
    .register::<Forgejo>()
    .register::<YouTrack>();
  registry
}
