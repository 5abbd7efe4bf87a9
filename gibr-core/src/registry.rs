//! # Tracker Registry
//!
//! Maps tracker keys such as `github` to the functions that construct,
//! configure and describe the corresponding adapter. The registry is built
//! once from an explicit table at startup and only read afterwards.

use tracing::{debug, warn};

use crate::config::{GibrConfig, TrackerSettings};
use crate::error::{GibrError, Result};
use crate::prompts::Prompter;
use crate::tracker::{Tracker, TrackerDescriptor};

/// Constructor signature stored for each tracker
pub type Constructor = fn(&TrackerSettings) -> Result<Box<dyn Tracker>>;
/// Interactive configurator signature stored for each tracker
pub type Configurator = fn(&mut dyn Prompter) -> Result<TrackerSettings>;
/// Config describer signature stored for each tracker
pub type Describer = fn(&TrackerSettings) -> String;

/// Registration record for one tracker kind
#[derive(Debug, Clone, Copy)]
pub struct TrackerEntry {
  pub key: &'static str,
  pub display_name: &'static str,
  pub supported: bool,
  pub numeric_issues: bool,
  pub constructor: Constructor,
  pub configurator: Configurator,
  pub describer: Describer,
}

impl TrackerEntry {
  /// Build the entry for descriptor `D`.
  pub fn of<D: TrackerDescriptor>() -> Self {
    Self {
      key: D::KEY,
      display_name: D::DISPLAY_NAME,
      supported: D::SUPPORTED,
      numeric_issues: D::NUMERIC_ISSUES,
      constructor: D::from_config,
      configurator: D::configure_interactively,
      describer: D::describe_config,
    }
  }

  /// Label used in the `init` menu.
  pub fn menu_label(&self) -> String {
    if self.supported {
      self.display_name.to_string()
    } else {
      format!("{} (coming soon)", self.display_name)
    }
  }
}

/// Ordered collection of tracker registrations
#[derive(Debug, Default, Clone)]
pub struct Registry {
  entries: Vec<TrackerEntry>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register the tracker described by `D`.
  ///
  /// A key that is already present is replaced in place, keeping its position.
  pub fn register<D: TrackerDescriptor>(&mut self) -> &mut Self {
    self.insert(TrackerEntry::of::<D>())
  }

  /// Register a prepared entry.
  pub fn insert(&mut self, entry: TrackerEntry) -> &mut Self {
    match self.entries.iter_mut().find(|existing| existing.key == entry.key) {
      Some(existing) => {
        warn!("Tracker '{}' registered twice; keeping the latest registration", entry.key);
        *existing = entry;
      }
      None => {
        debug!("Registered tracker '{}'", entry.key);
        self.entries.push(entry);
      }
    }
    self
  }

  /// Look up a tracker by key.
  pub fn resolve(&self, key: &str) -> Result<&TrackerEntry> {
    self
      .entries
      .iter()
      .find(|entry| entry.key == key)
      .ok_or_else(|| GibrError::UnsupportedTracker(key.to_string()))
  }

  /// `(key, display_name, supported)` for every tracker in registration order.
  pub fn list_all(&self) -> Vec<(&'static str, &'static str, bool)> {
    self
      .entries
      .iter()
      .map(|entry| (entry.key, entry.display_name, entry.supported))
      .collect()
  }

  /// Entries for the `init` menu: supported trackers first, then stubs.
  pub fn menu_entries(&self) -> Vec<&TrackerEntry> {
    let (supported, unsupported): (Vec<_>, Vec<_>) = self.entries.iter().partition(|entry| entry.supported);
    supported.into_iter().chain(unsupported).collect()
  }

  /// Iterate over all entries in registration order.
  pub fn entries(&self) -> impl Iterator<Item = &TrackerEntry> {
    self.entries.iter()
  }

  /// Build the tracker selected in `config`.
  pub fn create_tracker(&self, config: &GibrConfig) -> Result<Box<dyn Tracker>> {
    let key = config.tracker_name()?;
    let entry = self.resolve(key)?;
    if !entry.supported {
      return Err(GibrError::UnsupportedTracker(key.to_string()));
    }
    debug!("Creating {} tracker", entry.display_name);
    (entry.constructor)(&config.tracker_settings(key))
  }
}
