//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables should also be marked
//! `#[serial]` so they do not observe each other's overrides.

use std::cell::RefCell;
use std::collections::HashMap;
use std::env;

/// Records every variable it changes and restores the original values when
/// dropped
#[derive(Default)]
pub struct EnvTestGuard {
  originals: RefCell<HashMap<String, Option<String>>>,
}

impl EnvTestGuard {
  /// Create a guard that has not changed anything yet
  pub fn new() -> Self {
    Self::default()
  }

  /// Set `key` to `value` for the lifetime of the guard
  pub fn set_var(&self, key: &str, value: &str) {
    self.remember(key);
    unsafe {
      env::set_var(key, value);
    }
  }

  /// Remove `key` for the lifetime of the guard
  pub fn remove_var(&self, key: &str) {
    self.remember(key);
    unsafe {
      env::remove_var(key);
    }
  }

  fn remember(&self, key: &str) {
    self
      .originals
      .borrow_mut()
      .entry(key.to_string())
      .or_insert_with(|| env::var(key).ok());
  }
}

impl Drop for EnvTestGuard {
  fn drop(&mut self) {
    for (key, original) in self.originals.borrow().iter() {
      match original {
        Some(val) => unsafe {
          env::set_var(key, val);
        },
        None => unsafe {
          env::remove_var(key);
        },
      }
    }
  }
}
