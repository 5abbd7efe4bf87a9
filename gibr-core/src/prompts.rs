//! # Prompts Module
//!
//! Interactive input goes through the [`Prompter`] trait so tracker
//! configurators and CLI commands can be driven by `dialoguer` in a terminal
//! and by a scripted answer queue in tests.

use std::collections::VecDeque;
use std::io;

use console::Style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{GibrError, Result};

/// Returns a custom dialoguer theme matching gibr's color palette.
///
/// Features:
/// - Cyan bold prompt text
/// - Green `❯` prefix on active item
/// - Green highlight on active item text
pub fn gibr_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: Style::new().green().apply_to("❯ ".to_string()),
    active_item_style: Style::new().green(),
    ..ColorfulTheme::default()
  }
}

/// Source of answers for interactive questions
pub trait Prompter {
  /// Ask for free text. An empty answer yields `default` when one is given.
  fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String>;

  /// Ask a yes/no question.
  fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool>;

  /// Pick one of `items`, returning its index.
  fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
}

/// Terminal prompter backed by `dialoguer`
pub struct DialoguerPrompter {
  theme: ColorfulTheme,
}

impl DialoguerPrompter {
  pub fn new() -> Self {
    Self { theme: gibr_theme() }
  }
}

impl Default for DialoguerPrompter {
  fn default() -> Self {
    Self::new()
  }
}

impl Prompter for DialoguerPrompter {
  fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
    let mut input = Input::<String>::with_theme(&self.theme)
      .with_prompt(prompt)
      .allow_empty(true);
    if let Some(default) = default {
      input = input.default(default.to_string());
    }
    let answer = input.interact_text().map_err(io::Error::other)?;
    Ok(answer.trim().to_string())
  }

  fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
    let answer = Confirm::with_theme(&self.theme)
      .with_prompt(prompt)
      .default(default)
      .interact()
      .map_err(io::Error::other)?;
    Ok(answer)
  }

  fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
    let index = Select::with_theme(&self.theme)
      .with_prompt(prompt)
      .items(items)
      .default(default)
      .interact()
      .map_err(io::Error::other)?;
    Ok(index)
  }
}

/// Prompter that replays queued answers, for tests and non-interactive use.
///
/// An empty answer accepts the default. Confirm answers are `y`/`yes`/`n`/`no`.
/// Select answers are either a zero-based index or the item text.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: VecDeque<String>,
  asked: Vec<String>,
}

impl ScriptedPrompter {
  pub fn new<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      answers: answers.into_iter().map(Into::into).collect(),
      asked: Vec::new(),
    }
  }

  /// Prompts asked so far, in order.
  pub fn asked(&self) -> &[String] {
    &self.asked
  }

  /// Number of answers not consumed yet.
  pub fn remaining(&self) -> usize {
    self.answers.len()
  }

  fn next_answer(&mut self, prompt: &str) -> Result<String> {
    self.asked.push(prompt.to_string());
    self.answers.pop_front().map(|a| a.trim().to_string()).ok_or_else(|| {
      GibrError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("No scripted answer for prompt: {prompt}"),
      ))
    })
  }
}

impl Prompter for ScriptedPrompter {
  fn input(&mut self, prompt: &str, default: Option<&str>) -> Result<String> {
    let answer = self.next_answer(prompt)?;
    match default {
      Some(default) if answer.is_empty() => Ok(default.to_string()),
      _ => Ok(answer),
    }
  }

  fn confirm(&mut self, prompt: &str, default: bool) -> Result<bool> {
    let answer = self.next_answer(prompt)?;
    match answer.to_lowercase().as_str() {
      "" => Ok(default),
      "y" | "yes" => Ok(true),
      "n" | "no" => Ok(false),
      other => Err(GibrError::Config(format!("Invalid confirm answer '{other}' for: {prompt}"))),
    }
  }

  fn select(&mut self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
    let answer = self.next_answer(prompt)?;
    if answer.is_empty() {
      return Ok(default);
    }
    if let Ok(index) = answer.parse::<usize>()
      && index < items.len()
    {
      return Ok(index);
    }
    items
      .iter()
      .position(|item| *item == answer)
      .ok_or_else(|| GibrError::Config(format!("'{answer}' is not one of the choices for: {prompt}")))
  }
}
