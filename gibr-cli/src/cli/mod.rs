//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for gibr, plus the argument
//! rewriting that makes `gibr 123` and the `git` aliases work.

mod alias;
mod config;
mod create;
mod init;
mod issues;

use std::time::Duration;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use gibr_core::output::{ColorMode, format_command};
use gibr_core::{DialoguerPrompter, GibrConfig, GibrError, Prompter, Registry, print_warning};
use gibr_jira::tracker::is_issue_key;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Top-level CLI command for gibr
#[derive(Parser)]
#[command(name = "gibr")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Create and push git branches named after your issues")]
#[command(long_about = "Gibr fetches an issue from your issue tracker, renders a branch name from the\n\
        template in .gibrconfig, then creates, checks out and pushes the branch.\n\n\
        `gibr 123` and `gibr PROJ-123` are shorthand for `gibr create <id>`.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for gibr
#[derive(Subcommand)]
pub enum Commands {
  /// Create and push a branch for an issue
  #[command(long_about = "Fetch the issue, render the branch name from branch_name_format and\n\
            create the branch from HEAD. The new branch is checked out and pushed\n\
            to origin with its upstream set.")]
  Create(create::CreateArgs),

  /// List open issues from the tracker
  #[command(long_about = "List the open issues of the configured tracker, most recently\n\
            updated first, as a markdown table.")]
  Issues,

  /// Initialize a .gibrconfig interactively
  #[command(long_about = "Pick an issue tracker and answer its prompts to create a .gibrconfig\n\
            in the current directory. An existing file is only replaced after\n\
            confirmation.")]
  Init,

  /// Add git aliases for gibr commands
  #[command(long_about = "Write `git <command>` aliases for gibr's commands to ~/.gitconfig,\n\
            so `git create 123` runs `gibr create 123`.")]
  Alias,

  /// Show the loaded configuration
  Config,
}

/// Commands that are never installed as git aliases
const DO_NOT_ALIAS: [&str; 2] = ["alias", "init"];

/// Names of all top-level subcommands.
pub fn command_names() -> Vec<String> {
  Cli::command()
    .get_subcommands()
    .map(|command| command.get_name().to_string())
    .collect()
}

/// Subcommands that `gibr alias` installs.
pub fn aliasable_commands() -> Vec<String> {
  command_names()
    .into_iter()
    .filter(|name| !DO_NOT_ALIAS.contains(&name.as_str()))
    .collect()
}

/// Rewrite raw arguments before clap sees them.
///
/// A leading `git` (from the aliases) is dropped and `--flags` are moved in
/// front of positionals. A bare issue id in command position gets `create`
/// inserted before it.
pub fn normalize_args(args: Vec<String>, commands: &[String]) -> Vec<String> {
  let mut iter = args.into_iter();
  let mut normalized: Vec<String> = iter.next().into_iter().collect();
  let mut rest: Vec<String> = iter.collect();

  if rest.first().is_some_and(|arg| arg == "git") {
    rest.remove(0);
    let (flags, positionals): (Vec<String>, Vec<String>) = rest.into_iter().partition(|arg| arg.starts_with("--"));
    rest = flags.into_iter().chain(positionals).collect();
  }

  if let Some(position) = rest.iter().position(|arg| !arg.starts_with('-')) {
    let arg = &rest[position];
    let is_command = commands.iter().any(|command| command == arg);
    let is_issue = arg.chars().all(|c| c.is_ascii_digit()) || is_issue_key(arg);
    if !is_command && is_issue {
      debug!("Treating '{}' as `gibr create {}`", arg, arg);
      rest.insert(position, "create".to_string());
    }
  }

  normalized.extend(rest);
  normalized
}

/// Run `work` while showing a spinner with `message`.
pub(crate) fn with_spinner<T>(message: &str, work: impl FnOnce() -> gibr_core::Result<T>) -> Result<T> {
  let spinner = ProgressBar::new_spinner();
  spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
  spinner.set_message(message.to_string());
  spinner.enable_steady_tick(Duration::from_millis(100));

  let result = work();
  spinner.finish_and_clear();
  Ok(result?)
}

/// Load `.gibrconfig` and run `command` with it.
///
/// When the file is missing the user is offered `gibr init` instead and the
/// command is skipped. Declining the offer keeps the `ConfigNotFound` error.
fn with_config(
  registry: &Registry,
  prompter: &mut dyn Prompter,
  command: impl FnOnce(&GibrConfig, &mut dyn Prompter) -> Result<()>,
) -> Result<()> {
  match GibrConfig::discover() {
    Ok(config) => command(&config, prompter),
    Err(e @ GibrError::ConfigNotFound(_)) => {
      print_warning(&e.to_string());
      println!("Run {} to create a new configuration file.\n", format_command("gibr init"));
      if !prompter.confirm("Would you like to run `gibr init` now?", true)? {
        return Err(e.into());
      }
      init::handle_init_command(registry, prompter)
    }
    Err(e) => Err(e.into()),
  }
}

pub fn handle_cli(cli: Cli, registry: &Registry) -> Result<()> {
  cli.colors.apply();

  let mut prompter = DialoguerPrompter::new();
  match cli.command {
    Commands::Create(args) => with_config(registry, &mut prompter, |config, prompter| {
      create::handle_create_command(&args, config, registry, prompter)
    }),
    Commands::Issues => with_config(registry, &mut prompter, |config, _| {
      issues::handle_issues_command(config, registry)
    }),
    Commands::Init => init::handle_init_command(registry, &mut prompter),
    Commands::Alias => with_config(registry, &mut prompter, |_, _| alias::handle_alias_command()),
    Commands::Config => with_config(registry, &mut prompter, |config, _| {
      config::handle_config_command(config, registry)
    }),
  }
}

#[cfg(test)]
mod tests {
  use gibr_core::ScriptedPrompter;
  use gibr_test_utils::ConfigFileGuard;
  use serial_test::serial;

  use super::*;
  use crate::trackers::builtin_registry;

  fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
  }

  fn normalize(values: &[&str]) -> Vec<String> {
    normalize_args(args(values), &command_names())
  }

  #[test]
  fn test_command_names() {
    let names = command_names();
    for name in ["create", "issues", "init", "alias", "config"] {
      assert!(names.contains(&name.to_string()), "missing {name}");
    }
    assert_eq!(aliasable_commands(), vec!["create", "issues", "config"]);
  }

  #[test]
  fn test_bare_issue_id_becomes_create() {
    assert_eq!(normalize(&["gibr", "123"]), args(&["gibr", "create", "123"]));
    assert_eq!(normalize(&["gibr", "PROJ-123"]), args(&["gibr", "create", "PROJ-123"]));
    assert_eq!(normalize(&["gibr", "-v", "42"]), args(&["gibr", "-v", "create", "42"]));
  }

  #[test]
  fn test_commands_are_left_alone() {
    assert_eq!(normalize(&["gibr", "issues"]), args(&["gibr", "issues"]));
    assert_eq!(normalize(&["gibr", "create", "7"]), args(&["gibr", "create", "7"]));
    assert_eq!(normalize(&["gibr", "not-an-issue"]), args(&["gibr", "not-an-issue"]));
  }

  #[test]
  fn test_git_alias_routing() {
    assert_eq!(
      normalize(&["gibr", "git", "create", "12", "--verbose"]),
      args(&["gibr", "--verbose", "create", "12"])
    );
    assert_eq!(normalize(&["gibr", "git", "issues"]), args(&["gibr", "issues"]));
  }

  #[test]
  fn test_cli_parses_normalized_args() {
    let cli = Cli::try_parse_from(normalize(&["gibr", "-vv", "PROJ-9", "--colors", "never"])).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
    let Commands::Create(args) = cli.command else {
      panic!("expected the create command");
    };
    assert_eq!(args.issue_id, "PROJ-9");
  }

  #[test]
  fn test_with_spinner_passes_errors_through() {
    let value = with_spinner("Working", || Ok(5)).unwrap();
    assert_eq!(value, 5);

    let err = with_spinner::<()>("Working", || Err(GibrError::Config("boom".to_string()))).unwrap_err();
    assert_eq!(err.to_string(), "boom");
  }

  #[test]
  #[serial]
  fn test_missing_config_declined_init_fails() {
    let project = ConfigFileGuard::empty();
    let mut prompter = ScriptedPrompter::new(["n"]);
    let mut ran = false;

    let err = with_config(&builtin_registry(), &mut prompter, |_, _| {
      ran = true;
      Ok(())
    })
    .unwrap_err();

    assert!(matches!(err.downcast_ref::<GibrError>(), Some(GibrError::ConfigNotFound(_))));
    assert!(!ran);
    assert!(!project.config_path().exists());
  }

  #[test]
  #[serial]
  fn test_missing_config_accepted_init_writes_file() {
    let project = ConfigFileGuard::empty();
    let mut prompter = ScriptedPrompter::new(["y", "GitHub", "acme/widgets", "GIBR_INIT_TEST_TOKEN_UNSET"]);
    let mut ran = false;

    with_config(&builtin_registry(), &mut prompter, |_, _| {
      ran = true;
      Ok(())
    })
    .unwrap();

    assert!(!ran);
    assert!(project.config_path().exists());
    assert_eq!(prompter.remaining(), 0);
  }

  #[test]
  #[serial]
  fn test_existing_config_runs_command() {
    let _project = ConfigFileGuard::with_content("[issue-tracker]\nname = github\n");
    let mut prompter = ScriptedPrompter::default();

    let mut name = String::new();
    with_config(&builtin_registry(), &mut prompter, |config, _| {
      name = config.tracker_name()?.to_string();
      Ok(())
    })
    .unwrap();

    assert_eq!(name, "github");
  }
}
