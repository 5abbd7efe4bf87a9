//! # Gibr CLI Entry Point
//!
//! Parses arguments, sets up tracing and runs the selected command. Errors
//! are printed once here and turn into exit code 1.

use std::process::ExitCode;

use clap::Parser;
use gibr_cli::cli::{Cli, command_names, handle_cli, normalize_args};
use gibr_cli::trackers::builtin_registry;
use gibr_core::print_error;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> ExitCode {
  let args: Vec<String> = std::env::args_os()
    .map(|arg| arg.to_string_lossy().into_owned())
    .collect();
  let cmd = Cli::parse_from(normalize_args(args, &command_names()));

  // Set up tracing based on verbosity level
  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  let registry = builtin_registry();
  match handle_cli(cmd, &registry) {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      print_error(&format!("{e:#}"));
      ExitCode::FAILURE
    }
  }
}
