//! Guionista CLI library
//!
//! Command-line interface for the Guion scenario runner.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{CheckArgs, Cli, ColorArg, Commands, RunArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Printer;
