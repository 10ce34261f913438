//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Guionista: CLI for Guion - scripted scenario runner for browser UI tests
#[derive(Parser, Debug)]
#[command(name = "guionista")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a scenario file without running it
    Check(CheckArgs),

    /// Run a scenario against a scripted page fixture
    Run(RunArgs),
}

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Scenario YAML file
    pub scenario: PathBuf,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario YAML file
    pub scenario: PathBuf,

    /// Page fixture YAML describing the scripted page
    #[arg(short, long)]
    pub page: PathBuf,

    /// Base URL to navigate to before the first step
    #[arg(long)]
    pub base_url: Option<String>,

    /// Checkpoint timeout in milliseconds
    #[arg(long, default_value = "10000")]
    pub timeout: u64,

    /// Record the run as an animated GIF
    #[arg(long)]
    pub record: bool,

    /// Output directory for recording artifacts
    #[arg(short, long, default_value = "target/guion")]
    pub output: PathBuf,

    /// Frame rate for recordings
    #[arg(long, default_value = "10")]
    pub fps: u8,

    /// Record checkpoint timeouts and keep going instead of aborting
    #[arg(long)]
    pub lenient_timeouts: bool,
}

/// Color argument for clap parsing
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Detect terminal support
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_structure_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_command() {
        let cli = Cli::parse_from([
            "guionista",
            "run",
            "rename_page.yaml",
            "--page",
            "admin_page.yaml",
            "--record",
            "--lenient-timeouts",
        ]);
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.scenario, PathBuf::from("rename_page.yaml"));
                assert_eq!(args.page, PathBuf::from("admin_page.yaml"));
                assert!(args.record);
                assert!(args.lenient_timeouts);
                assert_eq!(args.timeout, 10_000);
                assert_eq!(args.fps, 10);
            }
            Commands::Check(_) => panic!("expected run command"),
        }
    }

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::parse_from(["guionista", "-v", "check", "rename_page.yaml"]);
        assert_eq!(cli.verbose, 1);
        assert!(matches!(cli.command, Commands::Check(_)));
    }
}
