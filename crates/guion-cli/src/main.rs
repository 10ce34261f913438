//! Guionista: run scripted UI test scenarios from the command line
//!
//! ## Usage
//!
//! ```bash
//! guionista check rename_page.yaml                       # Validate only
//! guionista run rename_page.yaml --page admin_page.yaml  # Execute
//! guionista run rename_page.yaml --page admin_page.yaml --record
//! ```

use clap::Parser;
use guionista::{handlers, logging, Cli, CliConfig, CliResult, Commands, Verbosity};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    logging::init(config.verbosity);

    match cli.command {
        Commands::Check(args) => handlers::execute_check(&config, &args),
        Commands::Run(args) => handlers::execute_run(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(cli.color.clone().into())
}
