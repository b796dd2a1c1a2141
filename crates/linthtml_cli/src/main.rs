//! linthtml CLI
//!
//! Lints HTML files, honouring `linthtml-configure` comments in the markup.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::{run_init, run_lint, run_rules};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(has_issues) => {
            if has_issues {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs the selected command. `Ok(true)` means issues or failures were found.
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint { patterns, format } => run_lint(cli, patterns, *format),
        Commands::Init { force } => run_init(*force).map(|_| false),
        Commands::Rules => run_rules(cli).map(|_| false),
    }
}
