//! flavorcfg CLI
//!
//! Resolves declarations, flavor defaults and overrides from the shell.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: failed to initialize logging: {}", "warning".yellow(), e);
    }
    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Resolve { inputs, json } => commands::run_resolve(&inputs, json),
        Commands::Diff { inputs, json } => commands::run_diff(&inputs, json),
        Commands::Get { name, inputs } => commands::run_get(&name, &inputs),
    }
}
