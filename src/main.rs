//! linguaease - cached text translation from the command line
//!
//! linguaease provides:
//! - A persistent JSON cache keyed by text and language pair
//! - Translation through a pluggable provider (HTTP by default)
//! - A language catalogue resolving display names to codes
//! - Unified output format (jsonl/json/md/raw)

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

mod cache;
mod cli;
mod commands;
mod config;
mod core;
mod logging;
mod translate;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    logging::init(cli.verbose, cli.quiet, cli.no_color);

    match cli::run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
