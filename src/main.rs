//! docsite - validate, inspect and merge documentation site declarations.

mod cli;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use docsite::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Check { json, .. } => cli::check::run_check(&cli, *json),
        Commands::Nav { hrefs, .. } => cli::nav::run_nav(&cli, *hrefs),
        Commands::Head { .. } => cli::head::run_head(&cli),
        Commands::Merge { format, .. } => cli::merge::run_merge(&cli, *format),
    }
}
