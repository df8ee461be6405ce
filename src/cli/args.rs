//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Documentation site configuration checker
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file searched upward from the current directory when no
    /// FILES are given (default: docsite.toml)
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = "docsite.toml",
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate declarations and report every problem
    #[command(visible_alias = "c")]
    Check {
        #[command(flatten)]
        files: FilesArgs,

        /// Print diagnostics as JSON on stdout
        #[arg(long)]
        json: bool,
    },

    /// Print the flattened sidebar
    #[command(visible_alias = "n")]
    Nav {
        #[command(flatten)]
        files: FilesArgs,

        /// Show where each page points in the built site
        #[arg(long)]
        hrefs: bool,
    },

    /// Print the rendered head elements
    Head {
        #[command(flatten)]
        files: FilesArgs,
    },

    /// Print the canonical merged declaration
    #[command(visible_alias = "m")]
    Merge {
        #[command(flatten)]
        files: FilesArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Toml)]
        format: OutputFormat,
    },
}

/// Declaration files shared by every command.
#[derive(clap::Args, Debug, Clone)]
pub struct FilesArgs {
    /// Declaration revisions, oldest first (TOML or JSON by extension).
    /// Later files are merged on top of earlier ones.
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
}

/// Serialization format for `merge`.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Toml,
    Json,
}

impl Cli {
    pub fn files(&self) -> &FilesArgs {
        match &self.command {
            Commands::Check { files, .. }
            | Commands::Nav { files, .. }
            | Commands::Head { files }
            | Commands::Merge { files, .. } => files,
        }
    }
}
