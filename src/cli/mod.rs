//! Command-line interface module.

mod args;
pub mod check;
pub mod common;
pub mod head;
pub mod merge;
pub mod nav;

pub use args::{Cli, Commands, OutputFormat};
