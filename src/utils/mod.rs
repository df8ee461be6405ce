//! Utility modules.

pub mod html;
mod plural;

pub use plural::{plural_count, plural_s};
