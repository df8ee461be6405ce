//! docsite - configuration model and validator for documentation sites.
//!
//! A site is declared once (TOML or JSON) with its identity, branding,
//! injected head elements and a nested sidebar. [`SiteConfig::load`]
//! validates the whole declaration in one pass and returns every problem
//! as a located [`ConfigDiagnostic`]; successive revisions of a declaration
//! are reconciled with [`merge_revisions`].
//!
//! ```ignore
//! let raw = SiteConfig::read_raw(Path::new("docsite.toml"))?;
//! let config = SiteConfig::load(&raw)?;
//! for (depth, node) in config.sidebar.resolve() {
//!     println!("{}{}", "  ".repeat(depth), node.label);
//! }
//! ```

pub mod config;
pub mod logger;
pub mod utils;

pub use config::{
    ConfigDiagnostic, ConfigDiagnostics, ConfigError, ErrorCode, FieldPath, Format, HeadTag,
    NavNode, NavTree, SiteConfig, Target, find_duplicate_targets, merge_revisions, render_head,
};
