//! `sidebar` configuration: the navigation tree.
//!
//! # Example
//!
//! ```toml
//! [[sidebar]]
//! label = "Getting started"
//!
//! [[sidebar.items]]
//! label = "What is TidesDB?"
//! slug = "getting-started/what-is-tidesdb"
//!
//! [[sidebar]]
//! label = "GitHub"
//! link = "https://github.com/tidesdb"
//! ```
//!
//! An entry with `items` is a group; otherwise it is a page with exactly one
//! of `slug` or `link`.

mod dup;
mod iter;
mod parse;
mod tree;

pub use dup::find_duplicate_targets;
pub use iter::{NavIter, NavWalk};
pub use parse::MAX_RECOMMENDED_DEPTH;
pub use tree::{NavId, NavKind, NavNode, NavTree, Target};

pub(crate) use parse::parse_sidebar;

pub(crate) const KEY: &str = "sidebar";
