//! Locator paths into the raw declaration.

use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;

/// A slash-joined locator into the original declaration.
///
/// Built while walking the raw value so every diagnostic can point at the
/// entry that caused it, e.g. `sidebar/2/items/0`.
///
/// # Example
///
/// ```ignore
/// let path = FieldPath::root().key("sidebar").index(2).key("items").index(0);
/// assert_eq!(path.as_str(), "sidebar/2/items/0");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// The empty path, pointing at the declaration itself.
    #[inline]
    pub const fn root() -> Self {
        Self(String::new())
    }

    #[inline]
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Child path for a mapping key.
    ///
    /// `~` and `/` inside the key are written as `~0` and `~1`, so a key
    /// never reads as two segments.
    pub fn key(&self, key: &str) -> Self {
        if key.contains(['~', '/']) {
            self.join(&key.replace('~', "~0").replace('/', "~1"))
        } else {
            self.join(key)
        }
    }

    /// Child path for a sequence position.
    pub fn index(&self, index: usize) -> Self {
        self.join(&index.to_string())
    }

    /// Prefix this path with another one (used when nesting revisions).
    pub fn under(&self, prefix: &FieldPath) -> Self {
        if self.0.is_empty() {
            prefix.clone()
        } else {
            prefix.join(&self.0)
        }
    }

    fn join(&self, segment: &str) -> Self {
        if self.0.is_empty() {
            Self(segment.to_string())
        } else {
            Self(format!("{}/{}", self.0, segment))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = if self.0.is_empty() { "<root>" } else { &self.0 };
        write!(f, "{}", format_args!("`{shown}`").bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
