//! Site declaration management for `docsite.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Section definitions
//! │   ├── head       # [[head]]
//! │   ├── sidebar/   # [[sidebar]] tree, traversal, duplicates
//! │   └── site/      # site, title, description, logo, social, customCss
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! ├── merge          # merge_revisions
//! ├── raw            # Reader over the untyped declaration
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key           | Purpose                                      |
//! |---------------|----------------------------------------------|
//! | `site`        | Base URL (required)                          |
//! | `title`       | Site title (required)                        |
//! | `description` | SEO description                              |
//! | `logo`        | Light/dark logo assets                       |
//! | `social`      | Platform -> profile URL                      |
//! | `customCss`   | Extra stylesheets                            |
//! | `head`        | Elements injected into every document head   |
//! | `sidebar`     | Navigation tree (required, may be empty)     |

mod merge;
pub(crate) mod raw;
pub mod section;
pub mod types;
mod util;

pub use merge::merge_revisions;
pub use util::{extract_url_path, find_config_file, find_config_file_from};

// Re-export from section/
pub use section::{
    AttrValue, HeadIntent, HeadKey, HeadTag, HeadTagKind, LogoConfig, MAX_RECOMMENDED_DEPTH,
    NavId, NavIter, NavKind, NavNode, NavTree, NavWalk, SocialLinks, Target, dedup_head,
    find_duplicate_targets, render_head,
};

// Re-export from types/
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, ErrorCode, FieldPath};

use section::site::{
    CUSTOM_CSS, DESCRIPTION, LOGO, SITE, SOCIAL, SiteInfo, TITLE, parse_custom_css, parse_social,
};
use section::{head, sidebar};

use raw::RawTable;
use serde::Serialize;
use serde_json::Value;
use std::{fs, path::Path};
use url::Url;

use crate::debug;

const FIELDS: &[&str] = &[
    SITE,
    TITLE,
    DESCRIPTION,
    LOGO,
    SOCIAL,
    CUSTOM_CSS,
    head::KEY,
    sidebar::KEY,
];

// ============================================================================
// input format
// ============================================================================

/// Text format of a declaration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Toml,
    Json,
}

impl Format {
    /// Pick the format from the file extension; anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

// ============================================================================
// root configuration
// ============================================================================

/// Validated, canonicalized site declaration.
///
/// Built once by [`SiteConfig::load`] and immutable afterwards. Serializes
/// to the declaration shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Base URL of the deployed site.
    pub site: Url,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<LogoConfig>,
    #[serde(skip_serializing_if = "SocialLinks::is_empty")]
    pub social: SocialLinks,
    /// Stylesheets injected after the declared head tags.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_css: Vec<String>,
    /// Declared head tags, de-duplicated by identity.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub head: Vec<HeadTag>,
    pub sidebar: NavTree,
}

impl SiteConfig {
    /// Validate a raw declaration, collecting every diagnostic.
    ///
    /// The config is returned only when no error was recorded; warnings are
    /// reported either way.
    pub fn check(raw: &Value) -> (Option<Self>, ConfigDiagnostics) {
        let mut diag = ConfigDiagnostics::new();
        let config = Self::check_into(raw, &mut diag);
        if diag.has_errors() {
            return (None, diag);
        }
        (config, diag)
    }

    fn check_into(raw: &Value, diag: &mut ConfigDiagnostics) -> Option<Self> {
        let table = RawTable::open(raw, FieldPath::root(), FIELDS, diag)?;

        let info = SiteInfo::from_raw(&table, diag);
        let logo = table
            .get(LOGO)
            .and_then(|value| LogoConfig::from_raw(value, table.path_of(LOGO), diag));
        let social = table
            .table(SOCIAL, diag)
            .map(|map| parse_social(map, &table.path_of(SOCIAL), diag))
            .unwrap_or_default();
        let custom_css = table
            .array(CUSTOM_CSS, diag)
            .map(|items| parse_custom_css(items, &table.path_of(CUSTOM_CSS), diag))
            .unwrap_or_default();
        let head = table
            .array(head::KEY, diag)
            .map(|items| head::parse_head(items, &table.path_of(head::KEY), diag))
            .unwrap_or_default();

        if !table.has(sidebar::KEY) {
            diag.error_with_hint(
                ErrorCode::InvalidConfig,
                table.path_of(sidebar::KEY),
                "`sidebar` is required",
                "use `sidebar = []` for a site without navigation",
            );
        }
        let sidebar = table
            .array(sidebar::KEY, diag)
            .map(|items| sidebar::parse_sidebar(items, &table.path_of(sidebar::KEY), diag))
            .unwrap_or_default();

        let SiteInfo {
            site,
            title,
            description,
        } = info?;

        debug!(
            "config";
            "{} sidebar entries, {} head tags, {} social links",
            sidebar.len(),
            head.len(),
            social.len()
        );

        Some(Self {
            site,
            title,
            description,
            logo,
            social,
            custom_css,
            head,
            sidebar,
        })
    }

    /// Validate a raw declaration.
    ///
    /// Returns every error found (in traversal order) on failure. Warnings
    /// are dropped; use [`check`](Self::check) to see them.
    pub fn load(raw: &Value) -> Result<Self, ConfigDiagnostics> {
        match Self::check(raw) {
            (Some(config), _) => Ok(config),
            (None, diag) => Err(diag),
        }
    }

    /// Validate successive revisions and fold them with [`merge_revisions`].
    ///
    /// With more than one revision, diagnostic paths are prefixed with
    /// `revisions/<i>`.
    pub fn check_revisions(raws: &[Value]) -> (Option<Self>, ConfigDiagnostics) {
        let mut diag = ConfigDiagnostics::new();
        if raws.is_empty() {
            diag.error(
                ErrorCode::InvalidConfig,
                FieldPath::root(),
                "no declaration to load",
            );
            return (None, diag);
        }

        let nested = raws.len() > 1;
        let mut configs = Vec::with_capacity(raws.len());
        for (i, raw) in raws.iter().enumerate() {
            let (config, revision) = Self::check(raw);
            let prefix = if nested {
                FieldPath::root().key("revisions").index(i)
            } else {
                FieldPath::root()
            };
            diag.absorb(revision, &prefix);
            configs.extend(config);
        }

        if diag.has_errors() {
            return (None, diag);
        }
        let merged = configs
            .into_iter()
            .reduce(|base, overlay| merge_revisions(&base, &overlay));
        (merged, diag)
    }

    /// [`check_revisions`](Self::check_revisions) without the warnings.
    pub fn load_revisions(raws: &[Value]) -> Result<Self, ConfigDiagnostics> {
        match Self::check_revisions(raws) {
            (Some(config), _) => Ok(config),
            (None, diag) => Err(diag),
        }
    }

    /// Parse declaration text into the raw value.
    pub fn parse_raw(content: &str, format: Format) -> Result<Value, ConfigError> {
        Ok(match format {
            Format::Toml => toml::from_str(content)?,
            Format::Json => serde_json::from_str(content)?,
        })
    }

    /// Read a declaration file into the raw value.
    pub fn read_raw(path: &Path) -> Result<Value, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::parse_raw(&content, Format::from_path(path))
    }

    /// Parse and validate declaration text.
    pub fn load_str(content: &str, format: Format) -> Result<Self, ConfigError> {
        let raw = Self::parse_raw(content, format)?;
        Self::load(&raw).map_err(ConfigError::Diagnostics)
    }

    /// Read, parse and validate a declaration file, printing its warnings.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = Self::read_raw(path)?;
        let (config, diag) = Self::check(&raw);
        diag.print_warnings();
        config.ok_or(ConfigError::Diagnostics(diag))
    }

    /// Merge `overlay` on top of `self`. See [`merge_revisions`].
    pub fn merge(&self, overlay: &Self) -> Self {
        merge_revisions(self, overlay)
    }

    // ========================================================================
    // derived views
    // ========================================================================

    /// Path prefix of the deployed site (`docs` for `https://x.io/docs/`).
    pub fn path_prefix(&self) -> String {
        extract_url_path(self.site.as_str()).unwrap_or_default()
    }

    /// Where a sidebar target points in the built site.
    ///
    /// Slugs become root-relative page URLs under the path prefix; links are
    /// returned unchanged.
    pub fn href(&self, target: &Target) -> String {
        match target {
            Target::Link(link) => link.clone(),
            Target::Slug(slug) => {
                let prefix = self.path_prefix();
                if prefix.is_empty() {
                    format!("/{slug}/")
                } else {
                    format!("/{prefix}/{slug}/")
                }
            }
        }
    }

    /// Effective head in injection order: description meta, declared tags,
    /// then one stylesheet link per `customCss` entry.
    pub fn head_tags(&self) -> Vec<HeadTag> {
        let description = self
            .description
            .as_deref()
            .map(|d| HeadTag::meta("description", d));
        let stylesheets = self
            .custom_css
            .iter()
            .map(|sheet| HeadTag::link("stylesheet", sheet));

        dedup_head(
            description
                .into_iter()
                .chain(self.head.iter().cloned())
                .chain(stylesheets),
        )
    }

    // ========================================================================
    // serialization
    // ========================================================================

    /// Serialize back to the input shape; [`load`](Self::load) accepts the
    /// result and yields an equal config.
    pub fn to_value(&self) -> Result<Value, ConfigError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Canonical TOML text.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Canonical JSON text.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a minimal valid config with `extra` keys merged over it.
#[cfg(test)]
pub fn test_load_config(extra: Value) -> SiteConfig {
    let mut raw = serde_json::json!({
        "site": "https://tidesdb.com",
        "title": "TidesDB",
        "sidebar": [],
    });
    if let (Value::Object(base), Value::Object(extra)) = (&mut raw, extra) {
        base.extend(extra);
    }
    SiteConfig::load(&raw).unwrap_or_else(|diag| panic!("{diag}"))
}
