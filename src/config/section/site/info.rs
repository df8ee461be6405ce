//! Site identity: `site`, `title`, `description`.
//!
//! ```toml
//! site = "https://tidesdb.com"
//! title = "TidesDB"
//! description = "Fast embeddable key-value storage engine"
//! ```

use url::Url;

use crate::config::raw::RawTable;
use crate::config::{ConfigDiagnostics, ErrorCode, FieldPath};

pub(crate) const SITE: &str = "site";
pub(crate) const TITLE: &str = "title";
pub(crate) const DESCRIPTION: &str = "description";

/// Validated identity fields, before they are spread into `SiteConfig`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SiteInfo {
    pub site: Url,
    pub title: String,
    pub description: Option<String>,
}

impl SiteInfo {
    pub fn from_raw(table: &RawTable<'_>, diag: &mut ConfigDiagnostics) -> Option<Self> {
        let site = table
            .required_string(SITE, diag)
            .and_then(|raw| parse_site_url(raw, table.path_of(SITE), diag));
        let title = table
            .required_string(TITLE, diag)
            .map(|t| t.trim().to_string());
        let description = table
            .string(DESCRIPTION, diag)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Some(Self {
            site: site?,
            title: title?,
            description,
        })
    }
}

/// Parse the base URL of the site.
///
/// # Checks
/// - must parse as an absolute URL
/// - scheme must be `http` or `https`
/// - must have a host
pub fn parse_site_url(raw: &str, path: FieldPath, diag: &mut ConfigDiagnostics) -> Option<Url> {
    const HINT: &str = "use format like https://example.com";

    let parsed = match Url::parse(raw.trim()) {
        Ok(parsed) => parsed,
        Err(e) => {
            diag.error_with_hint(
                ErrorCode::InvalidConfig,
                path,
                format!("invalid URL '{raw}': {e}"),
                HINT,
            );
            return None;
        }
    };

    if !matches!(parsed.scheme(), "http" | "https") {
        diag.error_with_hint(
            ErrorCode::InvalidConfig,
            path,
            format!(
                "scheme '{}' not supported, must be http or https",
                parsed.scheme()
            ),
            HINT,
        );
        return None;
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        diag.error_with_hint(
            ErrorCode::InvalidConfig,
            path,
            "URL must have a valid host",
            HINT,
        );
        return None;
    }

    Some(parsed)
}
