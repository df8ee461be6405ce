//! `social` links and `customCss` stylesheets.

use indexmap::IndexMap;
use serde_json::Value;

use crate::config::raw::kind_of;
use crate::config::util::{is_external_url, parse_external_url};
use crate::config::{ConfigDiagnostics, ErrorCode, FieldPath};

pub(crate) const SOCIAL: &str = "social";
pub(crate) const CUSTOM_CSS: &str = "customCss";

/// Platform name -> profile URL, in declaration order.
pub type SocialLinks = IndexMap<String, String>;

/// Parse `social`. Every value must be an absolute URL.
pub(crate) fn parse_social(
    map: &serde_json::Map<String, Value>,
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> SocialLinks {
    let mut links = SocialLinks::with_capacity(map.len());

    for (platform, value) in map {
        let entry_path = path.key(platform);
        let Value::String(url) = value else {
            diag.error(
                ErrorCode::InvalidConfig,
                entry_path,
                format!("expected a URL string, found a {}", kind_of(value)),
            );
            continue;
        };
        if parse_external_url(url, entry_path, diag).is_some() {
            links.insert(platform.clone(), url.trim().to_string());
        }
    }

    links
}

/// Parse `customCss`: content-relative stylesheet paths or absolute URLs.
///
/// Repeated entries collapse onto their last occurrence.
pub(crate) fn parse_custom_css(
    items: &[Value],
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Vec<String> {
    let mut sheets = Vec::with_capacity(items.len());

    for (i, item) in items.iter().enumerate() {
        let item_path = path.index(i);
        let Value::String(sheet) = item else {
            diag.error(
                ErrorCode::InvalidConfig,
                item_path,
                format!("expected a stylesheet path, found a {}", kind_of(item)),
            );
            continue;
        };
        let sheet = sheet.trim();
        if sheet.is_empty() {
            diag.error(
                ErrorCode::InvalidConfig,
                item_path,
                "stylesheet path must not be empty",
            );
            continue;
        }
        if is_external_url(sheet) && parse_external_url(sheet, item_path.clone(), diag).is_none() {
            continue;
        }
        if sheets.iter().any(|s| s == sheet) {
            diag.warn(item_path, format!("stylesheet '{sheet}' listed more than once"));
        }
        sheets.push(sheet.to_string());
    }

    dedup_keep_last(sheets)
}

/// Drop earlier copies of repeated entries, keeping each at its last position.
pub(crate) fn dedup_keep_last(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        out.retain(|existing| *existing != item);
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_social_preserves_order() {
        let mut diag = ConfigDiagnostics::new();
        let raw = json!({
            "github": "https://github.com/tidesdb/tidesdb",
            "discord": "https://discord.gg/tWEmjR66cy",
        });
        let links = parse_social(raw.as_object().unwrap(), &FieldPath::new(SOCIAL), &mut diag);
        assert!(diag.is_empty());
        let keys: Vec<_> = links.keys().map(String::as_str).collect();
        assert_eq!(keys, ["github", "discord"]);
    }

    #[test]
    fn test_social_rejects_relative_url() {
        let mut diag = ConfigDiagnostics::new();
        let raw = json!({ "github": "github.com/tidesdb", "x": 1 });
        let links = parse_social(raw.as_object().unwrap(), &FieldPath::new(SOCIAL), &mut diag);
        assert!(links.is_empty());
        assert_eq!(diag.len(), 2);
        assert_eq!(diag.errors()[0].path.as_str(), "social/github");
        assert_eq!(diag.errors()[1].path.as_str(), "social/x");
    }

    #[test]
    fn test_custom_css_keeps_last_duplicate() {
        let mut diag = ConfigDiagnostics::new();
        let raw = json!(["./src/a.css", "./src/b.css", "./src/a.css"]);
        let sheets = parse_custom_css(
            raw.as_array().unwrap(),
            &FieldPath::new(CUSTOM_CSS),
            &mut diag,
        );
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(sheets, ["./src/b.css", "./src/a.css"]);
    }

    #[test]
    fn test_custom_css_rejects_empty() {
        let mut diag = ConfigDiagnostics::new();
        let raw = json!(["", 3]);
        let sheets = parse_custom_css(
            raw.as_array().unwrap(),
            &FieldPath::new(CUSTOM_CSS),
            &mut diag,
        );
        assert!(sheets.is_empty());
        assert_eq!(diag.len(), 2);
    }
}
