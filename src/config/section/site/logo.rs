//! `logo` configuration.
//!
//! Either a single `src` used for both color schemes, or a `light`/`dark`
//! pair:
//!
//! ```toml
//! [logo]
//! light = "./src/assets/logo-light.png"
//! dark = "./src/assets/logo-dark.svg"
//! replacesTitle = true
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::config::raw::RawTable;
use crate::config::{ConfigDiagnostics, ErrorCode, FieldPath};

pub(crate) const KEY: &str = "logo";

const FIELDS: &[&str] = &["src", "light", "dark", "alt", "replacesTitle"];

/// Logo asset references. A single `src` is stored as `light == dark`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoConfig {
    pub light: String,
    pub dark: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Hide the title text next to the logo.
    pub replaces_title: bool,
}

impl LogoConfig {
    pub(crate) fn from_raw(
        value: &Value,
        path: FieldPath,
        diag: &mut ConfigDiagnostics,
    ) -> Option<Self> {
        let table = RawTable::open(value, path, FIELDS, diag)?;

        let src = asset(&table, "src", diag);
        let light = asset(&table, "light", diag);
        let dark = asset(&table, "dark", diag);
        let alt = table.string("alt", diag).map(str::to_string);
        let replaces_title = table.bool("replacesTitle", diag).unwrap_or(false);

        let (light, dark) = match (src, light, dark) {
            (Some(src), None, None) => (src.clone(), src),
            (None, Some(light), Some(dark)) => (light, dark),
            (Some(_), _, _) => {
                diag.error_with_hint(
                    ErrorCode::InvalidConfig,
                    table.path_of("src"),
                    "`src` cannot be combined with `light`/`dark`",
                    "use `src` for one logo, or `light` and `dark` for per-scheme logos",
                );
                return None;
            }
            (None, light, _) => {
                let missing = if light.is_none() { "light" } else { "dark" };
                diag.error(
                    ErrorCode::InvalidConfig,
                    table.path_of(missing),
                    format!("logo needs `src`, or both `light` and `dark` (missing `{missing}`)"),
                );
                return None;
            }
        };

        Some(Self {
            light,
            dark,
            alt,
            replaces_title,
        })
    }

    /// Whether one asset serves both color schemes.
    #[inline]
    pub fn is_single(&self) -> bool {
        self.light == self.dark
    }
}

fn asset(table: &RawTable<'_>, key: &str, diag: &mut ConfigDiagnostics) -> Option<String> {
    let raw = table.string(key, diag)?.trim();
    if raw.is_empty() {
        diag.error(
            ErrorCode::InvalidConfig,
            table.path_of(key),
            "asset reference must not be empty",
        );
        return None;
    }
    Some(raw.to_string())
}
