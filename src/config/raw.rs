//! Reader over the untyped declaration.
//!
//! The declaration arrives as a `serde_json::Value` (TOML input is parsed
//! into the same representation). Readers never fail: a wrong shape is
//! recorded in [`ConfigDiagnostics`] and the field is treated as absent, so
//! one pass reports every problem.

use serde_json::{Map, Value};

use super::{ConfigDiagnostics, ErrorCode, FieldPath};

/// Short name of a value's JSON type, for messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "table",
    }
}

/// A mapping in the declaration, with its locator.
pub(crate) struct RawTable<'a> {
    map: &'a Map<String, Value>,
    path: FieldPath,
}

impl<'a> RawTable<'a> {
    /// Open `value` as a table, warning about keys outside `known`.
    ///
    /// Returns `None` (after recording an error) if `value` is not a table.
    pub fn open(
        value: &'a Value,
        path: FieldPath,
        known: &[&str],
        diag: &mut ConfigDiagnostics,
    ) -> Option<Self> {
        let Value::Object(map) = value else {
            diag.error(
                ErrorCode::InvalidConfig,
                path,
                format!("expected a table, found a {}", kind_of(value)),
            );
            return None;
        };

        for key in map.keys() {
            if !known.contains(&key.as_str()) {
                diag.warn(
                    path.key(key),
                    format!("unknown field ignored (expected one of: {})", known.join(", ")),
                );
            }
        }

        Some(Self { map, path })
    }

    #[inline]
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Locator of a child key.
    #[inline]
    pub fn path_of(&self, key: &str) -> FieldPath {
        self.path.key(key)
    }

    /// Raw child value. `null` counts as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    /// Whether the key is declared (non-null), regardless of its type.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Optional string field.
    pub fn string(&self, key: &str, diag: &mut ConfigDiagnostics) -> Option<&'a str> {
        match self.get(key)? {
            Value::String(s) => Some(s),
            other => {
                self.wrong_type(key, "a string", other, diag);
                None
            }
        }
    }

    /// Required, non-empty string field.
    pub fn required_string(&self, key: &str, diag: &mut ConfigDiagnostics) -> Option<&'a str> {
        if !self.has(key) {
            diag.error(
                ErrorCode::InvalidConfig,
                self.path_of(key),
                format!("`{key}` is required"),
            );
            return None;
        }
        let value = self.string(key, diag)?;
        if value.trim().is_empty() {
            diag.error(
                ErrorCode::InvalidConfig,
                self.path_of(key),
                format!("`{key}` must not be empty"),
            );
            return None;
        }
        Some(value)
    }

    /// Optional boolean field.
    pub fn bool(&self, key: &str, diag: &mut ConfigDiagnostics) -> Option<bool> {
        match self.get(key)? {
            Value::Bool(b) => Some(*b),
            other => {
                self.wrong_type(key, "a boolean", other, diag);
                None
            }
        }
    }

    /// Optional sequence field.
    pub fn array(&self, key: &str, diag: &mut ConfigDiagnostics) -> Option<&'a [Value]> {
        match self.get(key)? {
            Value::Array(items) => Some(items),
            other => {
                self.wrong_type(key, "a sequence", other, diag);
                None
            }
        }
    }

    /// Optional mapping field.
    pub fn table(
        &self,
        key: &str,
        diag: &mut ConfigDiagnostics,
    ) -> Option<&'a Map<String, Value>> {
        match self.get(key)? {
            Value::Object(map) => Some(map),
            other => {
                self.wrong_type(key, "a table", other, diag);
                None
            }
        }
    }

    fn wrong_type(&self, key: &str, expected: &str, found: &Value, diag: &mut ConfigDiagnostics) {
        diag.error(
            ErrorCode::InvalidConfig,
            self.path_of(key),
            format!("expected {expected}, found a {}", kind_of(found)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_rejects_non_table() {
        let mut diag = ConfigDiagnostics::new();
        let value = json!(["not", "a", "table"]);
        assert!(RawTable::open(&value, FieldPath::new("logo"), &["src"], &mut diag).is_none());
        assert_eq!(diag.errors()[0].path.as_str(), "logo");
        assert!(diag.errors()[0].message.contains("sequence"));
    }

    #[test]
    fn test_unknown_keys_warn() {
        let mut diag = ConfigDiagnostics::new();
        let value = json!({ "title": "x", "titel": "y" });
        let table = RawTable::open(&value, FieldPath::root(), &["title"], &mut diag).unwrap();
        assert_eq!(table.string("title", &mut diag), Some("x"));
        assert!(diag.is_empty());
        assert_eq!(diag.warnings().len(), 1);
        assert_eq!(diag.warnings()[0].0.as_str(), "titel");
    }

    #[test]
    fn test_null_is_absent() {
        let mut diag = ConfigDiagnostics::new();
        let value = json!({ "description": null });
        let table =
            RawTable::open(&value, FieldPath::root(), &["description"], &mut diag).unwrap();
        assert!(!table.has("description"));
        assert_eq!(table.string("description", &mut diag), None);
        assert!(diag.is_empty());
    }

    #[test]
    fn test_required_string() {
        let mut diag = ConfigDiagnostics::new();
        let value = json!({ "title": "  ", "site": 3 });
        let table =
            RawTable::open(&value, FieldPath::root(), &["title", "site", "x"], &mut diag).unwrap();
        assert_eq!(table.required_string("title", &mut diag), None);
        assert_eq!(table.required_string("site", &mut diag), None);
        assert_eq!(table.required_string("x", &mut diag), None);

        let messages: Vec<_> = diag.errors().iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "`title` must not be empty",
                "expected a string, found a number",
                "`x` is required"
            ]
        );
    }
}
