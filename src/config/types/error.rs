//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config file parsing error")]
    Json(#[from] serde_json::Error),

    #[error("Config serialization error")]
    TomlOutput(#[from] toml::ser::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

// ============================================================================
// ErrorCode
// ============================================================================

/// Validation error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorCode {
    /// Malformed or missing scalar field, wrong shape, bad URL.
    InvalidConfig,
    /// Page with zero or two targets (or a script with both `src` and content).
    AmbiguousTarget,
    /// Two sibling pages resolve to the same target.
    DuplicateTarget,
    /// Head tag missing an attribute its kind requires.
    IncompleteHeadTag,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "InvalidConfig",
            Self::AmbiguousTarget => "AmbiguousTarget",
            Self::DuplicateTarget => "DuplicateTarget",
            Self::IncompleteHeadTag => "IncompleteHeadTag",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// A single configuration diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigDiagnostic {
    pub code: ErrorCode,
    /// Locator into the declaration (e.g., "sidebar/2/items/0")
    pub path: FieldPath,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Other entries involved (e.g. the first declaration of a duplicate)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<FieldPath>,
}

impl ConfigDiagnostic {
    pub fn new(code: ErrorCode, path: FieldPath, message: impl Into<String>) -> Self {
        Self {
            code,
            path,
            message: message.into(),
            hint: None,
            related: Vec::new(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_related(mut self, related: FieldPath) -> Self {
        self.related.push(related);
        self
    }

    /// Prefix the path (and related paths) with `prefix`.
    fn nest(mut self, prefix: &FieldPath) -> Self {
        self.path = self.path.under(prefix);
        for related in &mut self.related {
            *related = related.under(prefix);
        }
        self
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Locator in cyan brackets, code dimmed
        writeln!(
            f,
            "{}{}{} {}",
            "[".dimmed(),
            self.path.as_str().cyan(),
            "]".dimmed(),
            self.code.as_str().dimmed()
        )?;
        // Error message with red bullet
        write!(f, "{} {}", "→".red(), self.message)?;
        if !self.related.is_empty() {
            let related: Vec<_> = self.related.iter().map(FieldPath::as_str).collect();
            write!(f, "\n  {} {}", "see:".dimmed(), related.join(", "))?;
        }
        // Hint in yellow
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Collected diagnostics for one validation pass.
///
/// Errors make the declaration unusable; warnings never do.
#[derive(Debug, Default, Clone)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigDiagnostic>,
    warnings: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, code: ErrorCode, path: FieldPath, message: impl Into<String>) {
        self.errors.push(ConfigDiagnostic::new(code, path, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        code: ErrorCode,
        path: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(ConfigDiagnostic::new(code, path, message).with_hint(hint));
    }

    /// Add a fully built diagnostic.
    pub fn push(&mut self, diagnostic: ConfigDiagnostic) {
        self.errors.push(diagnostic);
    }

    /// Add a warning (collected for batch display).
    pub fn warn(&mut self, path: FieldPath, message: impl Into<String>) {
        self.warnings.push((path, message.into()));
    }

    /// Move everything from `other` into `self`, prefixing paths with `prefix`.
    pub fn absorb(&mut self, other: ConfigDiagnostics, prefix: &FieldPath) {
        self.errors
            .extend(other.errors.into_iter().map(|d| d.nest(prefix)));
        self.warnings.extend(
            other
                .warnings
                .into_iter()
                .map(|(path, message)| (path.under(prefix), message)),
        );
    }

    /// Print collected warnings in a grouped format.
    pub fn print_warnings(&self) {
        if self.warnings.is_empty() {
            return;
        }
        crate::log!("warning"; "{}:", crate::utils::plural_count(self.warnings.len(), "warning"));
        for (path, message) in &self.warnings {
            eprintln!("- {} {}", path.as_str().cyan(), message);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigDiagnostic] {
        &self.errors
    }

    pub fn warnings(&self) -> &[(FieldPath, String)] {
        &self.warnings
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("docsite.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = format!("{io_err}");
        assert!(display.contains("IO error"));
        assert!(display.contains("docsite.toml"));
    }

    #[test]
    fn test_diagnostics_into_result() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(FieldPath::new("sidebar/0"), "deep");
        assert!(diag.clone().into_result().is_ok());

        diag.error(ErrorCode::InvalidConfig, FieldPath::new("site"), "bad url");
        let err = diag.into_result().unwrap_err();
        assert_eq!(err.len(), 1);
        assert_eq!(err.warnings().len(), 1);
    }

    #[test]
    fn test_absorb_prefixes_paths() {
        let mut inner = ConfigDiagnostics::new();
        inner.push(
            ConfigDiagnostic::new(
                ErrorCode::DuplicateTarget,
                FieldPath::new("sidebar/1"),
                "dup",
            )
            .with_related(FieldPath::new("sidebar/0")),
        );
        inner.warn(FieldPath::new("head/0"), "moved");

        let mut outer = ConfigDiagnostics::new();
        outer.absorb(inner, &FieldPath::new("revisions/2"));

        let err = &outer.errors()[0];
        assert_eq!(err.path.as_str(), "revisions/2/sidebar/1");
        assert_eq!(err.related[0].as_str(), "revisions/2/sidebar/0");
        assert_eq!(outer.warnings()[0].0.as_str(), "revisions/2/head/0");
    }

    #[test]
    fn test_diagnostic_serializes_as_triple() {
        let diag = ConfigDiagnostic::new(
            ErrorCode::AmbiguousTarget,
            FieldPath::new("sidebar/3"),
            "page has no target",
        );
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["code"], "AmbiguousTarget");
        assert_eq!(json["path"], "sidebar/3");
        assert_eq!(json["message"], "page has no target");
        assert!(json.get("hint").is_none());
    }
}
