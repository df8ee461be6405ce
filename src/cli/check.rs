//! `docsite check`: validate declarations and report every problem.

use std::path::PathBuf;

use anyhow::{Result, bail};
use serde::Serialize;

use docsite::config::{ConfigDiagnostic, ConfigDiagnostics, FieldPath, SiteConfig};
use docsite::log;
use docsite::utils::plural_count;

use super::Cli;
use super::common::{read_revisions, report, resolve_files};

/// Machine-readable result of a check.
#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    files: &'a [PathBuf],
    ok: bool,
    errors: &'a [ConfigDiagnostic],
    warnings: Vec<Warning<'a>>,
}

#[derive(Debug, Serialize)]
struct Warning<'a> {
    path: &'a FieldPath,
    message: &'a str,
}

impl<'a> CheckReport<'a> {
    fn new(files: &'a [PathBuf], diag: &'a ConfigDiagnostics) -> Self {
        Self {
            files,
            ok: !diag.has_errors(),
            errors: diag.errors(),
            warnings: diag
                .warnings()
                .iter()
                .map(|(path, message)| Warning { path, message })
                .collect(),
        }
    }
}

pub fn run_check(cli: &Cli, json: bool) -> Result<()> {
    let paths = resolve_files(cli)?;
    let raws = read_revisions(&paths)?;
    let (config, diag) = SiteConfig::check_revisions(&raws);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&CheckReport::new(&paths, &diag))?
        );
    } else {
        report(&paths, &diag);
    }

    let Some(config) = config else {
        bail!("found {}", plural_count(diag.len(), "error"));
    };

    if !json {
        log!("check"; "{}", summary(&config, paths.len()));
    }
    Ok(())
}

fn summary(config: &SiteConfig, revisions: usize) -> String {
    let pages = config.sidebar.pages().count();
    let mut line = format!(
        "'{}' ok: {}, {}",
        config.title,
        plural_count(pages, "page"),
        plural_count(config.head_tags().len(), "head tag")
    );
    if revisions > 1 {
        line.push_str(&format!(" (merged from {})", plural_count(revisions, "revision")));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsite::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_summary() {
        let config = SiteConfig::load(&json!({
            "site": "https://tidesdb.com",
            "title": "TidesDB",
            "description": "docs",
            "sidebar": [
                { "label": "Start", "items": [{ "label": "Intro", "slug": "intro" }] },
                { "label": "GitHub", "link": "https://github.com/tidesdb" },
            ],
        }))
        .unwrap();
        assert_eq!(summary(&config, 1), "'TidesDB' ok: 2 pages, 1 head tag");
        assert!(summary(&config, 3).ends_with("(merged from 3 revisions)"));
    }

    #[test]
    fn test_json_report_shape() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(ErrorCode::DuplicateTarget, FieldPath::new("sidebar/1"), "dup");
        diag.warn(FieldPath::new("titel"), "unknown field ignored");
        let files = [PathBuf::from("docsite.toml")];

        let value = serde_json::to_value(CheckReport::new(&files, &diag)).unwrap();
        assert_eq!(value["ok"], false);
        assert_eq!(value["files"][0], "docsite.toml");
        assert_eq!(value["errors"][0]["code"], "DuplicateTarget");
        assert_eq!(value["errors"][0]["path"], "sidebar/1");
        assert_eq!(value["warnings"][0]["path"], "titel");
    }
}
