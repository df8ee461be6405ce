//! Common utilities shared across CLI commands.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use docsite::config::{ConfigDiagnostics, SiteConfig, find_config_file};
use docsite::utils::plural_count;
use docsite::{debug, log};

use super::Cli;

/// Declaration files to load: the ones given on the command line, or the
/// config file found by searching upward from the current directory.
pub fn resolve_files(cli: &Cli) -> Result<Vec<PathBuf>> {
    let files = &cli.files().files;
    if !files.is_empty() {
        return Ok(files.clone());
    }

    match find_config_file(&cli.config) {
        Some(path) => {
            debug!("config"; "using {}", path.display());
            Ok(vec![path])
        }
        None => bail!(
            "config file '{}' not found in the current directory or any parent",
            cli.config.display()
        ),
    }
}

/// Read every file into its raw value, oldest revision first.
pub fn read_revisions(paths: &[PathBuf]) -> Result<Vec<Value>> {
    paths
        .iter()
        .map(|path| {
            SiteConfig::read_raw(path)
                .with_context(|| format!("failed to read '{}'", path.display()))
        })
        .collect()
}

/// Print warnings and errors, naming the file behind each `revisions/<i>`.
pub fn report(paths: &[PathBuf], diag: &ConfigDiagnostics) {
    if paths.len() > 1 && (diag.has_errors() || !diag.warnings().is_empty()) {
        for (i, path) in paths.iter().enumerate() {
            log!("config"; "revisions/{i} = {}", path.display());
        }
    }
    diag.print_warnings();
    if diag.has_errors() {
        eprintln!("{diag}");
    }
}

/// Load, validate and merge the declaration files for a command.
pub fn load_site(cli: &Cli) -> Result<SiteConfig> {
    let paths = resolve_files(cli)?;
    let raws = read_revisions(&paths)?;
    let (config, diag) = SiteConfig::check_revisions(&raws);
    report(&paths, &diag);

    match config {
        Some(config) => Ok(config),
        None => bail!("found {}", plural_count(diag.len(), "error")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::TempDir;

    const SITE: &str = r#"
site = "https://tidesdb.com"
title = "TidesDB"

[[sidebar]]
label = "Home"
slug = "index"
"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("docsite").chain(args.iter().copied()))
    }

    #[test]
    fn test_explicit_files_win() {
        let cli = cli(&["check", "a.toml", "b.toml"]);
        let files = resolve_files(&cli).unwrap();
        assert_eq!(files, [PathBuf::from("a.toml"), PathBuf::from("b.toml")]);
    }

    #[test]
    fn test_absolute_config_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docsite.toml");
        fs::write(&path, SITE).unwrap();

        let cli = cli(&["nav", "-C", path.to_str().unwrap()]);
        assert_eq!(resolve_files(&cli).unwrap(), [path.clone()]);

        let config = load_site(&cli).unwrap();
        assert_eq!(config.sidebar.len(), 1);
    }

    #[test]
    fn test_missing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = cli(&["check", "-C", path.to_str().unwrap()]);
        assert!(resolve_files(&cli).is_err());
    }

    #[test]
    fn test_load_site_reports_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{ "site": "nope", "sidebar": [] }"#).unwrap();

        let cli = cli(&["check", path.to_str().unwrap()]);
        let err = load_site(&cli).unwrap_err();
        assert_eq!(err.to_string(), "found 2 errors");
    }

    #[test]
    fn test_unreadable_file_has_context() {
        let err = read_revisions(&[PathBuf::from("/nonexistent/docsite.toml")]).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/docsite.toml"));
    }
}
