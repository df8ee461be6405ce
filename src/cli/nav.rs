//! `docsite nav`: print the flattened sidebar.

use std::io::{Write, stdout};

use anyhow::Result;

use docsite::config::{NavKind, SiteConfig};

use super::Cli;
use super::common::load_site;

pub fn run_nav(cli: &Cli, hrefs: bool) -> Result<()> {
    let config = load_site(cli)?;
    let mut out = stdout().lock();
    for line in nav_lines(&config, hrefs) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// One line per entry, indented two spaces per nesting level.
fn nav_lines(config: &SiteConfig, hrefs: bool) -> Vec<String> {
    config
        .sidebar
        .resolve()
        .map(|(depth, node)| {
            let indent = "  ".repeat(depth);
            match &node.kind {
                NavKind::Group { .. } => format!("{indent}{}/", node.label),
                NavKind::Page { target } if hrefs => {
                    format!("{indent}{} -> {}", node.label, config.href(target))
                }
                NavKind::Page { target } => format!("{indent}{} -> {target}", node.label),
            }
        })
        .collect()
}
