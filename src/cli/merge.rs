//! `docsite merge`: print the canonical merged declaration.

use anyhow::Result;

use docsite::config::SiteConfig;

use super::common::load_site;
use super::{Cli, OutputFormat};

pub fn run_merge(cli: &Cli, format: OutputFormat) -> Result<()> {
    let config = load_site(cli)?;
    print!("{}", render(&config, format)?);
    Ok(())
}

fn render(config: &SiteConfig, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Toml => config.to_toml()?,
        OutputFormat::Json => config.to_json()? + "\n",
    })
}
