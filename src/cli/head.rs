//! `docsite head`: print the rendered head elements.

use anyhow::Result;

use docsite::config::SiteConfig;
use docsite::config::section::head::render_title;
use docsite::render_head;

use super::Cli;
use super::common::load_site;

pub fn run_head(cli: &Cli) -> Result<()> {
    let config = load_site(cli)?;
    println!("{}", head_html(&config));
    Ok(())
}

fn head_html(config: &SiteConfig) -> String {
    let tags = config.head_tags();
    if tags.is_empty() {
        return render_title(&config.title);
    }
    format!("{}\n{}", render_title(&config.title), render_head(&tags))
}
