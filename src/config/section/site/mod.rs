//! Site-level metadata: identity, branding and social links.
//!
//! # Example
//!
//! ```toml
//! site = "https://tidesdb.com"
//! title = "TidesDB"
//! customCss = ["./src/styles/custom.css"]
//!
//! [logo]
//! light = "./src/assets/tidesdb-logo-v0.1-final.png"
//! dark = "./src/assets/tidesdb-logo-v0.1.svg"
//! replacesTitle = true
//!
//! [social]
//! github = "https://github.com/tidesdb/tidesdb"
//! ```

mod info;
mod logo;
mod social;

pub use info::parse_site_url;
pub use logo::LogoConfig;
pub use social::SocialLinks;

pub(crate) use info::{DESCRIPTION, SITE, SiteInfo, TITLE};
pub(crate) use logo::KEY as LOGO;
pub(crate) use social::{CUSTOM_CSS, SOCIAL, dedup_keep_last, parse_custom_css, parse_social};
