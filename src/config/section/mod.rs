//! Configuration section definitions.
//!
//! Each module corresponds to top-level keys of the declaration:
//!
//! | Module    | Keys                                                  | Purpose    |
//! |-----------|-------------------------------------------------------|------------|
//! | `site`    | `site` `title` `description` `logo` `social` `customCss` | Identity   |
//! | `head`    | `head`                                                | Head tags  |
//! | `sidebar` | `sidebar`                                             | Navigation |

pub mod head;
pub mod sidebar;
pub mod site;

pub use head::{AttrValue, HeadIntent, HeadKey, HeadTag, HeadTagKind, dedup_head, render_head};
pub use sidebar::{
    MAX_RECOMMENDED_DEPTH, NavId, NavIter, NavKind, NavNode, NavTree, NavWalk, Target,
    find_duplicate_targets,
};
pub use site::{LogoConfig, SocialLinks, parse_site_url};
