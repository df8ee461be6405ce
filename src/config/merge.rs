//! Reconciling successive revisions of one site configuration.
//!
//! | Field                   | Rule                                                 |
//! |-------------------------|------------------------------------------------------|
//! | `site`, `title`         | overlay                                              |
//! | `description`, `logo`   | overlay when set, else base                          |
//! | `social`                | key-wise union, overlay wins                         |
//! | `customCss`             | base then overlay, last occurrence kept              |
//! | `head`                  | base then overlay, de-duplicated by identity, last kept |
//! | `sidebar`               | sibling lists merged recursively (see below)         |
//!
//! Sidebar siblings: the k-th overlay group labelled `L` is matched with the
//! k-th base group labelled `L` and their items merged; an overlay page
//! replaces the base page with the same target in place. Unmatched base
//! entries stay where they were, unmatched overlay entries are appended.

use rustc_hash::FxHashMap;

use super::SiteConfig;
use super::section::site::dedup_keep_last;
use super::section::{NavId, NavKind, NavTree, Target, dedup_head};

/// Merge `overlay` on top of `base`.
///
/// Merging a configuration with itself yields an equal configuration.
pub fn merge_revisions(base: &SiteConfig, overlay: &SiteConfig) -> SiteConfig {
    let mut social = base.social.clone();
    for (platform, url) in &overlay.social {
        social.insert(platform.clone(), url.clone());
    }

    let custom_css = dedup_keep_last(
        base.custom_css
            .iter()
            .chain(&overlay.custom_css)
            .cloned()
            .collect(),
    );

    let head = dedup_head(base.head.iter().chain(&overlay.head).cloned());

    let mut sidebar = NavTree::new();
    merge_siblings(
        &mut sidebar,
        None,
        (&base.sidebar, base.sidebar.roots()),
        (&overlay.sidebar, overlay.sidebar.roots()),
    );

    crate::debug!(
        "merge";
        "{} + {} sidebar entries -> {}",
        base.sidebar.len(),
        overlay.sidebar.len(),
        sidebar.len()
    );

    SiteConfig {
        site: overlay.site.clone(),
        title: overlay.title.clone(),
        description: overlay
            .description
            .clone()
            .or_else(|| base.description.clone()),
        logo: overlay.logo.clone().or_else(|| base.logo.clone()),
        social,
        custom_css,
        head,
        sidebar,
    }
}

/// How a sibling is matched across revisions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum MatchKey<'a> {
    /// Label and occurrence index among same-labelled groups.
    Group(&'a str, usize),
    /// Target and occurrence index among pages with that target.
    Page(&'a Target, usize),
}

fn match_keys<'a>(tree: &'a NavTree, ids: &[NavId]) -> Vec<MatchKey<'a>> {
    let mut groups: FxHashMap<&str, usize> = FxHashMap::default();
    let mut pages: FxHashMap<&Target, usize> = FxHashMap::default();

    ids.iter()
        .map(|&id| {
            let node = tree.node(id);
            match &node.kind {
                NavKind::Group { .. } => {
                    let seen = groups.entry(node.label.as_str()).or_default();
                    *seen += 1;
                    MatchKey::Group(&node.label, *seen - 1)
                }
                NavKind::Page { target } => {
                    let seen = pages.entry(target).or_default();
                    *seen += 1;
                    MatchKey::Page(target, *seen - 1)
                }
            }
        })
        .collect()
}

fn merge_siblings(
    out: &mut NavTree,
    parent: Option<NavId>,
    (base, base_ids): (&NavTree, &[NavId]),
    (overlay, overlay_ids): (&NavTree, &[NavId]),
) {
    let overlay_index: FxHashMap<MatchKey<'_>, usize> = match_keys(overlay, overlay_ids)
        .into_iter()
        .enumerate()
        .map(|(i, key)| (key, i))
        .collect();

    let mut matched = vec![false; overlay_ids.len()];

    for (&base_id, key) in base_ids.iter().zip(match_keys(base, base_ids)) {
        let Some(&i) = overlay_index.get(&key) else {
            out.graft(parent, base, base_id);
            continue;
        };
        matched[i] = true;
        let overlay_id = overlay_ids[i];

        match &overlay.node(overlay_id).kind {
            NavKind::Group { items } => {
                let Some(group) = out.add_group(parent, overlay.node(overlay_id).label.clone())
                else {
                    continue;
                };
                merge_siblings(
                    out,
                    Some(group),
                    (base, base.children(base_id)),
                    (overlay, items),
                );
            }
            NavKind::Page { .. } => out.graft(parent, overlay, overlay_id),
        }
    }

    for (&overlay_id, _) in overlay_ids.iter().zip(&matched).filter(|(_, m)| !**m) {
        out.graft(parent, overlay, overlay_id);
    }
}
