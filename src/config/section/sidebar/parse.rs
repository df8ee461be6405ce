//! Building a [`NavTree`] from the raw `sidebar` sequence.

use serde_json::Value;

use super::dup::duplicate_positions;
use super::tree::{NavId, NavTree, Target};
use crate::config::raw::RawTable;
use crate::config::util::{is_external_url, parse_external_url};
use crate::config::{ConfigDiagnostic, ConfigDiagnostics, ErrorCode, FieldPath};

/// Nesting level (0 = top level) from which entries get a usability warning.
pub const MAX_RECOMMENDED_DEPTH: usize = 3;

const FIELDS: &[&str] = &["label", "items", "slug", "link"];

/// Parse and validate the `sidebar` sequence.
///
/// Every entry is visited even after errors; the returned tree is only
/// meaningful when no error was recorded.
pub(crate) fn parse_sidebar(
    items: &[Value],
    path: &FieldPath,
    diag: &mut ConfigDiagnostics,
) -> NavTree {
    let mut tree = NavTree::new();
    parse_siblings(&mut tree, None, items, path, 0, diag);
    tree
}

fn parse_siblings(
    tree: &mut NavTree,
    parent: Option<NavId>,
    items: &[Value],
    path: &FieldPath,
    depth: usize,
    diag: &mut ConfigDiagnostics,
) {
    let mut targets: Vec<(Target, FieldPath)> = Vec::new();

    for (i, item) in items.iter().enumerate() {
        let item_path = path.index(i);
        if let Some(target) = parse_node(tree, parent, item, &item_path, depth, diag) {
            targets.push((target, item_path));
        }
    }

    let refs: Vec<&Target> = targets.iter().map(|(t, _)| t).collect();
    for (later, first) in duplicate_positions(&refs) {
        let (target, later_path) = &targets[later];
        let first_path = &targets[first].1;
        diag.push(
            ConfigDiagnostic::new(
                ErrorCode::DuplicateTarget,
                later_path.clone(),
                format!(
                    "{target} is already used by sibling {}",
                    first_path.as_str()
                ),
            )
            .with_related(first_path.clone())
            .with_hint("each page in one list must point somewhere different"),
        );
    }
}

/// Parse one entry; returns the page target when the entry is a valid page.
fn parse_node(
    tree: &mut NavTree,
    parent: Option<NavId>,
    value: &Value,
    path: &FieldPath,
    depth: usize,
    diag: &mut ConfigDiagnostics,
) -> Option<Target> {
    let table = RawTable::open(value, path.clone(), FIELDS, diag)?;
    // An unusable label is reported once; validation of the entry continues.
    let label = table.required_string("label", diag).unwrap_or_default();

    if depth == MAX_RECOMMENDED_DEPTH {
        diag.warn(
            path.clone(),
            format!(
                "entry is nested {} levels deep; deep sidebars are hard to navigate",
                depth + 1
            ),
        );
    }

    let (has_slug, has_link) = (table.has("slug"), table.has("link"));

    if table.has("items") {
        if has_slug || has_link {
            diag.error_with_hint(
                ErrorCode::AmbiguousTarget,
                path.clone(),
                format!("group '{label}' has `items` and a `slug`/`link`"),
                "groups are not navigable; move the target into a page inside `items`",
            );
        }
        let items = table.array("items", diag).unwrap_or_default();
        if items.is_empty() {
            diag.warn(path.clone(), format!("group '{label}' has no items"));
        }
        let group = tree.add_group(parent, label.trim());
        parse_siblings(tree, group, items, &table.path_of("items"), depth + 1, diag);
        return None;
    }

    let target = match (has_slug, has_link) {
        (true, true) => {
            diag.error_with_hint(
                ErrorCode::AmbiguousTarget,
                path.clone(),
                format!("page '{label}' has both `slug` and `link`"),
                "keep `slug` for site content, `link` for other destinations",
            );
            None
        }
        (false, false) => {
            diag.error_with_hint(
                ErrorCode::AmbiguousTarget,
                path.clone(),
                format!("page '{label}' has neither `slug` nor `link`"),
                "add a `slug`, a `link`, or `items` to make it a group",
            );
            None
        }
        (true, false) => table
            .string("slug", diag)
            .and_then(|raw| parse_slug(raw, table.path_of("slug"), diag)),
        (false, true) => table
            .string("link", diag)
            .and_then(|raw| parse_link(raw, table.path_of("link"), diag)),
    }?;

    tree.add_page(parent, label.trim(), target.clone());
    Some(target)
}

fn parse_slug(raw: &str, path: FieldPath, diag: &mut ConfigDiagnostics) -> Option<Target> {
    if is_external_url(raw) {
        diag.error_with_hint(
            ErrorCode::InvalidConfig,
            path,
            format!("slug '{raw}' is a URL"),
            "use `link` for external destinations",
        );
        return None;
    }

    let target = Target::slug(raw);
    let slug = target.as_str();
    if slug.is_empty() {
        diag.error(ErrorCode::InvalidConfig, path, "slug must not be empty");
        return None;
    }
    if slug.split('/').any(|segment| segment == ".." || segment.is_empty()) {
        diag.error(
            ErrorCode::InvalidConfig,
            path,
            format!("slug '{raw}' must be a plain content path"),
        );
        return None;
    }
    Some(target)
}

fn parse_link(raw: &str, path: FieldPath, diag: &mut ConfigDiagnostics) -> Option<Target> {
    let link = raw.trim();
    // Root-relative links stay on the site without being content pages.
    if link.starts_with('/') && !link.starts_with("//") {
        return Some(Target::link(link));
    }
    parse_external_url(link, path, diag).map(|_| Target::link(link))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> (NavTree, ConfigDiagnostics) {
        let mut diag = ConfigDiagnostics::new();
        let tree = parse_sidebar(value.as_array().unwrap(), &FieldPath::new("sidebar"), &mut diag);
        (tree, diag)
    }

    #[test]
    fn test_groups_and_pages() {
        let (tree, diag) = parse(json!([
            { "label": "Getting started", "items": [
                { "label": "What is TidesDB?", "slug": "getting-started/what-is-tidesdb" },
                { "label": "How does TidesDB work?", "slug": "getting-started/how-does-tidesdb-work" },
            ]},
            { "label": "Building TidesDB", "slug": "reference/building" },
            { "label": "Discord Community", "link": "https://discord.gg/tWEmjR66cy" },
            { "label": "Changelog", "link": "/changelog" },
        ]));
        assert!(diag.is_empty(), "{diag}");
        assert_eq!(tree.roots().len(), 4);
        assert_eq!(tree.len(), 6);
        let group = tree.node(tree.roots()[0]);
        assert!(group.is_group());
        assert_eq!(group.items().len(), 2);
        assert_eq!(
            tree.node(tree.roots()[3]).target(),
            Some(&Target::link("/changelog"))
        );
    }

    #[test]
    fn test_duplicate_target_references_both_paths() {
        let (_, diag) = parse(json!([
            { "label": "A", "slug": "x" },
            { "label": "B", "slug": "x" },
        ]));
        assert_eq!(diag.len(), 1);
        let err = &diag.errors()[0];
        assert_eq!(err.code, ErrorCode::DuplicateTarget);
        assert_eq!(err.path.as_str(), "sidebar/1");
        assert_eq!(err.related, [FieldPath::new("sidebar/0")]);
    }

    #[test]
    fn test_duplicates_only_among_siblings() {
        let (_, diag) = parse(json!([
            { "label": "Overview", "slug": "overview" },
            { "label": "Guide", "items": [
                { "label": "Overview", "slug": "overview" },
                { "label": "Overview again", "slug": "/overview/" },
            ]},
        ]));
        assert_eq!(diag.len(), 1);
        assert_eq!(diag.errors()[0].path.as_str(), "sidebar/1/items/1");
    }

    #[test]
    fn test_ambiguous_targets() {
        let (_, diag) = parse(json!([
            { "label": "C", "slug": "y", "link": "https://ex.com" },
            { "label": "D" },
            { "label": "E", "slug": "e", "items": [] },
        ]));
        let codes: Vec<_> = diag.errors().iter().map(|d| d.code).collect();
        assert_eq!(codes, [ErrorCode::AmbiguousTarget; 3]);
        let paths: Vec<_> = diag.errors().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(paths, ["sidebar/0", "sidebar/1", "sidebar/2"]);
    }

    #[test]
    fn test_invalid_entries_are_all_reported() {
        let (_, diag) = parse(json!([
            "not a table",
            { "slug": "no-label" },
            { "label": "Bad link", "link": "discord.gg/x" },
            { "label": "URL slug", "slug": "https://example.com" },
            { "label": "Escaping", "slug": "../secret" },
            { "label": "Items", "items": "nope" },
        ]));
        let paths: Vec<_> = diag.errors().iter().map(|d| d.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "sidebar/0",
                "sidebar/1/label",
                "sidebar/2/link",
                "sidebar/3/slug",
                "sidebar/4/slug",
                "sidebar/5/items",
            ]
        );
        assert!(
            diag.errors()
                .iter()
                .all(|d| d.code == ErrorCode::InvalidConfig)
        );
    }

    #[test]
    fn test_depth_warning() {
        let (tree, diag) = parse(json!([
            { "label": "L0", "items": [
                { "label": "L1", "items": [
                    { "label": "L2", "items": [
                        { "label": "L3", "items": [
                            { "label": "L4", "slug": "deep" },
                        ]},
                    ]},
                ]},
            ]},
        ]));
        assert!(diag.is_empty());
        assert_eq!(tree.max_depth(), Some(4));
        let warned: Vec<_> = diag.warnings().iter().map(|(p, _)| p.as_str()).collect();
        assert_eq!(warned, ["sidebar/0/items/0/items/0/items/0"]);
    }
}
