//! Arena-backed navigation tree.

use std::collections::BTreeSet;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::dup::find_duplicate_targets;
use super::iter::{NavIter, NavWalk};

/// Index of a node in its [`NavTree`]. Only meaningful for the tree that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NavId(usize);

impl NavId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Resolved destination of a page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Target {
    /// Content-relative path, stored without surrounding slashes.
    Slug(String),
    /// Absolute URL or root-relative path.
    Link(String),
}

impl Target {
    /// Slug target, canonicalized (`./a/b/` -> `a/b`).
    pub fn slug(raw: &str) -> Self {
        Self::Slug(canonical_slug(raw))
    }

    pub fn link(raw: &str) -> Self {
        Self::Link(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Slug(s) | Self::Link(s) => s,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slug(s) => write!(f, "slug `{s}`"),
            Self::Link(l) => write!(f, "link `{l}`"),
        }
    }
}

pub(crate) fn canonical_slug(raw: &str) -> String {
    let raw = raw.trim();
    raw.strip_prefix("./")
        .unwrap_or(raw)
        .trim_matches('/')
        .to_string()
}

/// What a node is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavKind {
    /// Container, not navigable.
    Group { items: Vec<NavId> },
    Page { target: Target },
}

/// One sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavNode {
    pub label: String,
    pub kind: NavKind,
}

impl NavNode {
    #[inline]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, NavKind::Group { .. })
    }

    pub fn target(&self) -> Option<&Target> {
        match &self.kind {
            NavKind::Page { target } => Some(target),
            NavKind::Group { .. } => None,
        }
    }

    pub fn items(&self) -> &[NavId] {
        match &self.kind {
            NavKind::Group { items } => items,
            NavKind::Page { .. } => &[],
        }
    }
}

/// Ordered sidebar tree.
///
/// Nodes live in one arena and refer to their children by [`NavId`];
/// insertion order is declaration order and is never resorted.
#[derive(Debug, Clone, Default)]
pub struct NavTree {
    nodes: Vec<NavNode>,
    roots: Vec<NavId>,
}

impl NavTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group under `parent` (or at top level).
    ///
    /// Returns `None` if `parent` is a page.
    pub fn add_group(&mut self, parent: Option<NavId>, label: impl Into<String>) -> Option<NavId> {
        self.attach(
            parent,
            NavNode {
                label: label.into(),
                kind: NavKind::Group { items: Vec::new() },
            },
        )
    }

    /// Append a page under `parent` (or at top level).
    ///
    /// Returns `None` if `parent` is a page.
    pub fn add_page(
        &mut self,
        parent: Option<NavId>,
        label: impl Into<String>,
        target: Target,
    ) -> Option<NavId> {
        self.attach(
            parent,
            NavNode {
                label: label.into(),
                kind: NavKind::Page { target },
            },
        )
    }

    fn attach(&mut self, parent: Option<NavId>, node: NavNode) -> Option<NavId> {
        let id = NavId(self.nodes.len());
        match parent {
            None => self.roots.push(id),
            Some(parent) => match &mut self.nodes.get_mut(parent.0)?.kind {
                NavKind::Group { items } => items.push(id),
                NavKind::Page { .. } => return None,
            },
        }
        self.nodes.push(node);
        Some(id)
    }

    /// Copy the subtree rooted at `id` of `other` under `parent`.
    pub(crate) fn graft(&mut self, parent: Option<NavId>, other: &NavTree, id: NavId) {
        let node = other.node(id);
        let Some(copied) = (match &node.kind {
            NavKind::Group { .. } => self.add_group(parent, node.label.clone()),
            NavKind::Page { target } => self.add_page(parent, node.label.clone(), target.clone()),
        }) else {
            return;
        };
        for &child in node.items() {
            self.graft(Some(copied), other, child);
        }
    }

    /// Top-level entries in order.
    #[inline]
    pub fn roots(&self) -> &[NavId] {
        &self.roots
    }

    /// Node by id.
    ///
    /// # Panics
    /// If `id` was produced by another tree and is out of range.
    #[inline]
    pub fn node(&self, id: NavId) -> &NavNode {
        &self.nodes[id.0]
    }

    /// Children of a group (empty for pages).
    #[inline]
    pub fn children(&self, id: NavId) -> &[NavId] {
        self.node(id).items()
    }

    /// Sibling list below `parent`, or the top level for `None`.
    pub fn siblings(&self, parent: Option<NavId>) -> &[NavId] {
        match parent {
            Some(id) => self.children(id),
            None => &self.roots,
        }
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-annotated pre-order traversal of the whole tree.
    ///
    /// The iterator is lazy and `Clone`; call again (or clone it) to restart.
    pub fn resolve(&self) -> NavIter<'_> {
        NavIter::new(self, &self.roots, 0)
    }

    /// Pre-order traversal of one subtree, `id` itself at depth 0.
    pub fn resolve_from(&self, id: NavId) -> NavIter<'_> {
        NavIter::new(self, std::slice::from_ref(&id), 0)
    }

    /// Same order as [`resolve`](Self::resolve), yielding ids.
    pub fn walk(&self) -> NavWalk<'_> {
        NavWalk::new(self, &self.roots, 0)
    }

    /// Targets used by more than one page in `siblings`.
    pub fn duplicate_targets(&self, siblings: &[NavId]) -> BTreeSet<&Target> {
        find_duplicate_targets(siblings.iter().filter_map(|&id| self.node(id).target()))
    }

    /// Deepest nesting level (0 = top level), `None` when empty.
    pub fn max_depth(&self) -> Option<usize> {
        self.walk().map(|(depth, _)| depth).max()
    }

    /// Every page in document order.
    pub fn pages(&self) -> impl Iterator<Item = (&str, &Target)> {
        self.resolve()
            .filter_map(|(_, node)| node.target().map(|t| (node.label.as_str(), t)))
    }

    fn same_subtrees(&self, ids: &[NavId], other: &NavTree, other_ids: &[NavId]) -> bool {
        ids.len() == other_ids.len()
            && ids.iter().zip(other_ids).all(|(&a, &b)| {
                let (a, b) = (self.node(a), other.node(b));
                a.label == b.label
                    && match (&a.kind, &b.kind) {
                        (NavKind::Page { target: x }, NavKind::Page { target: y }) => x == y,
                        (NavKind::Group { items: x }, NavKind::Group { items: y }) => {
                            self.same_subtrees(x, other, y)
                        }
                        _ => false,
                    }
            })
    }
}

/// Structural equality: same labels, kinds and targets in the same order,
/// independent of arena layout.
impl PartialEq for NavTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_subtrees(&self.roots, other, &other.roots)
    }
}

impl Eq for NavTree {}

/// Serializes to the declaration shape: a sequence of `{ label, items }`
/// groups and `{ label, slug }` / `{ label, link }` pages.
impl Serialize for NavTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.roots.iter().map(|&id| NavEntry { tree: self, id }))
    }
}

struct NavEntry<'a> {
    tree: &'a NavTree,
    id: NavId,
}

impl Serialize for NavEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let node = self.tree.node(self.id);
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("label", &node.label)?;
        match &node.kind {
            NavKind::Group { items } => {
                let items: Vec<_> = items
                    .iter()
                    .map(|&id| NavEntry {
                        tree: self.tree,
                        id,
                    })
                    .collect();
                map.serialize_entry("items", &items)?;
            }
            NavKind::Page {
                target: Target::Slug(slug),
            } => map.serialize_entry("slug", slug)?,
            NavKind::Page {
                target: Target::Link(link),
            } => map.serialize_entry("link", link)?,
        }
        map.end()
    }
}
