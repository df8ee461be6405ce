//! Pre-order traversal of a [`NavTree`].

use super::tree::{NavId, NavNode, NavTree};

/// Depth-annotated pre-order walk yielding node ids.
///
/// Holds an explicit stack instead of recursing, so it is lazy and can be
/// cloned to restart from any point.
#[derive(Debug, Clone)]
pub struct NavWalk<'a> {
    tree: &'a NavTree,
    /// Pending nodes, next one on top.
    stack: Vec<(usize, NavId)>,
}

impl<'a> NavWalk<'a> {
    pub(crate) fn new(tree: &'a NavTree, start: &[NavId], depth: usize) -> Self {
        let stack = start.iter().rev().map(|&id| (depth, id)).collect();
        Self { tree, stack }
    }
}

impl Iterator for NavWalk<'_> {
    type Item = (usize, NavId);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.stack.pop()?;
        let children = self.tree.children(id);
        self.stack
            .extend(children.iter().rev().map(|&child| (depth + 1, child)));
        Some((depth, id))
    }
}

/// Depth-annotated pre-order walk yielding nodes.
#[derive(Debug, Clone)]
pub struct NavIter<'a> {
    walk: NavWalk<'a>,
}

impl<'a> NavIter<'a> {
    pub(crate) fn new(tree: &'a NavTree, start: &[NavId], depth: usize) -> Self {
        Self {
            walk: NavWalk::new(tree, start, depth),
        }
    }
}

impl<'a> Iterator for NavIter<'a> {
    type Item = (usize, &'a NavNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, id) = self.walk.next()?;
        Some((depth, self.walk.tree.node(id)))
    }
}
