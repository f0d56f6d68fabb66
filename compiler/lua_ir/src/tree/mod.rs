//! Flat syntax tree.
//!
//! [`SyntaxTree`] uses struct-of-arrays layout (parallel `kinds`, `spans`,
//! `parents`, `first_children`, `next_siblings` arrays indexed by
//! [`NodeId`]). Composite nodes and tokens live in the same arena; tokens
//! are leaves.
//!
//! Nodes are allocated in pre-order by [`TreeBuilder`], so a subtree always
//! occupies a contiguous id range starting at its root.

mod builder;

use std::fmt;

use crate::{Span, SyntaxKind};

pub use builder::{TreeBuilder, TreeError};

/// Index into a syntax tree arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Invalid node ID (sentinel value for absent links).
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        NodeId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != u32::MAX
    }

    #[inline]
    fn to_option(self) -> Option<NodeId> {
        self.is_valid().then_some(self)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId::INVALID")
        }
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Syntax tree over one source text.
///
/// Always has at least one node; [`NodeId`] 0 is the root.
#[derive(Clone)]
pub struct SyntaxTree {
    text: Box<str>,
    kinds: Vec<SyntaxKind>,
    spans: Vec<Span>,
    parents: Vec<NodeId>,
    first_children: Vec<NodeId>,
    next_siblings: Vec<NodeId>,
}

impl SyntaxTree {
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, tokens included.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.kinds.len()
    }

    /// The full source text.
    #[inline]
    pub fn source(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> SyntaxKind {
        self.kinds[id.index()]
    }

    #[inline]
    pub fn span(&self, id: NodeId) -> Span {
        self.spans[id.index()]
    }

    /// Source text covered by a node.
    pub fn text(&self, id: NodeId) -> &str {
        &self.text[self.span(id).to_range()]
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents[id.index()].to_option()
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.first_children[id.index()].to_option()
    }

    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.next_siblings[id.index()].to_option()
    }

    /// Immediate children in source order.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// `id` and every node below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            start: id,
            next: Some(id),
        }
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&node| self.parent(node))
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let kind = self.kind(id);
        write!(f, "{:indent$}{:?}@{:?}", "", kind, self.span(id), indent = depth * 2)?;
        if kind.is_token() {
            write!(f, " {:?}", self.text(id))?;
        }
        writeln!(f)?;
        for child in self.children(id) {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// Prints the tree one node per line, indented by depth.
impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root(), 0)
    }
}

/// Iterator over the immediate children of a node.
pub struct Children<'t> {
    tree: &'t SyntaxTree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_sibling(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    start: NodeId,
    next: Option<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.first_child(current).or_else(|| {
            let mut node = current;
            loop {
                if node == self.start {
                    return None;
                }
                if let Some(sibling) = self.tree.next_sibling(node) {
                    return Some(sibling);
                }
                node = self.tree.parent(node)?;
            }
        });
        Some(current)
    }
}

#[cfg(test)]
mod tests;
