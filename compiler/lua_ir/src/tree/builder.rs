//! Event-style construction of syntax trees.
//!
//! A parser drives the builder with `start_node` / `token` / `finish_node`
//! calls in source order. Misuse is recorded rather than panicking: the first
//! error poisons the builder and is returned from [`TreeBuilder::finish`].

use tracing::trace;

use super::{NodeId, SyntaxTree};
use crate::{Span, SpanError, SyntaxKind};

/// Error produced when a builder event sequence does not describe a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("no root node was started")]
    Empty,
    #[error("{kind:?} started after the root node was closed")]
    MultipleRoots { kind: SyntaxKind },
    #[error("{count} node(s) still open at end of input")]
    Unclosed { count: usize },
    #[error("finish_node called with no open node")]
    UnbalancedFinish,
    #[error("{0:?} is a token kind and cannot open a node")]
    TokenAsNode(SyntaxKind),
    #[error("{0:?} is a node kind and cannot be a token")]
    NodeAsToken(SyntaxKind),
    #[error("token {kind:?} is not inside any node")]
    TokenOutsideRoot { kind: SyntaxKind },
    #[error("token {kind:?} at {offset} runs past the end of the source ({source_len} bytes)")]
    TokenPastEnd {
        kind: SyntaxKind,
        offset: u32,
        source_len: usize,
    },
    #[error("token {kind:?} at {offset} does not end on a char boundary")]
    NotCharBoundary { kind: SyntaxKind, offset: u32 },
    #[error("{remaining} byte(s) of source left after offset {offset}")]
    TrailingText { offset: u32, remaining: usize },
    #[error("tree exceeds u32::MAX nodes")]
    TooManyNodes,
    #[error(transparent)]
    Span(#[from] SpanError),
}

/// Builds a [`SyntaxTree`] from parser events.
pub struct TreeBuilder {
    tree: SyntaxTree,
    last_children: Vec<NodeId>,
    open: Vec<NodeId>,
    offset: u32,
    error: Option<TreeError>,
}

impl TreeBuilder {
    /// Create a builder over `text`.
    ///
    /// Arenas are pre-sized at roughly one node per two bytes of source.
    pub fn new(text: impl Into<String>) -> Self {
        let text: Box<str> = text.into().into_boxed_str();
        let estimated = text.len() / 2 + 1;
        TreeBuilder {
            tree: SyntaxTree {
                text,
                kinds: Vec::with_capacity(estimated),
                spans: Vec::with_capacity(estimated),
                parents: Vec::with_capacity(estimated),
                first_children: Vec::with_capacity(estimated),
                next_siblings: Vec::with_capacity(estimated),
            },
            last_children: Vec::with_capacity(estimated),
            open: Vec::new(),
            offset: 0,
            error: None,
        }
    }

    /// Open a composite node at the current offset.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        if self.error.is_some() {
            return;
        }
        if kind.is_token() {
            self.fail(TreeError::TokenAsNode(kind));
            return;
        }
        if self.open.is_empty() && !self.tree.kinds.is_empty() {
            self.fail(TreeError::MultipleRoots { kind });
            return;
        }
        if let Some(id) = self.alloc(kind, Span::point(self.offset)) {
            self.open.push(id);
        }
    }

    /// Add a leaf covering the next `len` bytes of source.
    pub fn token(&mut self, kind: SyntaxKind, len: usize) {
        if self.error.is_some() {
            return;
        }
        if !kind.is_token() {
            self.fail(TreeError::NodeAsToken(kind));
            return;
        }
        if self.open.is_empty() {
            self.fail(TreeError::TokenOutsideRoot { kind });
            return;
        }
        let span = match Span::try_at(self.offset, len) {
            Ok(span) => span,
            Err(err) => {
                self.fail(err.into());
                return;
            }
        };
        let source_len = self.tree.text.len();
        if span.end as usize > source_len {
            self.fail(TreeError::TokenPastEnd {
                kind,
                offset: self.offset,
                source_len,
            });
            return;
        }
        if !self.tree.text.is_char_boundary(span.end as usize) {
            self.fail(TreeError::NotCharBoundary {
                kind,
                offset: self.offset,
            });
            return;
        }
        if self.alloc(kind, span).is_some() {
            self.offset = span.end;
        }
    }

    /// Close the innermost open node at the current offset.
    pub fn finish_node(&mut self) {
        if self.error.is_some() {
            return;
        }
        match self.open.pop() {
            Some(id) => self.tree.spans[id.index()].end = self.offset,
            None => self.fail(TreeError::UnbalancedFinish),
        }
    }

    /// Finish building, returning the tree or the first recorded error.
    pub fn finish(self) -> Result<SyntaxTree, TreeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.tree.kinds.is_empty() {
            return Err(TreeError::Empty);
        }
        if !self.open.is_empty() {
            return Err(TreeError::Unclosed {
                count: self.open.len(),
            });
        }
        let remaining = self.tree.text.len() - self.offset as usize;
        if remaining > 0 {
            return Err(TreeError::TrailingText {
                offset: self.offset,
                remaining,
            });
        }
        trace!(nodes = self.tree.kinds.len(), "built syntax tree");
        Ok(self.tree)
    }

    fn alloc(&mut self, kind: SyntaxKind, span: Span) -> Option<NodeId> {
        let Ok(raw) = u32::try_from(self.tree.kinds.len()) else {
            self.fail(TreeError::TooManyNodes);
            return None;
        };
        let id = NodeId::new(raw);
        let parent = self.open.last().copied().unwrap_or_default();

        self.tree.kinds.push(kind);
        self.tree.spans.push(span);
        self.tree.parents.push(parent);
        self.tree.first_children.push(NodeId::INVALID);
        self.tree.next_siblings.push(NodeId::INVALID);
        self.last_children.push(NodeId::INVALID);

        if parent.is_valid() {
            let last = self.last_children[parent.index()];
            if last.is_valid() {
                self.tree.next_siblings[last.index()] = id;
            } else {
                self.tree.first_children[parent.index()] = id;
            }
            self.last_children[parent.index()] = id;
        }
        Some(id)
    }

    fn fail(&mut self, err: TreeError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}
