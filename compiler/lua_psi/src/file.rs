//! Per-file ownership of syntax and stub trees.
//!
//! A [`LuaFile`] starts from either a live [`SyntaxTree`] (fresh parse) or a
//! [`StubTree`] plus a [`TreeSource`] (loaded from an index). Whichever half
//! is missing is produced on first need and cached for the file's lifetime.

use std::cell::OnceCell;
use std::fmt;

use lua_ir::{NodeId, StubError, StubId, StubTree, SyntaxTree};
use tracing::debug;

use crate::element::LuaElement;

/// Produces the live tree of a file whose stubs were loaded first.
///
/// Called at most once per [`LuaFile`].
pub trait TreeSource {
    fn load(&self) -> SyntaxTree;
}

impl<F: Fn() -> SyntaxTree> TreeSource for F {
    fn load(&self) -> SyntaxTree {
        self()
    }
}

enum LiveTree {
    Built(SyntaxTree),
    Lazy {
        source: Box<dyn TreeSource>,
        tree: OnceCell<SyntaxTree>,
    },
}

/// One Lua source file.
pub struct LuaFile {
    live: LiveTree,
    stubs: OnceCell<StubTree>,
    /// Stub-bearing nodes in pre-order; entry `i` is the node of stub `i`.
    stub_nodes: OnceCell<Vec<NodeId>>,
}

impl LuaFile {
    /// File over a freshly built tree. Stubs are derived on demand.
    pub fn from_tree(tree: SyntaxTree) -> Self {
        LuaFile {
            live: LiveTree::Built(tree),
            stubs: OnceCell::new(),
            stub_nodes: OnceCell::new(),
        }
    }

    /// File over previously stored stubs. The live tree is requested from
    /// `source` the first time an element needs it.
    pub fn from_stubs(stubs: StubTree, source: impl TreeSource + 'static) -> Self {
        LuaFile {
            live: LiveTree::Lazy {
                source: Box::new(source),
                tree: OnceCell::new(),
            },
            stubs: OnceCell::from(stubs),
            stub_nodes: OnceCell::new(),
        }
    }

    /// The live tree, loading it if necessary.
    pub fn tree(&self) -> &SyntaxTree {
        match &self.live {
            LiveTree::Built(tree) => tree,
            LiveTree::Lazy { source, tree } => tree.get_or_init(|| {
                debug!("loading live tree for stub-backed file");
                source.load()
            }),
        }
    }

    /// Whether the live tree exists without forcing a load.
    pub fn is_tree_loaded(&self) -> bool {
        match &self.live {
            LiveTree::Built(_) => true,
            LiveTree::Lazy { tree, .. } => tree.get().is_some(),
        }
    }

    /// The stub tree, building it from the live tree if necessary.
    pub fn stub_tree(&self) -> Result<&StubTree, StubError> {
        if let Some(stubs) = self.stubs.get() {
            return Ok(stubs);
        }
        let built = StubTree::build(self.tree())?;
        Ok(self.stubs.get_or_init(|| built))
    }

    /// Generic element for a live node.
    pub fn element(&self, node: NodeId) -> LuaElement<'_> {
        LuaElement::from_node(self, node)
    }

    /// Root element of the file.
    pub fn root(&self) -> LuaElement<'_> {
        self.element(self.tree().root())
    }

    /// Generic element backed by a stub; the live node is bound lazily.
    pub fn stub_element(&self, stub: StubId) -> Result<LuaElement<'_>, StubError> {
        let element_type = self
            .stub_tree()?
            .get(stub)
            .ok_or(StubError::UnknownStub(stub))?
            .element_type();
        Ok(LuaElement::from_stub(self, stub, element_type))
    }

    /// Live node described by `stub`.
    ///
    /// Loads the tree if needed and checks that the tree agrees with the
    /// stub tree at this position.
    pub fn node_for_stub(&self, stub: StubId) -> Result<NodeId, StubError> {
        let stubs = self.stub_tree()?;
        let expected = stubs.get(stub).ok_or(StubError::UnknownStub(stub))?.kind();
        let nodes = self.stub_nodes();
        if nodes.len() != stubs.stub_count() {
            return Err(StubError::CountMismatch {
                stubs: stubs.stub_count(),
                nodes: nodes.len(),
            });
        }
        let node = nodes[stub.index()];
        let found = self.tree().kind(node);
        if found != expected {
            return Err(StubError::Mismatch {
                stub,
                expected,
                found,
            });
        }
        Ok(node)
    }

    /// Stub describing `node`, if the node is stub-bearing.
    pub fn stub_for_node(&self, node: NodeId) -> Option<StubId> {
        let index = self.stub_nodes().binary_search(&node).ok()?;
        u32::try_from(index).ok().map(StubId::new)
    }

    fn stub_nodes(&self) -> &[NodeId] {
        self.stub_nodes.get_or_init(|| {
            let tree = self.tree();
            tree.descendants(tree.root())
                .filter(|&node| tree.kind(node).has_stub())
                .collect()
        })
    }
}

impl fmt::Debug for LuaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuaFile")
            .field("tree_loaded", &self.is_tree_loaded())
            .field("stubs_built", &self.stubs.get().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
