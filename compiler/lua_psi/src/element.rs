//! Generic elements: untyped views over a node or its stub.
//!
//! Every typed accessor wraps a [`LuaElement`]. The element fixes at
//! construction whether it was created from a live node or from a stub; a
//! stub-backed element binds its live node on first traversal need and
//! remembers it.

use std::cell::OnceCell;
use std::fmt;

use lua_ir::{NodeId, Span, Stub, StubElementType, StubError, StubId, SyntaxKind};
use tracing::{trace, warn};

use crate::file::LuaFile;
use crate::visitor::Visitor;

#[derive(Clone)]
enum ElementRepr {
    Live(NodeId),
    Stub {
        stub: StubId,
        element_type: StubElementType,
        node: OnceCell<NodeId>,
    },
}

/// Untyped view of one element of a [`LuaFile`].
#[derive(Clone)]
pub struct LuaElement<'f> {
    file: &'f LuaFile,
    repr: ElementRepr,
}

impl<'f> LuaElement<'f> {
    /// View over a live node.
    pub fn from_node(file: &'f LuaFile, node: NodeId) -> Self {
        LuaElement {
            file,
            repr: ElementRepr::Live(node),
        }
    }

    /// View over a stub; the live node is bound when first needed.
    pub fn from_stub(file: &'f LuaFile, stub: StubId, element_type: StubElementType) -> Self {
        LuaElement {
            file,
            repr: ElementRepr::Stub {
                stub,
                element_type,
                node: OnceCell::new(),
            },
        }
    }

    /// View over a stub whose live node is already known.
    pub fn from_stub_and_node(
        file: &'f LuaFile,
        stub: StubId,
        element_type: StubElementType,
        node: NodeId,
    ) -> Self {
        LuaElement {
            file,
            repr: ElementRepr::Stub {
                stub,
                element_type,
                node: OnceCell::from(node),
            },
        }
    }

    #[inline]
    pub fn file(&self) -> &'f LuaFile {
        self.file
    }

    /// Element type. Never forces materialization.
    pub fn kind(&self) -> SyntaxKind {
        match &self.repr {
            ElementRepr::Live(node) => self.file.tree().kind(*node),
            ElementRepr::Stub { element_type, .. } => element_type.kind(),
        }
    }

    /// Whether this element was constructed from a stub.
    pub fn is_stub_based(&self) -> bool {
        matches!(self.repr, ElementRepr::Stub { .. })
    }

    /// Whether the live node is bound without further work.
    pub fn is_materialized(&self) -> bool {
        match &self.repr {
            ElementRepr::Live(_) => true,
            ElementRepr::Stub { node, .. } => node.get().is_some(),
        }
    }

    /// Stub id of this element, if its kind carries stubs.
    pub fn stub_id(&self) -> Option<StubId> {
        match &self.repr {
            ElementRepr::Live(node) => self.file.stub_for_node(*node),
            ElementRepr::Stub { stub, .. } => Some(*stub),
        }
    }

    /// Stub of this element, building the file's stub tree if needed.
    pub fn stub(&self) -> Option<&'f Stub> {
        let id = self.stub_id()?;
        self.file.stub_tree().ok()?.get(id)
    }

    /// The live node, binding it from the stub on first call.
    pub fn materialize(&self) -> Result<NodeId, StubError> {
        match &self.repr {
            ElementRepr::Live(node) => Ok(*node),
            ElementRepr::Stub { stub, node, .. } => {
                if let Some(node) = node.get() {
                    return Ok(*node);
                }
                let bound = self.file.node_for_stub(*stub)?;
                trace!(?stub, node = ?bound, "materialized stub element");
                Ok(*node.get_or_init(|| bound))
            }
        }
    }

    /// The live node, or `None` if the stub cannot be bound to the tree.
    pub fn node(&self) -> Option<NodeId> {
        self.materialize()
            .map_err(|err| warn!(kind = ?self.kind(), %err, "cannot materialize element"))
            .ok()
    }

    pub fn span(&self) -> Option<Span> {
        let node = self.node()?;
        Some(self.file.tree().span(node))
    }

    pub fn text(&self) -> Option<&'f str> {
        let node = self.node()?;
        Some(self.file.tree().text(node))
    }

    pub fn parent(&self) -> Option<LuaElement<'f>> {
        let node = self.node()?;
        let parent = self.file.tree().parent(node)?;
        Some(LuaElement::from_node(self.file, parent))
    }

    /// Immediate children, tokens included, as live elements.
    pub fn children(&self) -> impl Iterator<Item = LuaElement<'f>> + 'f {
        let file = self.file;
        let tree = file.tree();
        self.node()
            .into_iter()
            .flat_map(move |node| tree.children(node))
            .map(move |child| LuaElement::from_node(file, child))
    }

    /// Whether two views denote the same element of the same file.
    pub fn same_element(&self, other: &LuaElement<'_>) -> bool {
        std::ptr::eq(self.file, other.file)
            && match (&self.repr, &other.repr) {
                (ElementRepr::Stub { stub: a, .. }, ElementRepr::Stub { stub: b, .. }) => a == b,
                _ => self.node().is_some() && self.node() == other.node(),
            }
    }
}

impl fmt::Debug for LuaElement<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            ElementRepr::Live(node) => write!(f, "{:?}({:?})", self.kind(), node),
            ElementRepr::Stub { stub, node, .. } => match node.get() {
                Some(node) => write!(f, "{:?}({:?} -> {:?})", self.kind(), stub, node),
                None => write!(f, "{:?}({:?})", self.kind(), stub),
            },
        }
    }
}

/// Typed view over a [`LuaElement`] of particular kinds.
pub trait PsiElement<'f>: Sized {
    /// Whether elements of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// View `element` as `Self`, or `None` if its kind does not match.
    fn cast(element: LuaElement<'f>) -> Option<Self>;

    /// The underlying generic element.
    fn element(&self) -> &LuaElement<'f>;

    /// Double-dispatch into `visitor`.
    fn accept(&self, visitor: Visitor<'_>);

    fn kind(&self) -> SyntaxKind {
        self.element().kind()
    }

    fn span(&self) -> Option<Span> {
        self.element().span()
    }

    fn text(&self) -> Option<&'f str> {
        self.element().text()
    }
}
