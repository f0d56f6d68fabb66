//! Stub trees.
//!
//! A stub tree keeps one [`Stub`] per stub-bearing node of a syntax tree
//! (kinds flagged [`KindFlags::STUB`](crate::KindFlags::STUB)), in pre-order.
//! Stubs are small enough to serialize per file and answer simple queries
//! (kind, names, literal text) without materializing the full tree.
//!
//! # Binding
//!
//! Stub ids and stub-bearing nodes are both numbered in pre-order, so the
//! i-th stub of a file describes the i-th stub-bearing node of the same
//! file's syntax tree. Consumers rebuild that correspondence after loading a
//! tree and treat any disagreement as a [`StubError::Mismatch`].

mod codec;

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::{NodeId, StubElementType, SyntaxKind, SyntaxTree};

pub use codec::STUB_FORMAT_VERSION;

/// Index into a stub tree.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct StubId(u32);

impl StubId {
    /// The file stub.
    pub const ROOT: StubId = StubId(0);

    #[inline]
    pub const fn new(index: u32) -> Self {
        StubId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for StubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StubId({})", self.0)
    }
}

/// Literal classes recorded by literal-expression stubs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LiteralKind {
    Nil,
    Bool,
    Number,
    String,
    Vararg,
}

impl LiteralKind {
    /// Literal class of a token kind, if it is a literal token.
    pub fn of_token(kind: SyntaxKind) -> Option<LiteralKind> {
        match kind {
            SyntaxKind::Nil => Some(LiteralKind::Nil),
            SyntaxKind::True | SyntaxKind::False => Some(LiteralKind::Bool),
            SyntaxKind::Number => Some(LiteralKind::Number),
            SyntaxKind::String => Some(LiteralKind::String),
            SyntaxKind::Ellipsis => Some(LiteralKind::Vararg),
            _ => None,
        }
    }
}

/// Per-stub payload.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StubData {
    /// No payload; the stub only records kind and position.
    Placeholder,
    /// Identifier of a name expression.
    Name(String),
    /// Class and source text of a literal expression.
    Literal { kind: LiteralKind, text: String },
}

/// One stub: element type, tree links and payload.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stub {
    element_type: StubElementType,
    parent: Option<StubId>,
    children: SmallVec<[StubId; 4]>,
    data: StubData,
}

impl Stub {
    #[inline]
    pub fn element_type(&self) -> StubElementType {
        self.element_type
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.element_type.kind()
    }

    #[inline]
    pub fn parent(&self) -> Option<StubId> {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[StubId] {
        &self.children
    }

    #[inline]
    pub fn data(&self) -> &StubData {
        &self.data
    }
}

/// Error from building, decoding or binding stub trees.
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    #[error("stub tree is empty")]
    Empty,
    #[error("stub tree root must be a file, found {0:?}")]
    BadRoot(SyntaxKind),
    #[error("{stub:?} refers to {target:?}, which is not a valid stub of this tree")]
    Dangling { stub: StubId, target: StubId },
    #[error("{child:?} is listed under {parent:?} but records parent {recorded:?}")]
    ParentLink {
        parent: StubId,
        child: StubId,
        recorded: Option<StubId>,
    },
    #[error("stub data is truncated ({len} bytes)")]
    Truncated { len: usize },
    #[error("bad stub magic {found:?}")]
    BadMagic { found: [u8; 4] },
    #[error("stub format version {found} is not supported (expected {expected})")]
    Version { found: u32, expected: u32 },
    #[error("stub codec failure: {0}")]
    Codec(#[from] bincode::Error),
    #[error("stub tree has {stubs} stubs but the syntax tree has {nodes} stub-bearing nodes")]
    CountMismatch { stubs: usize, nodes: usize },
    #[error("{stub:?} expects {expected:?} but the syntax tree has {found:?} at that position")]
    Mismatch {
        stub: StubId,
        expected: SyntaxKind,
        found: SyntaxKind,
    },
    #[error("{0:?} is not a stub of this tree")]
    UnknownStub(StubId),
    #[error("{stubs} stubs but only {listed} child entries")]
    Unlisted { stubs: usize, listed: usize },
    #[error("stubs are not in pre-order: expected {expected:?}, found {found:?}")]
    OutOfOrder { expected: StubId, found: StubId },
    #[error("stub tree exceeds u32::MAX stubs")]
    TooLarge,
}

/// Stubs of one file, in pre-order; [`StubId::ROOT`] is the file stub.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StubTree {
    stubs: Vec<Stub>,
}

impl StubTree {
    /// Summarize the stub-bearing nodes of `tree`.
    ///
    /// The tree root must be a [`SyntaxKind::File`] node.
    pub fn build(tree: &SyntaxTree) -> Result<StubTree, StubError> {
        let root_kind = tree.kind(tree.root());
        if root_kind != SyntaxKind::File {
            return Err(StubError::BadRoot(root_kind));
        }

        let mut stubs: Vec<Stub> = Vec::new();
        let mut stub_of: FxHashMap<NodeId, StubId> = FxHashMap::default();

        for node in tree.descendants(tree.root()) {
            let Some(element_type) = StubElementType::of(tree.kind(node)) else {
                continue;
            };
            let id = StubId::new(u32::try_from(stubs.len()).map_err(|_| StubError::TooLarge)?);
            let parent = tree
                .ancestors(node)
                .find_map(|ancestor| stub_of.get(&ancestor).copied());
            if let Some(parent) = parent {
                stubs[parent.index()].children.push(id);
            }
            stub_of.insert(node, id);
            stubs.push(Stub {
                element_type,
                parent,
                children: SmallVec::new(),
                data: stub_data(tree, node),
            });
        }

        debug!(stubs = stubs.len(), "built stub tree");
        Ok(StubTree { stubs })
    }

    /// Wrap decoded stubs after checking their links.
    fn from_stubs(stubs: Vec<Stub>) -> Result<StubTree, StubError> {
        let Some(root) = stubs.first() else {
            return Err(StubError::Empty);
        };
        if root.kind() != SyntaxKind::File || root.parent.is_some() {
            return Err(StubError::BadRoot(root.kind()));
        }

        let mut listed = 0usize;
        for (index, stub) in stubs.iter().enumerate() {
            let id = StubId::new(u32::try_from(index).map_err(|_| StubError::TooLarge)?);
            if index > 0 {
                match stub.parent {
                    Some(parent) if parent < id => {}
                    Some(parent) => return Err(StubError::Dangling { stub: id, target: parent }),
                    None => {
                        return Err(StubError::ParentLink {
                            parent: StubId::ROOT,
                            child: id,
                            recorded: None,
                        })
                    }
                }
            }
            // Children are listed in pre-order, strictly after their parent.
            let mut previous = id;
            for &child in &stub.children {
                let Some(child_stub) = stubs.get(child.index()).filter(|_| child > previous) else {
                    return Err(StubError::Dangling { stub: id, target: child });
                };
                previous = child;
                if child_stub.parent != Some(id) {
                    return Err(StubError::ParentLink {
                        parent: id,
                        child,
                        recorded: child_stub.parent,
                    });
                }
                listed += 1;
            }
        }
        // Lists are duplicate-free and every entry points back, so equal
        // counts mean no stub is missing from its parent's list.
        if listed + 1 != stubs.len() {
            return Err(StubError::Unlisted {
                stubs: stubs.len(),
                listed,
            });
        }
        check_pre_order(&stubs)?;
        Ok(StubTree { stubs })
    }

    #[inline]
    pub fn root(&self) -> &Stub {
        &self.stubs[0]
    }

    #[inline]
    pub fn get(&self, id: StubId) -> Option<&Stub> {
        self.stubs.get(id.index())
    }

    pub fn parent(&self, id: StubId) -> Option<StubId> {
        self.get(id).and_then(Stub::parent)
    }

    pub fn children(&self, id: StubId) -> &[StubId] {
        self.get(id).map_or(&[][..], Stub::children)
    }

    /// Number of stubs, the file stub included.
    #[inline]
    pub fn stub_count(&self) -> usize {
        self.stubs.len()
    }

    /// Stubs with their ids, in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (StubId, &Stub)> + '_ {
        (0u32..)
            .zip(&self.stubs)
            .map(|(index, stub)| (StubId::new(index), stub))
    }
}

/// Stub ids must match a depth-first walk from the root, the order in which
/// stub-bearing nodes are numbered. `stubs` must already form a tree.
fn check_pre_order(stubs: &[Stub]) -> Result<(), StubError> {
    let mut stack = vec![StubId::ROOT];
    let mut expected = 0u32;
    while let Some(found) = stack.pop() {
        if found != StubId::new(expected) {
            return Err(StubError::OutOfOrder {
                expected: StubId::new(expected),
                found,
            });
        }
        expected += 1;
        stack.extend(stubs[found.index()].children.iter().rev());
    }
    Ok(())
}

fn stub_data(tree: &SyntaxTree, node: NodeId) -> StubData {
    match tree.kind(node) {
        SyntaxKind::NameExpr => tree
            .children(node)
            .find(|&child| tree.kind(child) == SyntaxKind::Id)
            .map_or(StubData::Placeholder, |id| {
                StubData::Name(tree.text(id).to_owned())
            }),
        SyntaxKind::LiteralExpr => tree
            .children(node)
            .find_map(|child| {
                LiteralKind::of_token(tree.kind(child)).map(|kind| StubData::Literal {
                    kind,
                    text: tree.text(child).to_owned(),
                })
            })
            .unwrap_or(StubData::Placeholder),
        _ => StubData::Placeholder,
    }
}
