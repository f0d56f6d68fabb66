//! Lua IR - structural layer for the Lua PSI.
//!
//! This crate contains the data structures the typed element accessors are
//! views over:
//! - Spans for source locations
//! - `SyntaxKind`, the element-type registry for tokens and grammar rules
//! - `SyntaxTree`, a flat arena of composite and leaf nodes
//! - `StubTree`, the compact serializable summary of stub-bearing nodes
//!
//! # Design Philosophy
//!
//! - **Flatten Everything**: nodes are `NodeId(u32)` indices into parallel
//!   arrays, stubs are `StubId(u32)` indices into a stub vector
//! - **Pre-order Ids**: both arenas allocate in pre-order, so the i-th stub
//!   always describes the i-th stub-bearing node of its tree

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod kind;
mod span;
pub mod stub;
pub mod tree;

pub use kind::{KindFlags, StubElementType, SyntaxKind};
pub use span::{Span, SpanError};
pub use stub::{LiteralKind, Stub, StubData, StubError, StubId, StubTree};
pub use tree::{NodeId, SyntaxTree, TreeBuilder, TreeError};
