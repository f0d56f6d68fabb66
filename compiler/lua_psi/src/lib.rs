//! Typed element accessors over Lua syntax trees.
//!
//! This crate is the accessor layer on top of `lua_ir`:
//! - [`LuaFile`]: owns a file's live tree and stub tree, loading either lazily
//! - [`LuaElement`]: untyped view of one element, live or stub-backed
//! - Accessor classes ([`LuaParenExpr`], [`LuaCallExpr`], ...): typed views
//!   with semantic child lookups, e.g. [`LuaParenExpr::inner_expr`]
//! - [`visitor`]: double dispatch into Lua-specific or generic visitors
//!
//! Accessors never fail loudly. A child that is absent from an incomplete
//! parse, or a stub that cannot be bound to its tree, reads as `None`.

mod element;
mod file;
mod nodes;
mod util;
pub mod visitor;

#[cfg(test)]
mod test_trees;

use std::sync::Once;

pub use element::{LuaElement, PsiElement};
pub use file::{LuaFile, TreeSource};
pub use nodes::{
    LuaArgList, LuaBinaryExpr, LuaBlock, LuaCallExpr, LuaClosureExpr, LuaExpr, LuaIndexExpr,
    LuaLiteralExpr, LuaNameExpr, LuaParenExpr, LuaTableExpr, LuaTableField, LuaUnaryExpr,
};
pub use util::{child_of_type, children_of_type, parent_of_type};
pub use visitor::{walk_element, ElementVisitor, LuaVisitor, Visitor};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .init();
        }
    });
}
