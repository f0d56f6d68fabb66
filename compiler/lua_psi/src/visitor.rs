//! Visitor dispatch for Lua elements.
//!
//! # Design
//!
//! Two capabilities exist:
//! - [`ElementVisitor`]: sees every element as a generic [`LuaElement`]
//! - [`LuaVisitor`]: one `visit_*` method per accessor class
//!
//! Callers pick the capability explicitly through the closed [`Visitor`]
//! enum, and every `accept` is a match over it. A Lua visitor always
//! receives the most specific `visit_*` call for an element; a generic
//! visitor receives exactly one `visit_element` call.
//!
//! Default `visit_*` implementations chain from specific to general, e.g.
//! `visit_paren_expr` → `visit_expr` → `visit_element`, so a visitor only
//! overrides the level it cares about.
//!
//! # Example
//!
//! ```text
//! struct CountParens {
//!     count: usize,
//! }
//!
//! impl ElementVisitor for CountParens {}
//!
//! impl LuaVisitor for CountParens {
//!     fn visit_paren_expr(&mut self, expr: &LuaParenExpr<'_>) {
//!         self.count += 1;
//!         walk_element(self, expr.element());
//!     }
//! }
//! ```

use crate::element::{LuaElement, PsiElement};
use crate::nodes::{
    LuaArgList, LuaBinaryExpr, LuaBlock, LuaCallExpr, LuaClosureExpr, LuaExpr, LuaIndexExpr,
    LuaLiteralExpr, LuaNameExpr, LuaParenExpr, LuaTableExpr, LuaTableField, LuaUnaryExpr,
};

/// Generic visitor capability.
pub trait ElementVisitor {
    fn visit_element(&mut self, _element: &LuaElement<'_>) {}
}

/// Lua-specific visitor capability.
pub trait LuaVisitor: ElementVisitor {
    fn visit_paren_expr(&mut self, expr: &LuaParenExpr<'_>) {
        self.visit_expr(&LuaExpr::Paren(expr.clone()));
    }

    fn visit_literal_expr(&mut self, expr: &LuaLiteralExpr<'_>) {
        self.visit_expr(&LuaExpr::Literal(expr.clone()));
    }

    fn visit_name_expr(&mut self, expr: &LuaNameExpr<'_>) {
        self.visit_expr(&LuaExpr::Name(expr.clone()));
    }

    fn visit_binary_expr(&mut self, expr: &LuaBinaryExpr<'_>) {
        self.visit_expr(&LuaExpr::Binary(expr.clone()));
    }

    fn visit_unary_expr(&mut self, expr: &LuaUnaryExpr<'_>) {
        self.visit_expr(&LuaExpr::Unary(expr.clone()));
    }

    fn visit_call_expr(&mut self, expr: &LuaCallExpr<'_>) {
        self.visit_expr(&LuaExpr::Call(expr.clone()));
    }

    fn visit_index_expr(&mut self, expr: &LuaIndexExpr<'_>) {
        self.visit_expr(&LuaExpr::Index(expr.clone()));
    }

    fn visit_table_expr(&mut self, expr: &LuaTableExpr<'_>) {
        self.visit_expr(&LuaExpr::Table(expr.clone()));
    }

    fn visit_closure_expr(&mut self, expr: &LuaClosureExpr<'_>) {
        self.visit_expr(&LuaExpr::Closure(expr.clone()));
    }

    /// Shared fallback for every expression kind.
    fn visit_expr(&mut self, expr: &LuaExpr<'_>) {
        self.visit_element(expr.element());
    }

    fn visit_arg_list(&mut self, args: &LuaArgList<'_>) {
        self.visit_element(args.element());
    }

    fn visit_table_field(&mut self, field: &LuaTableField<'_>) {
        self.visit_element(field.element());
    }

    fn visit_block(&mut self, block: &LuaBlock<'_>) {
        self.visit_element(block.element());
    }
}

/// Visitor handed to `accept`, tagged with the capability it implements.
pub enum Visitor<'v> {
    Lua(&'v mut dyn LuaVisitor),
    Generic(&'v mut dyn ElementVisitor),
}

impl Visitor<'_> {
    /// Generic dispatch, used for elements with no Lua-specific handler.
    pub(crate) fn visit_element(self, element: &LuaElement<'_>) {
        match self {
            Visitor::Lua(visitor) => visitor.visit_element(element),
            Visitor::Generic(visitor) => visitor.visit_element(element),
        }
    }
}

/// Dispatch every composite child of `element` to `visitor`, in source order.
///
/// Tokens are skipped. Call from a `visit_*` override to recurse.
pub fn walk_element(visitor: &mut dyn LuaVisitor, element: &LuaElement<'_>) {
    for child in element.children().filter(|child| !child.kind().is_token()) {
        child.accept(Visitor::Lua(&mut *visitor));
    }
}
