//! The expression capability.

use lua_ir::SyntaxKind;

use super::{
    LuaBinaryExpr, LuaCallExpr, LuaClosureExpr, LuaIndexExpr, LuaLiteralExpr, LuaNameExpr,
    LuaParenExpr, LuaTableExpr, LuaUnaryExpr,
};
use crate::element::{LuaElement, PsiElement};
use crate::visitor::Visitor;

/// Any expression element.
///
/// Castable from exactly the kinds flagged as expressions in the
/// element-type registry.
#[derive(Clone, Debug)]
pub enum LuaExpr<'f> {
    Paren(LuaParenExpr<'f>),
    Literal(LuaLiteralExpr<'f>),
    Name(LuaNameExpr<'f>),
    Binary(LuaBinaryExpr<'f>),
    Unary(LuaUnaryExpr<'f>),
    Call(LuaCallExpr<'f>),
    Index(LuaIndexExpr<'f>),
    Table(LuaTableExpr<'f>),
    Closure(LuaClosureExpr<'f>),
}

impl<'f> PsiElement<'f> for LuaExpr<'f> {
    fn can_cast(kind: SyntaxKind) -> bool {
        kind.is_expr()
    }

    fn cast(element: LuaElement<'f>) -> Option<Self> {
        let expr = match element.kind() {
            SyntaxKind::ParenExpr => LuaExpr::Paren(LuaParenExpr::cast(element)?),
            SyntaxKind::LiteralExpr => LuaExpr::Literal(LuaLiteralExpr::cast(element)?),
            SyntaxKind::NameExpr => LuaExpr::Name(LuaNameExpr::cast(element)?),
            SyntaxKind::BinaryExpr => LuaExpr::Binary(LuaBinaryExpr::cast(element)?),
            SyntaxKind::UnaryExpr => LuaExpr::Unary(LuaUnaryExpr::cast(element)?),
            SyntaxKind::CallExpr => LuaExpr::Call(LuaCallExpr::cast(element)?),
            SyntaxKind::IndexExpr => LuaExpr::Index(LuaIndexExpr::cast(element)?),
            SyntaxKind::TableExpr => LuaExpr::Table(LuaTableExpr::cast(element)?),
            SyntaxKind::ClosureExpr => LuaExpr::Closure(LuaClosureExpr::cast(element)?),
            _ => return None,
        };
        Some(expr)
    }

    fn element(&self) -> &LuaElement<'f> {
        match self {
            LuaExpr::Paren(expr) => expr.element(),
            LuaExpr::Literal(expr) => expr.element(),
            LuaExpr::Name(expr) => expr.element(),
            LuaExpr::Binary(expr) => expr.element(),
            LuaExpr::Unary(expr) => expr.element(),
            LuaExpr::Call(expr) => expr.element(),
            LuaExpr::Index(expr) => expr.element(),
            LuaExpr::Table(expr) => expr.element(),
            LuaExpr::Closure(expr) => expr.element(),
        }
    }

    fn accept(&self, visitor: Visitor<'_>) {
        match self {
            LuaExpr::Paren(expr) => expr.accept(visitor),
            LuaExpr::Literal(expr) => expr.accept(visitor),
            LuaExpr::Name(expr) => expr.accept(visitor),
            LuaExpr::Binary(expr) => expr.accept(visitor),
            LuaExpr::Unary(expr) => expr.accept(visitor),
            LuaExpr::Call(expr) => expr.accept(visitor),
            LuaExpr::Index(expr) => expr.accept(visitor),
            LuaExpr::Table(expr) => expr.accept(visitor),
            LuaExpr::Closure(expr) => expr.accept(visitor),
        }
    }
}

impl<'f> LuaExpr<'f> {
    /// Strip any number of enclosing parentheses.
    ///
    /// Returns `None` if an empty `()` is reached.
    pub fn unparenthesized(self) -> Option<LuaExpr<'f>> {
        let mut expr = self;
        while let LuaExpr::Paren(paren) = expr {
            expr = paren.inner_expr()?;
        }
        Some(expr)
    }
}
