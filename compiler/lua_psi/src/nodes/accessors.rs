//! Semantic accessors of the non-parenthesized accessor classes.

use lua_ir::{LiteralKind, Stub, StubData, SyntaxKind};
use smallvec::SmallVec;

use super::{
    LuaArgList, LuaBinaryExpr, LuaCallExpr, LuaExpr, LuaIndexExpr, LuaLiteralExpr, LuaNameExpr,
    LuaUnaryExpr,
};
use crate::element::{LuaElement, PsiElement};
use crate::util::{child_of_type, children_of_type};

/// First immediate token of `element` whose kind satisfies `pred`.
fn token_where<'f>(
    element: &LuaElement<'f>,
    pred: impl Fn(SyntaxKind) -> bool,
) -> Option<LuaElement<'f>> {
    element.children().find(|child| pred(child.kind()))
}

impl<'f> LuaNameExpr<'f> {
    /// Identifier text. Read from the stub when one is at hand, so a
    /// stub-backed name never loads the tree.
    pub fn name(&self) -> Option<&'f str> {
        if self.element().is_stub_based() && !self.element().is_materialized() {
            if let Some(StubData::Name(name)) = self.element().stub().map(Stub::data) {
                return Some(name.as_str());
            }
        }
        token_where(self.element(), |kind| kind == SyntaxKind::Id)?.text()
    }
}

impl LuaLiteralExpr<'_> {
    /// Literal class. Read from the stub when one is at hand.
    pub fn literal_kind(&self) -> Option<LiteralKind> {
        if self.element().is_stub_based() && !self.element().is_materialized() {
            if let Some(StubData::Literal { kind, .. }) = self.element().stub().map(Stub::data) {
                return Some(*kind);
            }
        }
        let token = token_where(self.element(), |kind| LiteralKind::of_token(kind).is_some())?;
        LiteralKind::of_token(token.kind())
    }
}

impl<'f> LuaBinaryExpr<'f> {
    pub fn lhs(&self) -> Option<LuaExpr<'f>> {
        child_of_type(self.element())
    }

    /// Second operand; `None` if the parse stopped after the operator.
    pub fn rhs(&self) -> Option<LuaExpr<'f>> {
        children_of_type::<LuaExpr<'f>>(self.element()).into_iter().nth(1)
    }

    /// Operator token kind, e.g. [`SyntaxKind::Plus`].
    pub fn op(&self) -> Option<SyntaxKind> {
        token_where(self.element(), is_operator).map(|token| token.kind())
    }
}

impl<'f> LuaUnaryExpr<'f> {
    pub fn operand(&self) -> Option<LuaExpr<'f>> {
        child_of_type(self.element())
    }

    pub fn op(&self) -> Option<SyntaxKind> {
        token_where(self.element(), is_operator).map(|token| token.kind())
    }
}

impl<'f> LuaCallExpr<'f> {
    pub fn callee(&self) -> Option<LuaExpr<'f>> {
        child_of_type(self.element())
    }

    pub fn args(&self) -> Option<LuaArgList<'f>> {
        child_of_type(self.element())
    }
}

impl<'f> LuaArgList<'f> {
    pub fn exprs(&self) -> SmallVec<[LuaExpr<'f>; 2]> {
        children_of_type(self.element())
    }
}

impl<'f> LuaIndexExpr<'f> {
    /// Indexed expression: `t` in `t.k` and `t[k]`.
    pub fn base(&self) -> Option<LuaExpr<'f>> {
        child_of_type(self.element())
    }

    /// Field name of `t.k`; `None` for bracket indexing.
    pub fn field_name(&self) -> Option<&'f str> {
        let mut after_dot = false;
        for child in self.element().children() {
            match child.kind() {
                SyntaxKind::Dot | SyntaxKind::Colon => after_dot = true,
                SyntaxKind::Id if after_dot => return child.text(),
                _ => {}
            }
        }
        None
    }
}

fn is_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Plus
            | SyntaxKind::Minus
            | SyntaxKind::Mul
            | SyntaxKind::Div
            | SyntaxKind::Mod
            | SyntaxKind::Exp
            | SyntaxKind::Concat
            | SyntaxKind::Eq
            | SyntaxKind::Ne
            | SyntaxKind::Lt
            | SyntaxKind::Le
            | SyntaxKind::Gt
            | SyntaxKind::Ge
            | SyntaxKind::Getn
            | SyntaxKind::And
            | SyntaxKind::Or
            | SyntaxKind::Not
    )
}
