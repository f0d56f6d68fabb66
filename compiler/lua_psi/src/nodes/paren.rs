use super::{LuaExpr, LuaParenExpr};
use crate::element::PsiElement;
use crate::util::child_of_type;

impl<'f> LuaParenExpr<'f> {
    /// The wrapped expression.
    ///
    /// First immediate child with the expression capability, wherever it
    /// sits among the tokens. `None` for `()` and other incomplete parses.
    pub fn inner_expr(&self) -> Option<LuaExpr<'f>> {
        child_of_type(self.element())
    }
}
