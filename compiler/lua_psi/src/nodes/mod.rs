//! Typed accessor classes, one per grammar rule.
//!
//! The structs, their constructors, casts and `accept` implementations are
//! generated by `lua_elements!` from one table; hand-written semantic
//! accessors live next to it (`paren.rs`, `accessors.rs`).

mod accessors;
mod expr;
mod paren;

use lua_ir::{NodeId, StubElementType, StubId, SyntaxKind};
use tracing::trace;

use crate::element::{LuaElement, PsiElement};
use crate::file::LuaFile;
use crate::visitor::Visitor;

pub use expr::LuaExpr;

macro_rules! lua_elements {
    ($( $(#[$meta:meta])* $name:ident => $kind:ident, $visit:ident; )*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug)]
            pub struct $name<'f> {
                element: LuaElement<'f>,
            }

            impl<'f> $name<'f> {
                /// Accessor over a live node. The node must be of this kind.
                pub fn from_node(file: &'f LuaFile, node: NodeId) -> Self {
                    $name { element: LuaElement::from_node(file, node) }
                }

                /// Accessor over a stub; the live node is bound when first needed.
                pub fn from_stub(
                    file: &'f LuaFile,
                    stub: StubId,
                    element_type: StubElementType,
                ) -> Self {
                    $name { element: LuaElement::from_stub(file, stub, element_type) }
                }

                /// Accessor over a stub whose live node is already known.
                pub fn from_stub_and_node(
                    file: &'f LuaFile,
                    stub: StubId,
                    element_type: StubElementType,
                    node: NodeId,
                ) -> Self {
                    $name {
                        element: LuaElement::from_stub_and_node(file, stub, element_type, node),
                    }
                }
            }

            impl<'f> PsiElement<'f> for $name<'f> {
                fn can_cast(kind: SyntaxKind) -> bool {
                    kind == SyntaxKind::$kind
                }

                fn cast(element: LuaElement<'f>) -> Option<Self> {
                    if Self::can_cast(element.kind()) {
                        Some($name { element })
                    } else {
                        None
                    }
                }

                fn element(&self) -> &LuaElement<'f> {
                    &self.element
                }

                fn accept(&self, visitor: Visitor<'_>) {
                    match visitor {
                        Visitor::Lua(visitor) => visitor.$visit(self),
                        Visitor::Generic(visitor) => visitor.visit_element(&self.element),
                    }
                }
            }
        )*

        impl LuaElement<'_> {
            /// Dispatch to the accessor class matching this element's kind.
            ///
            /// Kinds without an accessor class (tokens, the file root) get the
            /// generic `visit_element` call.
            pub fn accept(&self, visitor: Visitor<'_>) {
                match self.kind() {
                    $( SyntaxKind::$kind => $name { element: self.clone() }.accept(visitor), )*
                    kind => {
                        trace!(?kind, "no accessor class, generic dispatch");
                        visitor.visit_element(self);
                    }
                }
            }
        }
    };
}

lua_elements! {
    /// `( expr )`
    LuaParenExpr => ParenExpr, visit_paren_expr;
    /// `nil`, `true`, `false`, numbers, strings and `...`
    LuaLiteralExpr => LiteralExpr, visit_literal_expr;
    LuaNameExpr => NameExpr, visit_name_expr;
    /// `lhs op rhs`
    LuaBinaryExpr => BinaryExpr, visit_binary_expr;
    /// `op operand`
    LuaUnaryExpr => UnaryExpr, visit_unary_expr;
    /// `callee(args)`
    LuaCallExpr => CallExpr, visit_call_expr;
    /// `base.name` or `base[key]`
    LuaIndexExpr => IndexExpr, visit_index_expr;
    /// `{ fields }`
    LuaTableExpr => TableExpr, visit_table_expr;
    /// `function (params) body end`
    LuaClosureExpr => ClosureExpr, visit_closure_expr;
    LuaArgList => ArgList, visit_arg_list;
    LuaTableField => TableField, visit_table_field;
    LuaBlock => Block, visit_block;
}
