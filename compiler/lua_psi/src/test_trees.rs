//! Hand-built trees shared by the unit tests.

use lua_ir::{SyntaxKind, SyntaxTree, TreeBuilder};

use SyntaxKind::{
    ArgList, CallExpr, Comma, Comment, File, Id, LParen, LiteralExpr, NameExpr, Number, ParenExpr,
    RParen, Whitespace,
};

fn finish(b: TreeBuilder) -> SyntaxTree {
    match b.finish() {
        Ok(tree) => tree,
        Err(err) => panic!("failed to build tree: {err}"),
    }
}

fn name(b: &mut TreeBuilder, len: usize) {
    b.start_node(NameExpr);
    b.token(Id, len);
    b.finish_node();
}

/// `(a)`
pub fn paren_name() -> SyntaxTree {
    let mut b = TreeBuilder::new("(a)");
    b.start_node(File);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    name(&mut b, 1);
    b.token(RParen, 1);
    b.finish_node();
    b.finish_node();
    finish(b)
}

/// `()`
pub fn paren_empty() -> SyntaxTree {
    let mut b = TreeBuilder::new("()");
    b.start_node(File);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    b.token(RParen, 1);
    b.finish_node();
    b.finish_node();
    finish(b)
}

/// `(--c` newline `a )`: the expression follows trivia.
pub fn paren_after_trivia() -> SyntaxTree {
    let mut b = TreeBuilder::new("(--c\na )");
    b.start_node(File);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    b.token(Comment, 3);
    b.token(Whitespace, 1);
    name(&mut b, 1);
    b.token(Whitespace, 1);
    b.token(RParen, 1);
    b.finish_node();
    b.finish_node();
    finish(b)
}

/// `((1))`
pub fn nested_parens() -> SyntaxTree {
    let mut b = TreeBuilder::new("((1))");
    b.start_node(File);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    b.start_node(LiteralExpr);
    b.token(Number, 1);
    b.finish_node();
    b.token(RParen, 1);
    b.finish_node();
    b.token(RParen, 1);
    b.finish_node();
    b.finish_node();
    finish(b)
}

/// `f(x, (y))`
pub fn call_with_args() -> SyntaxTree {
    let mut b = TreeBuilder::new("f(x, (y))");
    b.start_node(File);
    b.start_node(CallExpr);
    name(&mut b, 1);
    b.start_node(ArgList);
    b.token(LParen, 1);
    name(&mut b, 1);
    b.token(Comma, 1);
    b.token(Whitespace, 1);
    b.start_node(ParenExpr);
    b.token(LParen, 1);
    name(&mut b, 1);
    b.token(RParen, 1);
    b.finish_node();
    b.token(RParen, 1);
    b.finish_node();
    b.finish_node();
    b.finish_node();
    finish(b)
}
