use lua_ir::NodeId;
use pretty_assertions::assert_eq;

use super::*;
use crate::file::LuaFile;
use crate::nodes::{LuaArgList, LuaCallExpr, LuaExpr, LuaNameExpr, LuaParenExpr};
use crate::test_trees::{call_with_args, paren_after_trivia};

#[test]
fn test_child_of_type_skips_trivia_and_tokens() {
    let file = LuaFile::from_tree(paren_after_trivia());
    let paren = file.element(NodeId::new(1));
    let Some(name) = child_of_type::<LuaNameExpr<'_>>(&paren) else {
        panic!("paren contains a name");
    };
    assert_eq!(name.text(), Some("a"));
    assert!(child_of_type::<LuaCallExpr<'_>>(&paren).is_none());
}

#[test]
fn test_children_of_type_in_source_order() {
    let file = LuaFile::from_tree(call_with_args());
    let args = file.element(NodeId::new(4));
    let texts: Vec<_> = children_of_type::<LuaExpr<'_>>(&args)
        .iter()
        .map(PsiElement::text)
        .collect();
    assert_eq!(texts, vec![Some("x"), Some("(y)")]);
    assert!(children_of_type::<LuaParenExpr<'_>>(&file.element(NodeId::new(2))).is_empty());
}

#[test]
fn test_parent_of_type() {
    let file = LuaFile::from_tree(call_with_args());
    // `y` inside `(y)` inside the argument list
    let y = file.element(NodeId::new(12));
    assert_eq!(y.text(), Some("y"));

    let Some(args) = parent_of_type::<LuaArgList<'_>>(&y) else {
        panic!("`y` is inside an argument list");
    };
    assert_eq!(args.text(), Some("(x, (y))"));
    assert!(parent_of_type::<LuaParenExpr<'_>>(&y).is_some());
    assert!(parent_of_type::<LuaNameExpr<'_>>(&y).is_none());
}
