use std::cell::Cell;
use std::rc::Rc;

use lua_ir::{SyntaxKind, TreeBuilder};
use pretty_assertions::assert_eq;

use super::*;
use crate::test_trees::{nested_parens, paren_name};

fn stubs_of(tree: &SyntaxTree) -> StubTree {
    match StubTree::build(tree) {
        Ok(stubs) => stubs,
        Err(err) => panic!("failed to build stubs: {err}"),
    }
}

/// `(1)`: same stub count as `(a)`, different kind in the paren.
fn paren_number() -> SyntaxTree {
    let mut b = TreeBuilder::new("(1)");
    b.start_node(SyntaxKind::File);
    b.start_node(SyntaxKind::ParenExpr);
    b.token(SyntaxKind::LParen, 1);
    b.start_node(SyntaxKind::LiteralExpr);
    b.token(SyntaxKind::Number, 1);
    b.finish_node();
    b.token(SyntaxKind::RParen, 1);
    b.finish_node();
    b.finish_node();
    match b.finish() {
        Ok(tree) => tree,
        Err(err) => panic!("failed to build tree: {err}"),
    }
}

#[test]
fn test_from_tree_is_loaded() {
    let file = LuaFile::from_tree(paren_name());
    assert!(file.is_tree_loaded());
    assert_eq!(file.root().kind(), SyntaxKind::File);
    assert_eq!(file.root().text(), Some("(a)"));
}

#[test]
fn test_stub_tree_built_on_demand() {
    let file = LuaFile::from_tree(paren_name());
    let Ok(stubs) = file.stub_tree() else {
        panic!("stub tree should build");
    };
    let kinds: Vec<_> = stubs.iter().map(|(_, stub)| stub.kind()).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::File, SyntaxKind::ParenExpr, SyntaxKind::NameExpr]
    );
}

#[test]
fn test_from_stubs_loads_tree_once_on_demand() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let file = LuaFile::from_stubs(stubs_of(&paren_name()), move || {
        counter.set(counter.get() + 1);
        paren_name()
    });

    assert!(!file.is_tree_loaded());
    let Ok(paren) = file.stub_element(StubId::new(1)) else {
        panic!("stub 1 should exist");
    };
    assert_eq!(paren.kind(), SyntaxKind::ParenExpr);
    assert!(!file.is_tree_loaded());
    assert_eq!(calls.get(), 0);

    assert_eq!(paren.text(), Some("(a)"));
    assert_eq!(file.node_for_stub(StubId::new(2)).ok(), Some(NodeId::new(3)));
    assert!(file.is_tree_loaded());
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_node_for_stub_binds_in_pre_order() {
    let file = LuaFile::from_tree(paren_name());
    // File(0) ParenExpr(1) LParen(2) NameExpr(3) Id(4) RParen(5)
    assert_eq!(file.node_for_stub(StubId::ROOT).ok(), Some(NodeId::new(0)));
    assert_eq!(file.node_for_stub(StubId::new(1)).ok(), Some(NodeId::new(1)));
    assert_eq!(file.node_for_stub(StubId::new(2)).ok(), Some(NodeId::new(3)));
}

#[test]
fn test_node_for_unknown_stub() {
    let file = LuaFile::from_tree(paren_name());
    assert!(matches!(
        file.node_for_stub(StubId::new(9)),
        Err(StubError::UnknownStub(id)) if id == StubId::new(9)
    ));
    assert!(matches!(
        file.stub_element(StubId::new(9)),
        Err(StubError::UnknownStub(_))
    ));
}

#[test]
fn test_node_for_stub_count_mismatch() {
    let file = LuaFile::from_stubs(stubs_of(&paren_name()), nested_parens);
    assert!(matches!(
        file.node_for_stub(StubId::new(1)),
        Err(StubError::CountMismatch { stubs: 3, nodes: 4 })
    ));
}

#[test]
fn test_node_for_stub_kind_mismatch() {
    let file = LuaFile::from_stubs(stubs_of(&paren_name()), paren_number);
    assert_eq!(file.node_for_stub(StubId::new(1)).ok(), Some(NodeId::new(1)));
    assert!(matches!(
        file.node_for_stub(StubId::new(2)),
        Err(StubError::Mismatch {
            expected: SyntaxKind::NameExpr,
            found: SyntaxKind::LiteralExpr,
            ..
        })
    ));
}

#[test]
fn test_stub_for_node() {
    let file = LuaFile::from_tree(paren_name());
    assert_eq!(file.stub_for_node(NodeId::new(0)), Some(StubId::ROOT));
    assert_eq!(file.stub_for_node(NodeId::new(3)), Some(StubId::new(2)));
    // tokens carry no stub
    assert_eq!(file.stub_for_node(NodeId::new(2)), None);
}

#[test]
fn test_debug_does_not_force_tree() {
    let file = LuaFile::from_stubs(stubs_of(&paren_name()), paren_name);
    assert_eq!(
        format!("{file:?}"),
        "LuaFile { tree_loaded: false, stubs_built: true, .. }"
    );
    assert!(!file.is_tree_loaded());
}
