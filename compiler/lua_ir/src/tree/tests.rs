use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;

/// `(a)` wrapped in a file node.
fn paren_tree() -> SyntaxTree {
    let mut b = TreeBuilder::new("(a)");
    b.start_node(SyntaxKind::File);
    b.start_node(SyntaxKind::ParenExpr);
    b.token(SyntaxKind::LParen, 1);
    b.start_node(SyntaxKind::NameExpr);
    b.token(SyntaxKind::Id, 1);
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
fn test_build_links_and_spans() {
    let tree = paren_tree();
    let root = tree.root();
    assert_eq!(tree.kind(root), SyntaxKind::File);
    assert_eq!(tree.span(root), Span::new(0, 3));
    assert_eq!(tree.parent(root), None);

    let Some(paren) = tree.first_child(root) else {
        panic!("file has no child");
    };
    assert_eq!(tree.kind(paren), SyntaxKind::ParenExpr);
    assert_eq!(tree.parent(paren), Some(root));
    assert_eq!(tree.text(paren), "(a)");

    let kinds: Vec<_> = tree.children(paren).map(|id| tree.kind(id)).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::LParen, SyntaxKind::NameExpr, SyntaxKind::RParen]
    );
}

#[test]
fn test_descendants_pre_order() {
    let tree = paren_tree();
    let kinds: Vec<_> = tree
        .descendants(tree.root())
        .map(|id| tree.kind(id))
        .collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::File,
            SyntaxKind::ParenExpr,
            SyntaxKind::LParen,
            SyntaxKind::NameExpr,
            SyntaxKind::Id,
            SyntaxKind::RParen,
        ]
    );
    // Pre-order allocation: ids match iteration order.
    let ids: Vec<_> = tree.descendants(tree.root()).map(NodeId::index).collect();
    assert_eq!(ids, (0..tree.node_count()).collect::<Vec<_>>());
}

#[test]
fn test_descendants_stays_in_subtree() {
    let tree = paren_tree();
    let name = NodeId::new(3);
    let kinds: Vec<_> = tree.descendants(name).map(|id| tree.kind(id)).collect();
    assert_eq!(kinds, vec![SyntaxKind::NameExpr, SyntaxKind::Id]);
}

#[test]
fn test_ancestors() {
    let tree = paren_tree();
    let id_token = NodeId::new(4);
    let kinds: Vec<_> = tree.ancestors(id_token).map(|id| tree.kind(id)).collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::NameExpr, SyntaxKind::ParenExpr, SyntaxKind::File]
    );
}

#[test]
fn test_debug_dump() {
    let tree = paren_tree();
    let expected = "\
FILE@0..3
  PAREN_EXPR@0..3
    LPAREN@0..1 \"(\"
    NAME_EXPR@1..2
      ID@1..2 \"a\"
    RPAREN@2..3 \")\"
";
    assert_eq!(format!("{tree:?}"), expected);
}

#[test]
fn test_empty_source_file() {
    let mut b = TreeBuilder::new("");
    b.start_node(SyntaxKind::File);
    b.finish_node();
    let Ok(tree) = b.finish() else {
        panic!("empty file should build");
    };
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.first_child(tree.root()), None);
    assert!(tree.span(tree.root()).is_empty());
}

#[test]
fn test_error_empty() {
    let b = TreeBuilder::new("");
    assert_eq!(b.finish().err(), Some(TreeError::Empty));
}

#[test]
fn test_error_unclosed() {
    let mut b = TreeBuilder::new("(");
    b.start_node(SyntaxKind::File);
    b.start_node(SyntaxKind::ParenExpr);
    b.token(SyntaxKind::LParen, 1);
    assert_eq!(b.finish().err(), Some(TreeError::Unclosed { count: 2 }));
}

#[test]
fn test_error_unbalanced_finish() {
    let mut b = TreeBuilder::new("");
    b.finish_node();
    assert_eq!(b.finish().err(), Some(TreeError::UnbalancedFinish));
}

#[test]
fn test_error_kind_misuse() {
    let mut b = TreeBuilder::new("(");
    b.start_node(SyntaxKind::LParen);
    assert_eq!(
        b.finish().err(),
        Some(TreeError::TokenAsNode(SyntaxKind::LParen))
    );

    let mut b = TreeBuilder::new("(");
    b.start_node(SyntaxKind::File);
    b.token(SyntaxKind::ParenExpr, 1);
    assert_eq!(
        b.finish().err(),
        Some(TreeError::NodeAsToken(SyntaxKind::ParenExpr))
    );
}

#[test]
fn test_error_token_outside_root() {
    let mut b = TreeBuilder::new("a");
    b.token(SyntaxKind::Id, 1);
    assert_eq!(
        b.finish().err(),
        Some(TreeError::TokenOutsideRoot {
            kind: SyntaxKind::Id
        })
    );
}

#[test]
fn test_error_second_root() {
    let mut b = TreeBuilder::new("");
    b.start_node(SyntaxKind::File);
    b.finish_node();
    b.start_node(SyntaxKind::File);
    b.finish_node();
    assert_eq!(
        b.finish().err(),
        Some(TreeError::MultipleRoots {
            kind: SyntaxKind::File
        })
    );
}

#[test]
fn test_error_token_past_end() {
    let mut b = TreeBuilder::new("ab");
    b.start_node(SyntaxKind::File);
    b.token(SyntaxKind::Id, 3);
    b.finish_node();
    assert_eq!(
        b.finish().err(),
        Some(TreeError::TokenPastEnd {
            kind: SyntaxKind::Id,
            offset: 0,
            source_len: 2,
        })
    );
}

#[test]
fn test_error_char_boundary() {
    let mut b = TreeBuilder::new("\"é\"");
    b.start_node(SyntaxKind::File);
    b.token(SyntaxKind::String, 2);
    assert!(matches!(
        b.finish(),
        Err(TreeError::NotCharBoundary { offset: 0, .. })
    ));
}

#[test]
fn test_error_trailing_text() {
    let mut b = TreeBuilder::new("a b");
    b.start_node(SyntaxKind::File);
    b.token(SyntaxKind::Id, 1);
    b.finish_node();
    assert_eq!(
        b.finish().err(),
        Some(TreeError::TrailingText {
            offset: 1,
            remaining: 2,
        })
    );
}

#[test]
fn test_first_error_wins() {
    let mut b = TreeBuilder::new("a");
    b.finish_node();
    b.start_node(SyntaxKind::Id);
    assert_eq!(b.finish().err(), Some(TreeError::UnbalancedFinish));
}

proptest! {
    #[test]
    fn prop_token_spans_tile_the_source(lens in prop::collection::vec(1usize..8, 0..32)) {
        let text: String = lens.iter().map(|&len| "x".repeat(len)).collect();
        let mut b = TreeBuilder::new(text.clone());
        b.start_node(SyntaxKind::File);
        for &len in &lens {
            b.token(SyntaxKind::Id, len);
        }
        b.finish_node();
        let tree = match b.finish() {
            Ok(tree) => tree,
            Err(err) => return Err(TestCaseError::fail(err.to_string())),
        };

        prop_assert_eq!(tree.span(tree.root()).len() as usize, text.len());
        let mut offset = 0;
        let mut count = 0;
        for child in tree.children(tree.root()) {
            let span = tree.span(child);
            prop_assert_eq!(span.start, offset);
            prop_assert_eq!(span.len() as usize, lens[count]);
            prop_assert_eq!(tree.parent(child), Some(tree.root()));
            offset = span.end;
            count += 1;
        }
        prop_assert_eq!(count, lens.len());
    }
}
