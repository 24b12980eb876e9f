//! Tests for the arena tree: collapse, removal, traversal

use astgraph_core::grammar::php::PhpKind;
use astgraph_core::modifier::collapse::collapse_wrapper;
use astgraph_core::{AstTree, NodeId, PhpGrammar, Grammar, SourceNode};

fn leaf(tree: &mut AstTree<PhpKind>, parent: NodeId, kind: PhpKind) -> NodeId {
    tree.add_child(parent, SourceNode::new(kind))
}

#[test]
fn test_collapse_replaces_wrapper_at_same_position() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let first = leaf(&mut tree, root, PhpKind::Echo);
    let wrapper = leaf(&mut tree, root, PhpKind::ExpressionStatement);
    let inner = leaf(&mut tree, wrapper, PhpKind::Assign);
    let last = leaf(&mut tree, root, PhpKind::Return);
    let before = tree.node_count();

    tree.collapse(wrapper);

    assert_eq!(tree.children(root), &[first, inner, last]);
    assert_eq!(tree.parent(inner), Some(root));
    assert!(!tree.is_attached(wrapper));
    assert_eq!(tree.node_count(), before - 1);
}

#[test]
fn test_collapse_root_wrapper_promotes_child() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Parenthesized));
    let root = tree.root();
    let inner = leaf(&mut tree, root, PhpKind::Variable);

    tree.collapse(root);

    assert_eq!(tree.root(), inner);
    assert_eq!(tree.parent(inner), None);
    assert_eq!(tree.node_count(), 1);
}

#[test]
#[should_panic(expected = "expected exactly one child")]
fn test_collapse_rejects_two_children() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let wrapper = leaf(&mut tree, root, PhpKind::ExpressionStatement);
    leaf(&mut tree, wrapper, PhpKind::Variable);
    leaf(&mut tree, wrapper, PhpKind::Variable);

    collapse_wrapper(&mut tree, wrapper, PhpGrammar::is_wrapper);
}

#[test]
#[should_panic(expected = "expected exactly one child")]
fn test_collapse_rejects_empty_wrapper() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let wrapper = leaf(&mut tree, root, PhpKind::Parenthesized);

    collapse_wrapper(&mut tree, wrapper, PhpGrammar::is_wrapper);
}

#[test]
fn test_collapse_wrapper_ignores_other_kinds() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let echo = leaf(&mut tree, root, PhpKind::Echo);
    leaf(&mut tree, echo, PhpKind::Variable);
    leaf(&mut tree, echo, PhpKind::Variable);

    assert!(!collapse_wrapper(&mut tree, echo, PhpGrammar::is_wrapper));
    assert_eq!(tree.degree(echo), 2);
}

#[test]
#[should_panic(expected = "has no child at position 3")]
fn test_child_lookup_out_of_range_panics() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    leaf(&mut tree, root, PhpKind::Nop);

    tree.child(root, 3);
}

#[test]
fn test_remove_detaches_subtree() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let declare = leaf(&mut tree, root, PhpKind::Declare);
    let item = leaf(&mut tree, declare, PhpKind::DeclareItem);
    let echo = leaf(&mut tree, root, PhpKind::Echo);

    tree.remove(declare);

    assert_eq!(tree.children(root), &[echo]);
    assert!(!tree.is_attached(item));
    assert_eq!(tree.pre_order(), vec![root, echo]);
}

#[test]
#[should_panic(expected = "cannot remove the root")]
fn test_remove_root_panics() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    tree.remove(root);
}

#[test]
fn test_display_label_prefers_label() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let call = leaf(&mut tree, root, PhpKind::FuncCall);

    assert_eq!(tree.display_label(call), "func_call");
    tree.set_label(call, "strlen()");
    assert_eq!(tree.display_label(call), "strlen()");
}
