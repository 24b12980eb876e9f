//! End-to-end decoration of a namespace/class/method tree

use astgraph_core::export::dot::to_dot;
use astgraph_core::grammar::php::{BinaryOperator, PhpKind};
use astgraph_core::{decorate, AstTree, GraphDocument, PhpGrammar, SourceFields, SourceNode};

/// Program > Namespace App > Class Foo > Method bar > 1 + 2
fn scenario_tree() -> AstTree<PhpKind> {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();

    let ns = tree.add_child(
        root,
        SourceNode::with_fields(
            PhpKind::Namespace,
            SourceFields {
                has_name: true,
                ..SourceFields::default()
            },
        ),
    );
    tree.add_child(ns, SourceNode::named(PhpKind::Name, "App"));

    let class = tree.add_child(ns, SourceNode::new(PhpKind::Class));
    tree.add_child(class, SourceNode::named(PhpKind::Name, "Foo"));

    let method = tree.add_child(class, SourceNode::new(PhpKind::ClassMethod));
    tree.add_child(method, SourceNode::named(PhpKind::Name, "bar"));

    let statement = tree.add_child(method, SourceNode::new(PhpKind::ExpressionStatement));
    let plus = tree.add_child(statement, SourceNode::new(PhpKind::BinaryOp(BinaryOperator::Plus)));
    tree.add_child(plus, SourceNode::valued(PhpKind::Integer, "1"));
    tree.add_child(plus, SourceNode::valued(PhpKind::Integer, "2"));

    tree
}

#[test]
fn test_scenario_labels_and_shapes() {
    let mut tree = scenario_tree();
    decorate::<PhpGrammar>(&mut tree);
    let document = GraphDocument::from_tree(&tree);

    let rows: Vec<(&str, Option<&str>)> = document
        .nodes
        .iter()
        .map(|n| (n.label.as_str(), n.shape.as_deref()))
        .collect();

    assert_eq!(
        rows,
        vec![
            ("program", Some("box")),
            ("Namespace App", Some("house")),
            ("Class Foo", Some("invhouse")),
            ("Method bar()", Some("folder")),
            ("addition", Some("box")),
            ("Integer 1", Some("circle")),
            ("Integer 2", Some("circle")),
        ]
    );
}

#[test]
fn test_scenario_names_consumed() {
    let mut tree = scenario_tree();
    let before = tree.node_count();
    decorate::<PhpGrammar>(&mut tree);

    // Three names consumed, one wrapper collapsed.
    assert_eq!(tree.node_count(), before - 4);
    let document = GraphDocument::from_tree(&tree);
    assert!(document.nodes.iter().all(|n| n.label != "name"));
    assert!(!document.nodes.iter().any(|n| ["App", "Foo", "bar"].contains(&n.label.as_str())));
}

#[test]
fn test_scenario_edges_follow_tree() {
    let mut tree = scenario_tree();
    decorate::<PhpGrammar>(&mut tree);
    let document = GraphDocument::from_tree(&tree);

    let edges: Vec<(usize, usize)> = document.edges.iter().map(|e| (e.parent, e.child)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (4, 6)]);
}

#[test]
fn test_scenario_export_is_byte_identical() {
    let render = || {
        let mut tree = scenario_tree();
        decorate::<PhpGrammar>(&mut tree);
        to_dot(&GraphDocument::from_tree(&tree))
    };
    assert_eq!(render(), render());
}
