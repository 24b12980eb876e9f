//! Tests for DOT, JSON and petgraph export

use astgraph_core::export::{dot, json, EdgeRecord, NodeRecord};
use astgraph_core::grammar::php::PhpKind;
use astgraph_core::{AstTree, GraphDocument, SourceNode};
use petgraph::visit::EdgeRef;

fn sample_document() -> GraphDocument {
    GraphDocument {
        nodes: vec![
            NodeRecord {
                id: 0,
                label: "Namespace App".to_string(),
                shape: Some("house".to_string()),
            },
            NodeRecord {
                id: 1,
                label: "say \"hi\"\nC:\\tmp".to_string(),
                shape: None,
            },
        ],
        edges: vec![EdgeRecord { parent: 0, child: 1 }],
    }
}

#[test]
fn test_dot_layout() {
    let text = dot::to_dot(&sample_document());

    assert!(text.starts_with("digraph ast {\n"));
    assert!(text.trim_end().ends_with('}'));
    assert!(text.contains("\tn0 [label=\"Namespace App\", shape=house];"));
    assert!(text.contains("\tn0 -> n1;"));

    let node_line = text.find("n1 [").unwrap();
    let edge_line = text.find("n0 -> n1").unwrap();
    assert!(node_line < edge_line, "nodes are written before edges");
}

#[test]
fn test_dot_escapes_labels_and_omits_missing_shape() {
    let text = dot::to_dot(&sample_document());
    assert!(text.contains(r#"n1 [label="say \"hi\"\nC:\\tmp"];"#));
}

#[test]
fn test_json_document() {
    let document = sample_document();
    let text = json::to_json(&document).unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["nodes"][0]["shape"], "house");
    assert!(value["nodes"][1].get("shape").is_none());
    assert_eq!(value["edges"][0]["parent"], 0);

    assert_eq!(json::from_json(&text).unwrap(), document);
}

#[test]
fn test_from_tree_numbers_nodes_in_pre_order() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let echo = tree.add_child(root, SourceNode::new(PhpKind::Echo));
    tree.add_child(echo, SourceNode::named(PhpKind::Variable, "a"));
    let ret = tree.add_child(root, SourceNode::new(PhpKind::Return));
    tree.set_label(ret, "Return");

    let document = GraphDocument::from_tree(&tree);
    let labels: Vec<&str> = document.nodes.iter().map(|n| n.label.as_str()).collect();

    // Undecorated nodes fall back to their kind name.
    assert_eq!(labels, vec!["program", "echo", "variable", "Return"]);
    assert!(document.nodes.iter().enumerate().all(|(i, n)| n.id == i));
    assert!(document.nodes.iter().all(|n| n.shape.is_none()));

    let edges: Vec<(usize, usize)> = document.edges.iter().map(|e| (e.parent, e.child)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2), (0, 3)]);
}

#[test]
fn test_to_petgraph() {
    let graph = sample_document().to_petgraph();

    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 1);

    let edge = graph.edge_references().next().unwrap();
    assert_eq!(graph[edge.source()].label, "Namespace App");
    assert_eq!(graph[edge.target()].id, 1);
}
