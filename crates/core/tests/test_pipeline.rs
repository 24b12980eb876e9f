//! Tests for modifier stages and pipeline ordering

use astgraph_core::export::dot::to_dot;
use astgraph_core::grammar::php::{BinaryOperator, PhpKind};
use astgraph_core::modifier::{filter_stage, remove_kinds};
use astgraph_core::{
    decorate, AstTree, GraphDocument, NodeId, PhpGrammar, Pipeline, SourceNode, Stage, SyntaxKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Join,
    Sentinel,
    Unknown,
}

impl SyntaxKind for Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Join => "join",
            Kind::Sentinel => "sentinel",
            Kind::Unknown => "unknown",
        }
    }
}

/// Join(Join(S0, S1), S2): every Join label concatenates its children
fn sentinel_tree() -> AstTree<Kind> {
    let mut tree = AstTree::new(SourceNode::new(Kind::Join));
    let root = tree.root();
    let inner = tree.add_child(root, SourceNode::new(Kind::Join));
    tree.add_child(inner, SourceNode::named(Kind::Sentinel, "s0"));
    tree.add_child(inner, SourceNode::named(Kind::Sentinel, "s1"));
    tree.add_child(root, SourceNode::named(Kind::Sentinel, "s2"));
    tree
}

fn join_labels() -> Stage<Kind> {
    Stage::apply("join", |tree: &mut AstTree<Kind>, id: NodeId| {
        let label = match tree.kind(id) {
            Some(Kind::Sentinel) => tree.fields(id).map(|f| f.name_or_empty().to_uppercase()),
            Some(Kind::Join) => Some(
                tree.children(id)
                    .iter()
                    .map(|c| tree.display_label(*c))
                    .collect::<Vec<_>>()
                    .join("+"),
            ),
            _ => None,
        };
        if let Some(label) = label {
            tree.set_label(id, label);
        }
    })
}

#[test]
fn test_apply_runs_children_before_parents() {
    let mut tree = sentinel_tree();
    Pipeline::new().with_stage(join_labels()).run(&mut tree);

    let root = tree.root();
    assert_eq!(tree.label(root), Some("S0+S1+S2"));
    let inner = tree.child(root, 0);
    assert_eq!(tree.label(inner), Some("S0+S1"));
}

#[test]
fn test_stages_run_in_order() {
    let pipeline = Pipeline::new()
        .with_stage(join_labels())
        .with_stage(Stage::apply("shout", |tree: &mut AstTree<Kind>, id: NodeId| {
            let label = format!("{}!", tree.display_label(id));
            tree.set_label(id, label);
        }));

    assert_eq!(pipeline.stage_names(), vec!["join", "shout"]);

    let mut tree = sentinel_tree();
    pipeline.run(&mut tree);
    let root = tree.root();
    assert_eq!(tree.label(root), Some("S0+S1+S2!"));
    assert_eq!(tree.label(tree.child(root, 1)), Some("S2!"));
}

#[test]
fn test_filter_removes_leaf_without_dangling_edges() {
    let mut tree = AstTree::new(SourceNode::new(Kind::Join));
    let root = tree.root();
    tree.add_child(root, SourceNode::named(Kind::Sentinel, "keep"));
    tree.add_child(root, SourceNode::new(Kind::Unknown));

    Pipeline::new()
        .with_stage(filter_stage(|k| k == Kind::Unknown))
        .run(&mut tree);

    let document = GraphDocument::from_tree(&tree);
    assert_eq!(document.node_count(), 2);
    assert_eq!(document.edge_count(), 1);
    assert!(document.nodes.iter().all(|n| n.label != "unknown"));
    assert!(document.edges.iter().all(|e| e.child < document.node_count()));
}

#[test]
fn test_filter_never_removes_root() {
    let mut tree = AstTree::new(SourceNode::new(Kind::Unknown));
    remove_kinds(&mut tree, &[Kind::Unknown]);
    assert_eq!(tree.node_count(), 1);
}

#[test]
fn test_remove_kinds_takes_whole_subtree() {
    let mut tree = sentinel_tree();
    let root = tree.root();
    let inner = tree.child(root, 0);
    tree.add_child(inner, SourceNode::new(Kind::Unknown));

    remove_kinds(&mut tree, &[Kind::Unknown, Kind::Sentinel]);

    assert_eq!(tree.pre_order(), vec![root, inner]);
}

#[test]
fn test_unknown_kind_passes_through_decoration() {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let other = tree.add_child(root, SourceNode::new(PhpKind::Other));
    tree.add_child(other, SourceNode::valued(PhpKind::Integer, "7"));

    decorate::<PhpGrammar>(&mut tree);

    assert_eq!(tree.label(other), None);
    assert_eq!(tree.shape(other), Some("box"));
    assert_eq!(tree.display_label(other), "other");
    assert_eq!(tree.degree(other), 1);
}

fn arithmetic_tree() -> AstTree<PhpKind> {
    let mut tree = AstTree::new(SourceNode::new(PhpKind::Program));
    let root = tree.root();
    let statement = tree.add_child(root, SourceNode::new(PhpKind::ExpressionStatement));
    let plus = tree.add_child(statement, SourceNode::new(PhpKind::BinaryOp(BinaryOperator::Plus)));
    tree.add_child(plus, SourceNode::valued(PhpKind::Integer, "1"));
    tree.add_child(plus, SourceNode::valued(PhpKind::Integer, "2"));
    tree
}

#[test]
fn test_decoration_is_deterministic() {
    let mut first = arithmetic_tree();
    let mut second = arithmetic_tree();
    decorate::<PhpGrammar>(&mut first);
    decorate::<PhpGrammar>(&mut second);

    let first_dot = to_dot(&GraphDocument::from_tree(&first));
    let second_dot = to_dot(&GraphDocument::from_tree(&second));
    assert_eq!(first_dot, second_dot);
}

#[test]
fn test_operator_keeps_operands() {
    let mut tree = arithmetic_tree();
    decorate::<PhpGrammar>(&mut tree);

    let root = tree.root();
    let plus = tree.child(root, 0);
    assert_eq!(tree.label(plus), Some("addition"));
    let operands: Vec<String> = tree
        .children(plus)
        .iter()
        .map(|c| tree.display_label(*c))
        .collect();
    assert_eq!(operands, vec!["Integer 1", "Integer 2"]);
}

#[test]
fn test_decorate_pipeline_stage_order() {
    let names = astgraph_core::decorate::pipeline::<PhpGrammar>().stage_names();
    assert_eq!(names, vec!["collapse-wrappers", "label", "shape", "filter-obsolete"]);

    let names = astgraph_core::decorate::pipeline::<astgraph_core::CstGrammar>().stage_names();
    assert_eq!(names.last(), Some(&"discard-payload"));
}
