//! Concrete importer: one tree node per named Tree-sitter node

use super::{named_children, node_text, parse_php, ParseError, SyntaxImporter};
use crate::grammar::cst::CstKind;
use crate::tree::{attr, AstTree, NodeId, SourceFields, SourceNode};
use tree_sitter::Node as TsNode;

/// Importer for the `cst` grammar
#[derive(Debug, Default)]
pub struct CstImporter;

impl CstImporter {
    pub fn new() -> Self {
        Self
    }
}

impl SyntaxImporter for CstImporter {
    type Kind = CstKind;

    fn grammar_name(&self) -> &str {
        "cst"
    }

    fn import_source(&self, source: &str) -> Result<AstTree<CstKind>, ParseError> {
        let parsed = parse_php(source)?;
        let root_node = parsed.root_node();

        let mut tree = AstTree::new(payload(&root_node, source));
        let root = tree.root();
        tree.set_attribute(root, attr::KIND, root_node.kind());

        // Explicit stack: concrete trees of large files get deep.
        let mut stack: Vec<(TsNode, NodeId)> = named_children(&root_node)
            .into_iter()
            .rev()
            .map(|child| (child, root))
            .collect();

        while let Some((node, parent)) = stack.pop() {
            let id = tree.add_child(parent, payload(&node, source));
            tree.set_attribute(id, attr::KIND, node.kind());
            for child in named_children(&node).into_iter().rev() {
                stack.push((child, id));
            }
        }

        Ok(tree)
    }
}

fn payload(node: &TsNode, source: &str) -> SourceNode<CstKind> {
    let name = node.child_by_field_name("name");
    let fields = SourceFields {
        has_name: name.is_some(),
        name: name.map(|n| node_text(&n, source).to_string()),
        value: Some(node_text(node, source).to_string()),
        ..SourceFields::default()
    };
    SourceNode::with_fields(CstKind::from_parser_kind(node.kind()), fields)
}
