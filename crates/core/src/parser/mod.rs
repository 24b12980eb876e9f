//! Importers turning PHP source into attributed trees
//!
//! Both importers parse with Tree-sitter. The `ast` importer lowers the
//! concrete tree into abstract [`PhpKind`] nodes with a fixed child order
//! per kind; the `cst` importer keeps every named parser node as is.

pub mod cst;
pub mod php;

pub use cst::CstImporter;
pub use php::PhpImporter;

use crate::tree::{AstTree, SyntaxKind};
use thiserror::Error;
use tree_sitter::{Parser, Tree};

/// Error types for import operations
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse file: {0}")]
    ParseFailed(String),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

/// Trait for importers producing a tree for one grammar
pub trait SyntaxImporter {
    type Kind: SyntaxKind;

    /// Get the name of the grammar this importer feeds
    fn grammar_name(&self) -> &str;

    /// Import source code into a tree
    fn import_source(&self, source: &str) -> Result<AstTree<Self::Kind>, ParseError>;
}

/// Parse PHP source, accepting inline HTML around `<?php` blocks
pub(crate) fn parse_php(source: &str) -> Result<Tree, ParseError> {
    let language: tree_sitter::Language = tree_sitter_php::LANGUAGE_PHP.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| ParseError::TreeSitter(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| ParseError::ParseFailed("Failed to parse PHP source".to_string()))?;

    if tree.root_node().has_error() {
        tracing::warn!("source contains syntax errors; importing the recovered tree");
    }

    Ok(tree)
}

fn node_text<'s>(node: &tree_sitter::Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

fn named_children<'t>(node: &tree_sitter::Node<'t>) -> Vec<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    children
}

fn find_child_by_kind<'t>(
    node: &tree_sitter::Node<'t>,
    kinds: &[&str],
) -> Option<tree_sitter::Node<'t>> {
    let mut cursor = node.walk();
    let result = node.children(&mut cursor).find(|c| kinds.contains(&c.kind()));
    result
}
