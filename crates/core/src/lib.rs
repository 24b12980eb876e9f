//! AstGraph Core - PHP syntax trees as decorated graphs
//!
//! This crate provides the engine behind the `astgraph` tool:
//! - PHP import via Tree-sitter, as an abstract or a concrete tree
//! - A modifier pipeline that collapses, labels, shapes and filters nodes
//! - Export to Graphviz DOT, JSON, petgraph, or rendered images

pub mod config;
pub mod decorate;
pub mod discovery;
pub mod export;
pub mod generate;
pub mod grammar;
pub mod modifier;
pub mod parser;
pub mod tree;

pub use config::AstGraphConfig;
pub use decorate::decorate;
pub use discovery::{discover_files, discover_php_sources};
pub use export::{ExportFormat, GraphDocument, ImageRenderer, RenderError};
pub use generate::{
    generate_file, generate_files_parallel, generate_source, GenerateError, GenerateOptions,
    GrammarChoice, Output,
};
pub use grammar::{cst::CstGrammar, php::PhpGrammar, Grammar, Shape};
pub use modifier::{Pipeline, Stage};
pub use parser::{CstImporter, ParseError, PhpImporter, SyntaxImporter};
pub use tree::{AstTree, NodeId, SourceFields, SourceNode, SyntaxKind};

/// AstGraph version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
