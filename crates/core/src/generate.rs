//! End-to-end generation: import, decorate, export
//!
//! Each source file runs through its own tree and pipeline, so files can
//! be processed in parallel without sharing any state.

use crate::decorate::decorate;
use crate::export::{dot, json, ExportFormat, GraphDocument, ImageRenderer, RenderError};
use crate::grammar::{cst::CstGrammar, php::PhpGrammar, Grammar};
use crate::parser::{CstImporter, ParseError, PhpImporter, SyntaxImporter};
use crate::tree::AstTree;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Which importer and dispatch table to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarChoice {
    /// Abstract PHP tree with the full label table
    #[default]
    Ast,
    /// Concrete parser tree
    Cst,
}

impl GrammarChoice {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            n if n == PhpGrammar::NAME => Some(GrammarChoice::Ast),
            n if n == CstGrammar::NAME => Some(GrammarChoice::Cst),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GrammarChoice::Ast => PhpGrammar::NAME,
            GrammarChoice::Cst => CstGrammar::NAME,
        }
    }
}

impl fmt::Display for GrammarChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub grammar: GrammarChoice,
    /// Run the decoration pipeline; when off the raw tree is exported
    pub decorate: bool,
    pub format: ExportFormat,
    /// Graphviz output format used when `format` is `Image`
    pub image_format: String,
    /// Graphviz program used when `format` is `Image`
    pub renderer: PathBuf,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            grammar: GrammarChoice::Ast,
            decorate: true,
            format: ExportFormat::Dot,
            image_format: "svg".to_string(),
            renderer: PathBuf::from("dot"),
        }
    }
}

/// Generated artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Text(String),
    Image(Vec<u8>),
}

impl Output {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Output::Text(text) => text.as_bytes(),
            Output::Image(bytes) => bytes,
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, Output::Image(_))
    }
}

/// Error types for generation
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Failed to serialize graph: {0}")]
    Json(#[from] serde_json::Error),
}

/// Import and optionally decorate `source`, returning the flattened graph
pub fn build_document(
    source: &str,
    options: &GenerateOptions,
) -> Result<GraphDocument, ParseError> {
    let decorated = options.decorate;
    match options.grammar {
        GrammarChoice::Ast => {
            import_and_decorate::<PhpGrammar, _>(&PhpImporter::new(), source, decorated)
        }
        GrammarChoice::Cst => {
            import_and_decorate::<CstGrammar, _>(&CstImporter::new(), source, decorated)
        }
    }
}

fn import_and_decorate<G, I>(
    importer: &I,
    source: &str,
    decorated: bool,
) -> Result<GraphDocument, ParseError>
where
    G: Grammar,
    I: SyntaxImporter<Kind = G::Kind>,
{
    let mut tree: AstTree<G::Kind> = importer.import_source(source)?;
    if decorated {
        decorate::<G>(&mut tree);
    }
    Ok(GraphDocument::from_tree(&tree))
}

/// Run the whole pipeline on PHP source text
pub fn generate_source(source: &str, options: &GenerateOptions) -> Result<Output, GenerateError> {
    let document = build_document(source, options)?;

    let output = match options.format {
        ExportFormat::Dot => Output::Text(dot::to_dot(&document)),
        ExportFormat::Json => Output::Text(json::to_json(&document)?),
        ExportFormat::Image => {
            let renderer = ImageRenderer::new(&options.renderer, &options.image_format)?;
            Output::Image(renderer.render(&dot::to_dot(&document))?)
        }
    };

    Ok(output)
}

/// Read `path` and run the whole pipeline on it
pub fn generate_file(path: &Path, options: &GenerateOptions) -> Result<Output, GenerateError> {
    tracing::debug!(file = %path.display(), grammar = %options.grammar, "generating graph");
    let source = std::fs::read_to_string(path).map_err(ParseError::from)?;
    generate_source(&source, options)
}

/// Generate every file in parallel, one independent pipeline per file
///
/// Results keep the order of `paths`.
pub fn generate_files_parallel(
    paths: &[PathBuf],
    options: &GenerateOptions,
) -> Vec<(PathBuf, Result<Output, GenerateError>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), generate_file(path, options)))
        .collect()
}

/// File extension matching an export format
pub fn output_extension(options: &GenerateOptions) -> &str {
    match options.format {
        ExportFormat::Dot => "dot",
        ExportFormat::Json => "json",
        ExportFormat::Image => &options.image_format,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_choice_names() {
        assert_eq!(GrammarChoice::from_name("AST"), Some(GrammarChoice::Ast));
        assert_eq!(GrammarChoice::from_name("cst"), Some(GrammarChoice::Cst));
        assert_eq!(GrammarChoice::from_name("nikic"), None);
        assert_eq!(GrammarChoice::Cst.to_string(), "cst");
    }

    #[test]
    fn test_output_extension() {
        let mut options = GenerateOptions::default();
        assert_eq!(output_extension(&options), "dot");
        options.format = ExportFormat::Image;
        options.image_format = "png".to_string();
        assert_eq!(output_extension(&options), "png");
    }
}
