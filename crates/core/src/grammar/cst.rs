//! Dispatch table for concrete syntax trees
//!
//! The concrete grammar keeps every named parser node, so only a handful
//! of declaration kinds get a dedicated rule; everything else is drawn
//! under its parser kind name.

use super::{Fold, Grammar, Shape};
use crate::tree::{AstTree, NodeId, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CstKind {
    /// Child 0 is the namespace name when `has_name` is set
    NamespaceDefinition,
    NamespaceName,
    QualifiedName,
    BaseClause,
    /// `name` field text is carried in the payload
    ClassDeclaration,
    MethodDeclaration,
    NamespaceUseDeclaration,
    Other,
}

impl CstKind {
    pub fn from_parser_kind(kind: &str) -> Self {
        match kind {
            "namespace_definition" => CstKind::NamespaceDefinition,
            "namespace_name" => CstKind::NamespaceName,
            "qualified_name" => CstKind::QualifiedName,
            "base_clause" => CstKind::BaseClause,
            "class_declaration" => CstKind::ClassDeclaration,
            "method_declaration" => CstKind::MethodDeclaration,
            "namespace_use_declaration" => CstKind::NamespaceUseDeclaration,
            _ => CstKind::Other,
        }
    }
}

impl SyntaxKind for CstKind {
    fn name(&self) -> &'static str {
        match self {
            CstKind::NamespaceDefinition => "namespace_definition",
            CstKind::NamespaceName => "namespace_name",
            CstKind::QualifiedName => "qualified_name",
            CstKind::BaseClause => "base_clause",
            CstKind::ClassDeclaration => "class_declaration",
            CstKind::MethodDeclaration => "method_declaration",
            CstKind::NamespaceUseDeclaration => "namespace_use_declaration",
            CstKind::Other => "other",
        }
    }
}

/// The `cst` grammar
pub struct CstGrammar;

impl Grammar for CstGrammar {
    type Kind = CstKind;

    const NAME: &'static str = "cst";

    fn is_wrapper(_kind: CstKind) -> bool {
        false
    }

    fn apply_label(tree: &mut AstTree<CstKind>, id: NodeId) {
        let Some(source) = tree.source(id) else {
            return;
        };
        let kind = source.kind;
        let fields = source.fields.clone();

        let mut fold = Fold::new(tree, id);
        let label = match kind {
            CstKind::NamespaceName | CstKind::QualifiedName | CstKind::BaseClause => {
                Some(fields.value_or_empty().to_string())
            }
            CstKind::NamespaceDefinition => Some(if fields.has_name {
                format!("Namespace {}", fold.take(0))
            } else {
                "Namespace".to_string()
            }),
            CstKind::ClassDeclaration => Some(format!("Class {}", fields.name_or_empty())),
            CstKind::MethodDeclaration | CstKind::NamespaceUseDeclaration | CstKind::Other => None,
        };
        fold.finish(label);
    }

    fn shape(kind: CstKind) -> Shape {
        match kind {
            CstKind::NamespaceDefinition => Shape::House,
            CstKind::ClassDeclaration => Shape::InvHouse,
            CstKind::MethodDeclaration => Shape::Folder,
            _ => Shape::Box,
        }
    }

    fn is_obsolete(kind: CstKind) -> bool {
        kind == CstKind::NamespaceUseDeclaration
    }

    fn discards_payload() -> bool {
        true
    }
}
