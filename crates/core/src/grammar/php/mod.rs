//! Dispatch table for abstract PHP trees

pub mod kind;
pub mod label;

pub use kind::{
    AssignOperator, BinaryOperator, CastType, IncDecOperator, IncludeKind, PhpKind, UnaryOperator,
};

use super::{Grammar, Shape};
use crate::tree::{AstTree, NodeId};

/// The `ast` grammar: abstract PHP kinds with the full label table
pub struct PhpGrammar;

impl Grammar for PhpGrammar {
    type Kind = PhpKind;

    const NAME: &'static str = "ast";

    fn is_wrapper(kind: PhpKind) -> bool {
        matches!(kind, PhpKind::ExpressionStatement | PhpKind::Parenthesized)
    }

    fn apply_label(tree: &mut AstTree<PhpKind>, id: NodeId) {
        label::apply_label(tree, id);
    }

    fn shape(kind: PhpKind) -> Shape {
        match kind {
            PhpKind::Namespace => Shape::House,
            PhpKind::Class | PhpKind::Interface | PhpKind::Trait | PhpKind::Enum => {
                Shape::InvHouse
            }
            PhpKind::ClassMethod | PhpKind::Function => Shape::Folder,
            PhpKind::ConstFetch | PhpKind::Integer | PhpKind::Float | PhpKind::MagicConst => {
                Shape::Circle
            }
            _ => Shape::Box,
        }
    }

    fn is_obsolete(kind: PhpKind) -> bool {
        matches!(kind, PhpKind::Use | PhpKind::Declare | PhpKind::Name)
    }
}
