//! Kind dispatch tables, one per supported source grammar
//!
//! A [`Grammar`] answers four questions about a syntax kind: is it a
//! wrapper to collapse, what label does it get, what shape is it drawn
//! with, and is it obsolete once labeling is done. The decorator turns
//! these answers into modifier stages.

pub mod cst;
pub mod php;

pub use cst::{CstGrammar, CstKind};
pub use php::{PhpGrammar, PhpKind};

use crate::tree::{AstTree, NodeId, SyntaxKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Visual category of a graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Generic rectangle, used whenever no rule applies
    #[default]
    Box,
    /// Scope-defining declarations
    House,
    /// Type declarations
    InvHouse,
    /// Callable members
    Folder,
    /// Atomic literal and constant values
    Circle,
}

impl Shape {
    /// Graphviz shape name
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Box => "box",
            Shape::House => "house",
            Shape::InvHouse => "invhouse",
            Shape::Folder => "folder",
            Shape::Circle => "circle",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dispatch table for one source grammar
pub trait Grammar: 'static {
    type Kind: SyntaxKind + Send + Sync + 'static;

    /// Name used in configuration and on the command line
    const NAME: &'static str;

    /// Scaffolding kinds replaced by their only child before labeling
    fn is_wrapper(kind: Self::Kind) -> bool;

    /// Synthesize the label of `id`, consuming the children it folds in
    fn apply_label(tree: &mut AstTree<Self::Kind>, id: NodeId);

    fn shape(kind: Self::Kind) -> Shape;

    /// Kinds removed after labeling
    fn is_obsolete(kind: Self::Kind) -> bool;

    /// Whether the source payload is dropped as the last step
    fn discards_payload() -> bool {
        false
    }
}

/// Label builder for one node
///
/// Reads child labels by their position in the child sequence as it was
/// when the rule started, and unlinks every child it `take`s once the
/// label is stored.
pub struct Fold<'t, K: SyntaxKind> {
    tree: &'t mut AstTree<K>,
    id: NodeId,
    consumed: Vec<usize>,
}

impl<'t, K: SyntaxKind> Fold<'t, K> {
    pub fn new(tree: &'t mut AstTree<K>, id: NodeId) -> Self {
        Self {
            tree,
            id,
            consumed: Vec::new(),
        }
    }

    pub fn degree(&self) -> usize {
        self.tree.degree(self.id)
    }

    /// Label of the child at `index`, which stays in the tree
    pub fn peek(&self, index: usize) -> String {
        self.tree.display_label(self.tree.child(self.id, index))
    }

    /// Label of the grandchild at `index` below the child at `child`
    pub fn peek_nested(&self, child: usize, index: usize) -> String {
        let child = self.tree.child(self.id, child);
        self.tree.display_label(self.tree.child(child, index))
    }

    /// Label of the child at `index`, which is consumed
    pub fn take(&mut self, index: usize) -> String {
        let label = self.peek(index);
        self.consumed.push(index);
        label
    }

    /// Store `label` (if any) and unlink the consumed children
    pub fn finish(self, label: Option<String>) {
        if let Some(label) = label {
            self.tree.set_label(self.id, label);
        }
        self.tree.remove_children(self.id, &self.consumed);
    }
}
