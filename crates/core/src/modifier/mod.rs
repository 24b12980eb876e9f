//! Tree-wide modifier stages and the pipeline that runs them
//!
//! A stage is either an `Apply` (mutate each node in post-order) or a
//! `Filter` (unlink each node matching a predicate). Stages run one after
//! the other over the same tree; the order is part of the decoration
//! contract, since label rules read labels computed on children.

pub mod collapse;
pub mod filter;

pub use collapse::collapse_stage;
pub use filter::{filter_stage, remove_kinds};

use crate::tree::{AstTree, NodeId, SyntaxKind};

type ApplyFn<K> = Box<dyn Fn(&mut AstTree<K>, NodeId) + Send + Sync>;
type PredicateFn<K> = Box<dyn Fn(&AstTree<K>, NodeId) -> bool + Send + Sync>;

/// One tree-wide operation
pub enum Stage<K> {
    /// Visit every reachable node, descendants before ancestors
    ///
    /// The callback may rewrite the node's attributes and unlink the node's
    /// own children. Collapsing the node into its parent is also allowed,
    /// because the node's subtree has been fully visited by then.
    Apply { name: &'static str, apply: ApplyFn<K> },

    /// Unlink every non-root node the predicate accepts, with its subtree
    Filter {
        name: &'static str,
        predicate: PredicateFn<K>,
    },
}

impl<K: SyntaxKind> Stage<K> {
    pub fn apply<F>(name: &'static str, apply: F) -> Self
    where
        F: Fn(&mut AstTree<K>, NodeId) + Send + Sync + 'static,
    {
        Stage::Apply {
            name,
            apply: Box::new(apply),
        }
    }

    pub fn filter<F>(name: &'static str, predicate: F) -> Self
    where
        F: Fn(&AstTree<K>, NodeId) -> bool + Send + Sync + 'static,
    {
        Stage::Filter {
            name,
            predicate: Box::new(predicate),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Apply { name, .. } | Stage::Filter { name, .. } => *name,
        }
    }

    /// Run this stage over `tree`
    pub fn run(&self, tree: &mut AstTree<K>) {
        // Snapshot first: stages unlink nodes while we iterate.
        let order = tree.post_order();

        match self {
            Stage::Apply { apply, .. } => {
                for id in order {
                    if tree.is_attached(id) {
                        apply(tree, id);
                    }
                }
            }
            Stage::Filter { predicate, .. } => {
                for id in order {
                    if id != tree.root() && tree.is_attached(id) && predicate(tree, id) {
                        tree.remove(id);
                    }
                }
            }
        }
    }
}

/// An ordered list of stages
pub struct Pipeline<K> {
    stages: Vec<Stage<K>>,
}

impl<K: SyntaxKind> Pipeline<K> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn with_stage(mut self, stage: Stage<K>) -> Self {
        self.stages.push(stage);
        self
    }

    pub fn push(&mut self, stage: Stage<K>) {
        self.stages.push(stage);
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(Stage::name).collect()
    }

    /// Run every stage in order over `tree`
    pub fn run(&self, tree: &mut AstTree<K>) {
        for stage in &self.stages {
            stage.run(tree);
            tracing::debug!(
                stage = stage.name(),
                nodes = tree.node_count(),
                "modifier stage finished"
            );
        }
    }
}

impl<K: SyntaxKind> Default for Pipeline<K> {
    fn default() -> Self {
        Self::new()
    }
}
