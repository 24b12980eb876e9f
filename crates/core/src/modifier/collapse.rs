//! Wrapper collapsing: splice scaffolding nodes out of the tree

use super::Stage;
use crate::tree::{AstTree, NodeId, SyntaxKind};

/// Replace `id` with its single child if `is_wrapper` accepts its kind
///
/// Returns whether the node was collapsed. A wrapper that does not have
/// exactly one child means the importer broke its contract, and panics.
pub fn collapse_wrapper<K: SyntaxKind>(
    tree: &mut AstTree<K>,
    id: NodeId,
    is_wrapper: fn(K) -> bool,
) -> bool {
    match tree.kind(id) {
        Some(kind) if is_wrapper(kind) => {
            tree.collapse(id);
            true
        }
        _ => false,
    }
}

/// Apply stage collapsing every wrapper node
pub fn collapse_stage<K: SyntaxKind + Send + Sync + 'static>(
    is_wrapper: fn(K) -> bool,
) -> Stage<K> {
    Stage::apply("collapse-wrappers", move |tree, id| {
        collapse_wrapper(tree, id, is_wrapper);
    })
}
