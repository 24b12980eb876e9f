//! Removal of node kinds whose information now lives in an ancestor label

use super::Stage;
use crate::tree::{AstTree, SyntaxKind};

/// Filter stage removing every node whose kind `is_obsolete` accepts
///
/// Runs after labeling, when the matched nodes are expected to be leaves.
/// Any subtree still hanging below a matched node goes with it.
pub fn filter_stage<K: SyntaxKind + Send + Sync + 'static>(
    is_obsolete: fn(K) -> bool,
) -> Stage<K> {
    Stage::filter("filter-obsolete", move |tree, id| {
        tree.kind(id).is_some_and(is_obsolete)
    })
}

/// Remove every remaining node whose kind is in `kinds`
pub fn remove_kinds<K: SyntaxKind + Send + Sync + 'static>(tree: &mut AstTree<K>, kinds: &[K]) {
    let kinds = kinds.to_vec();
    Stage::filter("remove-kinds", move |tree: &AstTree<K>, id| {
        tree.kind(id).is_some_and(|k| kinds.contains(&k))
    })
    .run(tree);
}
