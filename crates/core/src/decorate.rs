//! Decoration: the ordered modifier stages a grammar contributes

use crate::grammar::Grammar;
use crate::modifier::{collapse_stage, filter_stage, Pipeline, Stage};
use crate::tree::{attr, AstTree};

/// Build the decoration pipeline for grammar `G`
///
/// Wrappers are collapsed first, then labels are synthesized bottom-up,
/// shapes assigned, obsolete nodes filtered, and finally the source
/// payload is dropped when the grammar asks for it.
pub fn pipeline<G: Grammar>() -> Pipeline<G::Kind> {
    let mut pipeline = Pipeline::new()
        .with_stage(collapse_stage(G::is_wrapper))
        .with_stage(Stage::apply("label", G::apply_label))
        .with_stage(Stage::apply("shape", |tree, id| {
            if let Some(kind) = tree.kind(id) {
                tree.set_attribute(id, attr::SHAPE, G::shape(kind).as_str());
            }
        }))
        .with_stage(filter_stage(G::is_obsolete));

    if G::discards_payload() {
        pipeline.push(Stage::apply("discard-payload", |tree, id| {
            tree.clear_source(id)
        }));
    }

    pipeline
}

/// Decorate `tree` in place with grammar `G`
pub fn decorate<G: Grammar>(tree: &mut AstTree<G::Kind>) {
    tracing::debug!(grammar = G::NAME, nodes = tree.node_count(), "decorating tree");
    pipeline::<G>().run(tree);
}
