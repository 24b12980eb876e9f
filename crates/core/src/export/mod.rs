//! Graph export of a decorated tree
//!
//! A decorated tree is flattened into a [`GraphDocument`]: one record per
//! reachable node (numbered in pre-order from 0) and one edge per
//! parent/child link. Renderers turn the document into Graphviz DOT,
//! JSON, or a rendered image.

pub mod dot;
pub mod image;
pub mod json;

pub use image::{ImageRenderer, RenderError, SUPPORTED_IMAGE_FORMATS};

use crate::tree::{AstTree, NodeId, SyntaxKind};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Output representation of a decorated tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Dot,
    Json,
    Image,
}

impl ExportFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "dot" => Some(ExportFormat::Dot),
            "json" => Some(ExportFormat::Json),
            "image" => Some(ExportFormat::Image),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Dot => "dot",
            ExportFormat::Json => "json",
            ExportFormat::Image => "image",
        };
        f.write_str(name)
    }
}

/// A node as drawn in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: usize,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

/// Parent to child link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub parent: usize,
    pub child: usize,
}

/// Flattened, renderer-independent view of a tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Flatten the reachable part of `tree`
    ///
    /// Nodes without a label fall back to their recorded kind name.
    pub fn from_tree<K: SyntaxKind>(tree: &AstTree<K>) -> Self {
        let order = tree.pre_order();
        let ids: HashMap<NodeId, usize> = order
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();

        let nodes = order
            .iter()
            .enumerate()
            .map(|(position, id)| NodeRecord {
                id: position,
                label: tree.display_label(*id),
                shape: tree.shape(*id).map(str::to_string),
            })
            .collect();

        let edges = order
            .iter()
            .flat_map(|id| {
                let parent = ids[id];
                tree.children(*id).iter().map(move |child| (parent, *child))
            })
            .map(|(parent, child)| EdgeRecord {
                parent,
                child: ids[&child],
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build a petgraph graph, node weights being the node records
    pub fn to_petgraph(&self) -> DiGraph<NodeRecord, ()> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let indices: Vec<NodeIndex> = self
            .nodes
            .iter()
            .map(|node| graph.add_node(node.clone()))
            .collect();

        for edge in &self.edges {
            graph.add_edge(indices[edge.parent], indices[edge.child], ());
        }

        graph
    }
}
