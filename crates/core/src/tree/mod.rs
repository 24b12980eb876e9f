//! Attributed syntax tree stored in an index arena
//!
//! Nodes live in a flat `Vec` and refer to each other by [`NodeId`]. The
//! pipeline never creates semantic nodes; it only rewrites attributes,
//! unlinks children, or splices a wrapper's only child into its place.
//! Unlinked nodes stay in the arena but are no longer reachable from the
//! root, so every traversal starts from [`AstTree::root`].

pub mod source;

pub use source::{SourceFields, SourceNode, SyntaxKind};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Well-known attribute keys
pub mod attr {
    /// Human-readable text synthesized for the node
    pub const LABEL: &str = "label";
    /// Visual category of the node
    pub const SHAPE: &str = "shape";
    /// Kind name recorded at import time
    pub const KIND: &str = "kind";
}

/// Stable index of a node inside an [`AstTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node of the attributed tree
#[derive(Debug, Clone)]
pub struct AstNode<K> {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    source: Option<SourceNode<K>>,
}

impl<K> AstNode<K> {
    fn new(source: SourceNode<K>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            source: Some(source),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn source(&self) -> Option<&SourceNode<K>> {
        self.source.as_ref()
    }
}

/// Rooted, ordered tree of attributed nodes
#[derive(Debug, Clone)]
pub struct AstTree<K> {
    nodes: Vec<AstNode<K>>,
    root: NodeId,
}

impl<K: SyntaxKind> AstTree<K> {
    /// Create a tree holding a single root node
    pub fn new(root: SourceNode<K>) -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        tree.root = tree.alloc(root);
        tree
    }

    fn alloc(&mut self, source: SourceNode<K>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = AstNode::new(source);
        node.attributes
            .insert(attr::KIND.to_string(), node_kind_name(&node).to_string());
        self.nodes.push(node);
        id
    }

    /// Append a new node as the last child of `parent`
    pub fn add_child(&mut self, parent: NodeId, source: SourceNode<K>) -> NodeId {
        let child = self.alloc(source);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        child
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &AstNode<K> {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.nodes[id.0].children.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn source(&self, id: NodeId) -> Option<&SourceNode<K>> {
        self.nodes[id.0].source.as_ref()
    }

    pub fn kind(&self, id: NodeId) -> Option<K> {
        self.source(id).map(|s| s.kind)
    }

    pub fn fields(&self, id: NodeId) -> Option<&SourceFields> {
        self.source(id).map(|s| &s.fields)
    }

    /// Drop the source payload; the node keeps its attributes and children
    pub fn clear_source(&mut self, id: NodeId) {
        self.nodes[id.0].source = None;
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(key).map(String::as_str)
    }

    pub fn set_attribute(&mut self, id: NodeId, key: impl Into<String>, value: impl Into<String>) {
        self.nodes[id.0]
            .attributes
            .insert(key.into(), value.into());
    }

    pub fn label(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, attr::LABEL)
    }

    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        self.set_attribute(id, attr::LABEL, label);
    }

    pub fn shape(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, attr::SHAPE)
    }

    /// The label, or the recorded kind name for nodes no rule labeled
    pub fn display_label(&self, id: NodeId) -> String {
        self.label(id)
            .or_else(|| self.attribute(id, attr::KIND))
            .unwrap_or_default()
            .to_string()
    }

    /// Child at `index`, panicking when the positional contract is broken
    pub fn child(&self, id: NodeId, index: usize) -> NodeId {
        match self.nodes[id.0].children.get(index) {
            Some(child) => *child,
            None => panic!(
                "{:?} node {} has no child at position {} ({} children)",
                self.kind(id),
                id,
                index,
                self.degree(id)
            ),
        }
    }

    /// Unlink the children at the given positions of `parent`
    ///
    /// Positions refer to the child sequence before any of them is removed.
    pub fn remove_children(&mut self, parent: NodeId, positions: &[usize]) {
        let mut positions = positions.to_vec();
        positions.sort_unstable();
        positions.dedup();

        for &position in positions.iter().rev() {
            let child = self.child(parent, position);
            self.nodes[parent.0].children.remove(position);
            self.nodes[child.0].parent = None;
        }
    }

    /// Unlink `id` from its parent, discarding its subtree
    pub fn remove(&mut self, id: NodeId) {
        let parent = match self.nodes[id.0].parent.take() {
            Some(parent) => parent,
            None => panic!("cannot remove the root node {}", id),
        };
        self.nodes[parent.0].children.retain(|c| *c != id);
    }

    /// Replace `id` with its only child, at the same position in the parent
    pub fn collapse(&mut self, id: NodeId) {
        let degree = self.degree(id);
        assert!(
            degree == 1,
            "cannot collapse {:?} node {}: expected exactly one child, found {}",
            self.kind(id),
            id,
            degree
        );

        let child = self.nodes[id.0].children[0];
        self.nodes[id.0].children.clear();

        match self.nodes[id.0].parent.take() {
            Some(parent) => {
                let siblings = &mut self.nodes[parent.0].children;
                if let Some(slot) = siblings.iter_mut().find(|c| **c == id) {
                    *slot = child;
                }
                self.nodes[child.0].parent = Some(parent);
            }
            None => {
                self.nodes[child.0].parent = None;
                self.root = child;
            }
        }
    }

    /// Whether `id` is still reachable from the root
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.nodes[current.0].parent {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Reachable nodes, every node before its descendants, siblings in order
    pub fn pre_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }

        order
    }

    /// Reachable nodes, every node after all of its descendants
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![(self.root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push((*child, false));
            }
        }

        order
    }

    /// Number of nodes reachable from the root
    pub fn node_count(&self) -> usize {
        self.pre_order().len()
    }
}

fn node_kind_name<K: SyntaxKind>(node: &AstNode<K>) -> &'static str {
    node.source.as_ref().map(|s| s.kind.name()).unwrap_or_default()
}
