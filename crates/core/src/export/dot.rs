//! Graphviz DOT rendering

use super::{EdgeRecord, GraphDocument, NodeRecord};
use std::fmt::{self, Display};

/// Render `document` as a `digraph`
pub fn to_dot(document: &GraphDocument) -> String {
    DotGraph {
        name: "ast",
        document,
    }
    .to_string()
}

struct DotGraph<'a> {
    name: &'a str,
    document: &'a GraphDocument,
}

impl Display for DotGraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "digraph {} {{", self.name)?;
        for node in &self.document.nodes {
            writeln!(f, "\t{}", DotNode(node))?;
        }
        for edge in &self.document.edges {
            writeln!(f, "\t{}", DotEdge(edge))?;
        }
        writeln!(f, "}}")
    }
}

struct DotNode<'a>(&'a NodeRecord);

impl Display for DotNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let node = self.0;
        match node.shape {
            Some(ref shape) => write!(
                f,
                "n{} [label=\"{}\", shape={}];",
                node.id,
                escape(&node.label),
                shape
            ),
            None => write!(f, "n{} [label=\"{}\"];", node.id, escape(&node.label)),
        }
    }
}

struct DotEdge<'a>(&'a EdgeRecord);

impl Display for DotEdge<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "n{} -> n{};", self.0.parent, self.0.child)
    }
}

/// Escape a label for a double-quoted DOT string
pub fn escape(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}
