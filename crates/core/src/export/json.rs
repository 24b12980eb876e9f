//! JSON rendering of a graph document

use super::GraphDocument;

/// Render `document` as pretty-printed JSON
pub fn to_json(document: &GraphDocument) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

/// Read a document back, e.g. for tooling that post-processes exports
pub fn from_json(json: &str) -> Result<GraphDocument, serde_json::Error> {
    serde_json::from_str(json)
}
