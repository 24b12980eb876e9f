//! Source payload carried by every imported tree node

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of syntax node kinds for one grammar
///
/// Every pipeline stage dispatches on the kind with an exhaustive `match`,
/// so adding a variant forces each stage to decide what to do with it.
pub trait SyntaxKind: Copy + Eq + fmt::Debug {
    /// Short display name, used as the fallback label of unlabeled nodes
    fn name(&self) -> &'static str;
}

/// Literal data lifted out of the concrete syntax by an importer
///
/// Flags record whether an optional sub-part was present in the source, so
/// label rules never have to guess roles from the children that remain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFields {
    /// Identifier text (declared name, type text, variable name without `$`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Literal text (number, string contents, directive value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Alias introduced with `as`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    #[serde(default)]
    pub has_name: bool,
    #[serde(default)]
    pub has_else: bool,
    #[serde(default)]
    pub has_finally: bool,
    #[serde(default)]
    pub has_key: bool,
    #[serde(default)]
    pub has_dim: bool,
    #[serde(default)]
    pub has_type: bool,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub has_return_type: bool,
    #[serde(default)]
    pub has_extends: bool,
    #[serde(default)]
    pub has_var: bool,
    #[serde(default)]
    pub variadic: bool,
    /// Passed or captured by reference (`&$x`)
    #[serde(default)]
    pub by_ref: bool,
}

impl SourceFields {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn valued(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// The opaque per-node payload: kind tag plus literal fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceNode<K> {
    pub kind: K,
    pub fields: SourceFields,
}

impl<K: SyntaxKind> SourceNode<K> {
    pub fn new(kind: K) -> Self {
        Self {
            kind,
            fields: SourceFields::default(),
        }
    }

    pub fn with_fields(kind: K, fields: SourceFields) -> Self {
        Self { kind, fields }
    }

    pub fn named(kind: K, name: impl Into<String>) -> Self {
        Self::with_fields(kind, SourceFields::named(name))
    }

    pub fn valued(kind: K, value: impl Into<String>) -> Self {
        Self::with_fields(kind, SourceFields::valued(value))
    }
}
