//! Document identity and per-document records

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque document identifier: a filename stem or a store key.
///
/// Unique within a population and immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A document resolved to the form the encoders consume.
///
/// Produced on demand by a [`DocumentSource`](crate::source::DocumentSource)
/// per batch; the core never caches these.
#[derive(Debug, Clone)]
pub struct DocumentRecord {
    /// Identifier the record was fetched under
    pub id: DocumentId,

    /// Ordered word tokens of the document body
    pub tokens: Vec<String>,

    /// Raw label set attached to the document, before vocabulary filtering
    pub raw_labels: HashSet<String>,
}
