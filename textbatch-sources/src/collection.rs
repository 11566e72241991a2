//! Document-store backend

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use textbatch_core::{DocumentId, DocumentRecord, DocumentSource};

use crate::error::Result;
use crate::tokenize::Tokenizer;

/// A document as stored by the collection backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Store key for the document
    pub id: DocumentId,

    /// Full body text as stored
    pub full_text: String,

    /// Taxonomic classifier labels attached to the document
    #[serde(default)]
    pub taxonomic_labels: Vec<String>,
}

/// Find-by-id-set query capability over a document store.
///
/// Implementations may return results in any order and silently omit ids
/// with no stored document; [`CollectionSource`] reconciles the result
/// against the requested identifier list.
pub trait DocumentCollection: Send + Sync {
    /// Fetch the stored documents for `ids`
    fn find_by_ids(&self, ids: &[DocumentId]) -> Result<Vec<StoredDocument>>;
}

/// Map-backed collection for tests and small corpora.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollection {
    /// Stored documents keyed by id
    documents: HashMap<DocumentId, StoredDocument>,
}

impl InMemoryCollection {
    /// Build a collection from stored documents
    pub fn new(documents: impl IntoIterator<Item = StoredDocument>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|doc| (doc.id.clone(), doc))
                .collect(),
        }
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the collection holds no documents
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentCollection for InMemoryCollection {
    fn find_by_ids(&self, ids: &[DocumentId]) -> Result<Vec<StoredDocument>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.documents.get(id).cloned())
            .collect())
    }
}

/// Document source over a store collection.
///
/// `fetch_batch` issues one set query and re-indexes the results by id:
/// stores make no promise that result order matches the requested id
/// order, and tensor row `i` must correspond to id `i`. The reconciliation
/// is a correctness requirement, not an optimization.
pub struct CollectionSource<C> {
    /// Queried store
    collection: C,

    /// Full-text tokenization
    tokenizer: Arc<dyn Tokenizer>,
}

impl<C: DocumentCollection> CollectionSource<C> {
    /// Create a source over `collection`
    pub fn new(collection: C, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            collection,
            tokenizer,
        }
    }

    fn record_from(&self, stored: &StoredDocument) -> DocumentRecord {
        let raw_labels: HashSet<String> = stored.taxonomic_labels.iter().cloned().collect();
        DocumentRecord {
            id: stored.id.clone(),
            tokens: self.tokenizer.tokenize(&stored.full_text),
            raw_labels,
        }
    }
}

impl<C: DocumentCollection> DocumentSource for CollectionSource<C> {
    fn fetch(&self, id: &DocumentId) -> textbatch_core::Result<DocumentRecord> {
        self.fetch_batch(std::slice::from_ref(id))?
            .pop()
            .ok_or_else(|| textbatch_core::Error::DocumentFetch {
                id: id.clone(),
                reason: "no stored document for id".into(),
            })
    }

    fn fetch_batch(&self, ids: &[DocumentId]) -> textbatch_core::Result<Vec<DocumentRecord>> {
        let found = self
            .collection
            .find_by_ids(ids)
            .map_err(|err| textbatch_core::Error::Source(err.to_string()))?;

        let mut by_id: HashMap<&DocumentId, &StoredDocument> =
            found.iter().map(|doc| (&doc.id, doc)).collect();

        ids.iter()
            .map(|id| {
                by_id
                    .remove(id)
                    .map(|stored| self.record_from(stored))
                    .ok_or_else(|| textbatch_core::Error::DocumentFetch {
                        id: id.clone(),
                        reason: "no stored document for id".into(),
                    })
            })
            .collect()
    }
}
