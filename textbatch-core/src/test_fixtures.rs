//! Shared fixtures for the crate's unit tests

use std::collections::{HashMap, HashSet};

use crate::document::{DocumentId, DocumentRecord};
use crate::error::{Error, Result};
use crate::source::DocumentSource;

/// Identifier list from short names
pub(crate) fn ids(names: &[&str]) -> Vec<DocumentId> {
    names.iter().map(|name| DocumentId::new(*name)).collect()
}

/// Document record from short literals
pub(crate) fn record(id: &str, tokens: &[&str], labels: &[&str]) -> DocumentRecord {
    DocumentRecord {
        id: DocumentId::new(id),
        tokens: tokens.iter().map(|t| (*t).to_owned()).collect(),
        raw_labels: labels.iter().map(|l| (*l).to_owned()).collect::<HashSet<_>>(),
    }
}

/// Map-backed document source for builder and stream tests
pub(crate) struct MapSource {
    records: HashMap<DocumentId, DocumentRecord>,
}

impl MapSource {
    pub(crate) fn new(records: impl IntoIterator<Item = DocumentRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }
}

impl DocumentSource for MapSource {
    fn fetch(&self, id: &DocumentId) -> Result<DocumentRecord> {
        self.records
            .get(id)
            .cloned()
            .ok_or_else(|| Error::DocumentFetch {
                id: id.clone(),
                reason: "not part of the fixture".into(),
            })
    }
}
