//! Label annotations for filesystem corpora

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use textbatch_core::DocumentId;

use crate::error::Result;

/// Resolves the raw label set attached to a document identifier.
///
/// Filtering against the training vocabulary happens downstream in the
/// label encoder; implementations return whatever the annotation carries.
pub trait LabelLookup: Send + Sync {
    /// Raw labels for `id`; an unannotated document resolves to an empty
    /// set, not an error
    fn labels_for(&self, id: &DocumentId) -> Result<HashSet<String>>;
}

/// Sidecar annotation files: `{id}.lab` next to the corpus documents, one
/// label per line.
#[derive(Debug, Clone)]
pub struct SidecarLabels {
    /// Directory the annotation files live in
    directory: PathBuf,
}

impl SidecarLabels {
    /// Look up `{id}.lab` files under `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl LabelLookup for SidecarLabels {
    fn labels_for(&self, id: &DocumentId) -> Result<HashSet<String>> {
        let path = self.directory.join(format!("{}.lab", id.as_str()));
        if !path.exists() {
            // Unannotated documents are valid; they encode as all-false rows.
            return Ok(HashSet::new());
        }

        let body = fs::read_to_string(path)?;
        Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_owned)
            .collect())
    }
}
