//! Filesystem corpus backend

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use textbatch_core::{DocumentId, DocumentRecord, DocumentSource};

use crate::annotations::LabelLookup;
use crate::error::Result;
use crate::tokenize::Tokenizer;

/// Document source over a directory of `{id}.txt` files.
///
/// Identifiers are filename stems; labels come from a [`LabelLookup`]
/// keyed by the same stem and directory.
pub struct FsCorpusSource {
    /// Corpus directory
    directory: PathBuf,

    /// Body tokenization
    tokenizer: Arc<dyn Tokenizer>,

    /// Annotation resolution
    labels: Arc<dyn LabelLookup>,
}

impl FsCorpusSource {
    /// Create a source rooted at `directory`.
    pub fn new(
        directory: impl Into<PathBuf>,
        tokenizer: Arc<dyn Tokenizer>,
        labels: Arc<dyn LabelLookup>,
    ) -> Self {
        Self {
            directory: directory.into(),
            tokenizer,
            labels,
        }
    }

    /// Corpus directory this source reads from
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Discover the population: the stem of every `*.txt` file, sorted so
    /// cursor cycles are deterministic across runs.
    pub fn discover_population(&self) -> Result<Vec<DocumentId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.directory)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                ids.push(DocumentId::new(stem));
            }
        }
        ids.sort();

        debug!(
            directory = %self.directory.display(),
            documents = ids.len(),
            "discovered corpus population"
        );
        Ok(ids)
    }
}

impl DocumentSource for FsCorpusSource {
    fn fetch(&self, id: &DocumentId) -> textbatch_core::Result<DocumentRecord> {
        let path = self.directory.join(format!("{}.txt", id.as_str()));
        let text = fs::read_to_string(&path).map_err(|err| {
            textbatch_core::Error::DocumentFetch {
                id: id.clone(),
                reason: format!("{}: {err}", path.display()),
            }
        })?;

        let raw_labels = self.labels.labels_for(id).map_err(|err| {
            textbatch_core::Error::DocumentFetch {
                id: id.clone(),
                reason: err.to_string(),
            }
        })?;

        Ok(DocumentRecord {
            id: id.clone(),
            tokens: self.tokenizer.tokenize(&text),
            raw_labels,
        })
    }
}
