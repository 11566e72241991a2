//! Document source backends for the batch-assembly pipeline
//!
//! Two interchangeable [`DocumentSource`](textbatch_core::DocumentSource)
//! backends feed the same encoding core: a filesystem corpus of
//! `{id}.txt` files with sidecar label annotations, and a document-store
//! collection resolved through a find-by-id-set query with explicit
//! request-order reconciliation.

#![warn(missing_docs)]

pub mod annotations;
pub mod collection;
pub mod error;
pub mod fs;
pub mod tokenize;

// Re-export key types for convenience
pub use annotations::{LabelLookup, SidecarLabels};
pub use collection::{CollectionSource, DocumentCollection, InMemoryCollection, StoredDocument};
pub use error::{Error, Result};
pub use fs::FsCorpusSource;
pub use tokenize::{Tokenizer, WordTokenizer};
