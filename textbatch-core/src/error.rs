//! Error types for batch assembly

use std::io;
use thiserror::Error;

use crate::document::DocumentId;

/// Result type for batch-assembly operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for batch-assembly operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Construction-time parameters rejected
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A single document could not be resolved by its source
    #[error("Failed to fetch document `{id}`: {reason}")]
    DocumentFetch {
        /// Identifier that failed to resolve
        id: DocumentId,
        /// Backend-specific failure description
        reason: String,
    },

    /// A backend query failed before any document could be resolved
    #[error("Document source error: {0}")]
    Source(String),
}
