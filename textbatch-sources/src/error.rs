//! Error types for document backends

use std::io;
use thiserror::Error;

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for backend operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during corpus scanning or file reads
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A collection query failed
    #[error("Collection query failed: {0}")]
    Query(String),

    /// Error bubbled up from the assembly core
    #[error(transparent)]
    Core(#[from] textbatch_core::Error),
}
