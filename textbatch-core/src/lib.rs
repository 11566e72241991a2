//! Core batch assembly for multi-label text classification training
//!
//! This crate turns raw documents into fixed-shape training tensors: a
//! thread-safe cyclic [`BatchCursor`] slices a document population into
//! batches, a [`FeatureEncoder`] maps token sequences onto embedding
//! matrices, and a [`LabelEncoder`] maps document tags onto multi-hot
//! target vectors. The [`MatrixBuilder`] orchestrates both over any
//! backend implementing [`DocumentSource`], and [`BatchStream`] exposes
//! the result as an unbounded sequence of mini-batches for incremental
//! training.

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod cursor;
pub mod document;
pub mod embedding;
pub mod error;
pub mod features;
pub mod labels;
pub mod pipeline;
pub mod source;
pub mod stream;

#[cfg(test)]
mod test_fixtures;

// Re-export key types for convenience
pub use batch::{MatrixBuilder, SampleBatch};
pub use config::{DeliveryMode, EncodingShape, PipelineConfig};
pub use cursor::BatchCursor;
pub use document::{DocumentId, DocumentRecord};
pub use embedding::{DenseEmbeddings, IdentityScaler, Scaler, StandardScaler, WordEmbeddings};
pub use error::{Error, Result};
pub use features::FeatureEncoder;
pub use labels::{LabelEncoder, LabelVocabulary};
pub use pipeline::{DataPipeline, TrainingSet};
pub use source::DocumentSource;
pub use stream::BatchStream;
