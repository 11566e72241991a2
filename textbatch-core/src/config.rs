//! Shape and delivery configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed tensor shape parameters, held constant for a whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingShape {
    /// Number of token rows in a document feature matrix
    pub sequence_length: usize,

    /// Width of a single word vector
    pub embedding_size: usize,
}

impl EncodingShape {
    /// Create a shape; both dimensions must be positive.
    pub fn new(sequence_length: usize, embedding_size: usize) -> Result<Self> {
        if sequence_length == 0 {
            return Err(Error::InvalidConfiguration(
                "sequence length must be positive".into(),
            ));
        }
        if embedding_size == 0 {
            return Err(Error::InvalidConfiguration(
                "embedding size must be positive".into(),
            ));
        }
        Ok(Self {
            sequence_length,
            embedding_size,
        })
    }
}

/// Delivery mode selected by the training caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// One build over the whole population, returned as matrices
    InMemory,

    /// An unbounded stream of mini-batches over a cyclic cursor
    Streaming,
}

/// Batch delivery configuration for one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Number of documents per mini-batch
    pub batch_size: usize,

    /// How many input slots of the downstream model receive the feature
    /// tensor
    pub input_replicas: usize,

    /// Whether to materialize matrices or stream mini-batches
    pub mode: DeliveryMode,
}

impl PipelineConfig {
    /// Create a configuration; batch size and replica count must be
    /// positive.
    pub fn new(batch_size: usize, input_replicas: usize, mode: DeliveryMode) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidConfiguration(
                "batch size must be positive".into(),
            ));
        }
        if input_replicas == 0 {
            return Err(Error::InvalidConfiguration(
                "input replica count must be positive".into(),
            ));
        }
        Ok(Self {
            batch_size,
            input_replicas,
            mode,
        })
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: 64,
            input_replicas: 1,
            mode: DeliveryMode::InMemory,
        }
    }
}
