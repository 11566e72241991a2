//! Token-sequence to feature-matrix encoding

use std::sync::Arc;

use ndarray::Array2;

use crate::config::EncodingShape;
use crate::embedding::{Scaler, WordEmbeddings};
use crate::error::{Error, Result};

/// Encodes an ordered token sequence into a fixed-shape feature matrix.
///
/// Tokens beyond `sequence_length` are clipped. Rows for out-of-vocabulary
/// tokens and for unused trailing positions both stay zero: a missing word
/// and a padding slot are bit-identical in the output.
#[derive(Clone)]
pub struct FeatureEncoder {
    /// Declared output shape
    shape: EncodingShape,

    /// Word-vector lookup, shared read-only
    embeddings: Arc<dyn WordEmbeddings>,

    /// Fitted normalization applied to every looked-up vector
    scaler: Arc<dyn Scaler>,
}

impl FeatureEncoder {
    /// Create an encoder.
    ///
    /// The embedding model's vector width must match the declared
    /// embedding size.
    pub fn new(
        shape: EncodingShape,
        embeddings: Arc<dyn WordEmbeddings>,
        scaler: Arc<dyn Scaler>,
    ) -> Result<Self> {
        if embeddings.dimension() != shape.embedding_size {
            return Err(Error::InvalidConfiguration(format!(
                "embedding dimension {} does not match declared embedding size {}",
                embeddings.dimension(),
                shape.embedding_size
            )));
        }

        Ok(Self {
            shape,
            embeddings,
            scaler,
        })
    }

    /// The fixed output shape of [`encode`](Self::encode)
    pub fn shape(&self) -> EncodingShape {
        self.shape
    }

    /// Encode `tokens` into a `[sequence_length, embedding_size]` matrix.
    ///
    /// Never fails: unknown tokens and short documents yield zero rows.
    pub fn encode(&self, tokens: &[String]) -> Array2<f32> {
        let mut matrix = Array2::zeros((self.shape.sequence_length, self.shape.embedding_size));

        for (row, token) in tokens.iter().take(self.shape.sequence_length).enumerate() {
            if let Some(vector) = self.embeddings.vector(token) {
                matrix.row_mut(row).assign(&self.scaler.transform(&vector));
            }
        }

        matrix
    }
}
