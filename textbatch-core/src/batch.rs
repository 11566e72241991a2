//! Batch tensor assembly

use std::sync::Arc;

use ndarray::{s, Array2, Array3};

use crate::document::DocumentId;
use crate::error::{Error, Result};
use crate::features::FeatureEncoder;
use crate::labels::LabelEncoder;
use crate::source::DocumentSource;

/// One assembled training batch.
///
/// Row `i` of every tensor corresponds to `ids[i]`; the identifier list is
/// carried so callers can map rows back to documents for diagnostics. All
/// entries of `inputs` are handles to the same feature tensor, one per
/// model input slot.
#[derive(Debug, Clone)]
pub struct SampleBatch {
    /// Identifiers the rows were built from, in row order
    pub ids: Vec<DocumentId>,

    /// Feature tensors `[len, sequence_length, embedding_size]`
    pub inputs: Vec<Arc<Array3<f32>>>,

    /// Multi-hot target matrix `[len, vocabulary_len]`
    pub targets: Array2<bool>,
}

impl SampleBatch {
    /// Number of documents in the batch
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch holds no documents
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Builds `(X, y)` tensor pairs for batches of identifiers.
///
/// Holds only read-only encoders, so one builder can be cloned per worker
/// thread; every [`build`](Self::build) allocates fresh output tensors.
#[derive(Clone)]
pub struct MatrixBuilder {
    /// Token-sequence encoder
    features: FeatureEncoder,

    /// Label-set encoder
    labels: LabelEncoder,

    /// How many input slots receive the feature tensor
    input_replicas: usize,
}

impl MatrixBuilder {
    /// Create a builder replicating the feature tensor once per model
    /// input slot.
    ///
    /// The replica count is a plain integer supplied by the caller's model
    /// description; the builder never inspects a live model.
    pub fn new(
        features: FeatureEncoder,
        labels: LabelEncoder,
        input_replicas: usize,
    ) -> Result<Self> {
        if input_replicas == 0 {
            return Err(Error::InvalidConfiguration(
                "input replica count must be positive".into(),
            ));
        }

        Ok(Self {
            features,
            labels,
            input_replicas,
        })
    }

    /// The feature encoder this builder writes rows with
    pub fn features(&self) -> &FeatureEncoder {
        &self.features
    }

    /// The label encoder this builder writes target rows with
    pub fn labels(&self) -> &LabelEncoder {
        &self.labels
    }

    /// Build the tensor pair for `ids`, resolved through `source`.
    ///
    /// Row order follows `ids`. Any fetch failure fails the whole batch:
    /// skipping a document would silently desynchronize rows from the
    /// identifier list.
    pub fn build(&self, ids: &[DocumentId], source: &dyn DocumentSource) -> Result<SampleBatch> {
        let shape = self.features.shape();
        let mut features =
            Array3::zeros((ids.len(), shape.sequence_length, shape.embedding_size));
        let mut targets =
            Array2::from_elem((ids.len(), self.labels.vocabulary().len()), false);

        let records = source.fetch_batch(ids)?;
        debug_assert_eq!(records.len(), ids.len());

        for (row, record) in records.iter().enumerate() {
            features
                .slice_mut(s![row, .., ..])
                .assign(&self.features.encode(&record.tokens));
            targets
                .row_mut(row)
                .assign(&self.labels.encode(&record.raw_labels));
        }

        let features = Arc::new(features);
        Ok(SampleBatch {
            ids: ids.to_vec(),
            inputs: vec![features; self.input_replicas],
            targets,
        })
    }
}
