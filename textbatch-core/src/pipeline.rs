//! Pipeline entry: delivery-mode selection over assembled batches

use std::sync::Arc;

use tracing::debug;

use crate::batch::{MatrixBuilder, SampleBatch};
use crate::config::{DeliveryMode, PipelineConfig};
use crate::cursor::BatchCursor;
use crate::document::DocumentId;
use crate::error::{Error, Result};
use crate::features::FeatureEncoder;
use crate::labels::LabelEncoder;
use crate::source::DocumentSource;
use crate::stream::BatchStream;

/// Either form the training caller can consume.
pub enum TrainingSet {
    /// The whole population materialized as one tensor pair
    Matrices(SampleBatch),

    /// A live stream of mini-batches for incremental training
    Stream(BatchStream),
}

/// Entry point wiring encoders, a document source, and a delivery mode.
///
/// Built once per run; the encoders and configuration stay read-only for
/// its lifetime, so the pipeline itself can be cloned per worker.
#[derive(Clone)]
pub struct DataPipeline {
    /// Tensor assembly shared by both delivery modes
    builder: MatrixBuilder,

    /// Validated batch delivery configuration
    config: PipelineConfig,
}

impl DataPipeline {
    /// Create a pipeline from validated parts.
    pub fn new(
        features: FeatureEncoder,
        labels: LabelEncoder,
        config: PipelineConfig,
    ) -> Result<Self> {
        let builder = MatrixBuilder::new(features, labels, config.input_replicas)?;
        Ok(Self { builder, config })
    }

    /// The configuration this pipeline runs under
    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Assemble data for one population according to the configured mode.
    ///
    /// In-memory mode builds the whole population at once; streaming mode
    /// wraps a fresh cyclic cursor. An empty population is rejected in
    /// both modes.
    pub fn assemble(
        &self,
        source: Arc<dyn DocumentSource>,
        population: Vec<DocumentId>,
    ) -> Result<TrainingSet> {
        if population.is_empty() {
            return Err(Error::InvalidConfiguration("population is empty".into()));
        }

        match self.config.mode {
            DeliveryMode::InMemory => {
                debug!(documents = population.len(), "building in-memory matrices");
                let batch = self.builder.build(&population, source.as_ref())?;
                Ok(TrainingSet::Matrices(batch))
            }
            DeliveryMode::Streaming => {
                let cursor =
                    Arc::new(BatchCursor::new(population, self.config.batch_size)?);
                debug!(
                    batches_per_cycle = cursor.batches_per_cycle(),
                    "starting batch stream"
                );
                Ok(TrainingSet::Stream(BatchStream::new(
                    cursor,
                    source,
                    self.builder.clone(),
                )))
            }
        }
    }

    /// Assemble a training set plus an optional held-out set against the
    /// same source and encoders.
    pub fn assemble_split(
        &self,
        source: Arc<dyn DocumentSource>,
        train: Vec<DocumentId>,
        held_out: Option<Vec<DocumentId>>,
    ) -> Result<(TrainingSet, Option<TrainingSet>)> {
        let train_set = self.assemble(Arc::clone(&source), train)?;
        let held_out_set = match held_out {
            Some(population) => Some(self.assemble(source, population)?),
            None => None,
        };
        Ok((train_set, held_out_set))
    }
}
