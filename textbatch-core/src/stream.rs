//! Unbounded mini-batch stream

use std::sync::Arc;

use crate::batch::{MatrixBuilder, SampleBatch};
use crate::cursor::BatchCursor;
use crate::error::Result;
use crate::source::DocumentSource;

/// An unbounded sequence of assembled batches over a shared cyclic cursor.
///
/// Worker threads share one stream behind `Arc` and call
/// [`next_batch`](Self::next_batch) concurrently; the cursor's lock is the
/// only synchronization point, and document fetching plus tensor
/// construction run outside it. The stream never terminates on its own;
/// consumers cancel by not pulling, and restart by constructing a new
/// stream over a fresh cursor.
pub struct BatchStream {
    /// Shared cursor handing out identifier slices
    cursor: Arc<BatchCursor>,

    /// Backend the identifier slices are resolved through
    source: Arc<dyn DocumentSource>,

    /// Read-only tensor assembly
    builder: MatrixBuilder,
}

impl BatchStream {
    /// Create a stream pulling identifier batches from `cursor` and
    /// resolving them through `source`.
    pub fn new(
        cursor: Arc<BatchCursor>,
        source: Arc<dyn DocumentSource>,
        builder: MatrixBuilder,
    ) -> Self {
        Self {
            cursor,
            source,
            builder,
        }
    }

    /// The cursor this stream advances
    pub fn cursor(&self) -> &BatchCursor {
        &self.cursor
    }

    /// Assemble the next batch.
    ///
    /// Each call is a complete, self-contained construction: a fetch
    /// failure fails only the batch it occurred in and leaves nothing to
    /// unwind.
    pub fn next_batch(&self) -> Result<SampleBatch> {
        let ids = self.cursor.next_batch();
        self.builder.build(&ids, self.source.as_ref())
    }

    /// Infinite iterator view for single-threaded consumers.
    pub fn iter(&self) -> impl Iterator<Item = Result<SampleBatch>> + '_ {
        std::iter::repeat_with(|| self.next_batch())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EncodingShape;
    use crate::document::DocumentId;
    use crate::embedding::{DenseEmbeddings, IdentityScaler};
    use crate::features::FeatureEncoder;
    use crate::labels::{LabelEncoder, LabelVocabulary};
    use crate::test_fixtures::{ids, record, MapSource};
    use std::collections::HashMap;
    use std::thread;

    fn stream(population: &[&str], batch_size: usize) -> BatchStream {
        let shape = EncodingShape::new(2, 2).unwrap();
        let embeddings = Arc::new(
            DenseEmbeddings::from_pairs(2, vec![("word".to_owned(), vec![1.0, -1.0])]).unwrap(),
        );
        let features =
            FeatureEncoder::new(shape, embeddings, Arc::new(IdentityScaler)).unwrap();
        let vocabulary = Arc::new(LabelVocabulary::new(["tag"]).unwrap());
        let builder =
            MatrixBuilder::new(features, LabelEncoder::new(vocabulary), 1).unwrap();

        let records = population
            .iter()
            .map(|id| record(id, &["word"], &["tag"]))
            .collect::<Vec<_>>();
        let cursor = Arc::new(BatchCursor::new(ids(population), batch_size).unwrap());

        BatchStream::new(cursor, Arc::new(MapSource::new(records)), builder)
    }

    #[test]
    fn stream_cycles_with_one_short_batch_per_cycle() {
        let stream = stream(&["a", "b", "c"], 2);

        let lengths: Vec<usize> = stream
            .iter()
            .take(6)
            .map(|batch| batch.unwrap().len())
            .collect();
        assert_eq!(lengths, vec![2, 1, 2, 1, 2, 1]);
    }

    #[test]
    fn every_batch_keeps_declared_tensor_shapes() {
        let stream = stream(&["a", "b", "c"], 2);

        for batch in stream.iter().take(4) {
            let batch = batch.unwrap();
            assert_eq!(batch.inputs[0].shape(), &[batch.len(), 2, 2]);
            assert_eq!(batch.targets.shape(), &[batch.len(), 1]);
        }
    }

    #[test]
    fn missing_document_fails_only_its_batch() {
        let stream = stream(&["a", "b", "c"], 2);
        // Rebuild the stream against a source that lost "c".
        let source = MapSource::new(vec![
            record("a", &["word"], &["tag"]),
            record("b", &["word"], &["tag"]),
        ]);
        let stream = BatchStream::new(
            Arc::new(BatchCursor::new(ids(&["a", "b", "c"]), 2).unwrap()),
            Arc::new(source),
            stream.builder.clone(),
        );

        assert!(stream.next_batch().is_ok());
        assert!(stream.next_batch().is_err());
        // The cursor wrapped after the short batch; pulling again works.
        assert!(stream.next_batch().is_ok());
    }

    #[test]
    fn concurrent_consumers_drain_exact_cycles() {
        let stream = Arc::new(stream(&["a", "b", "c", "d"], 2));

        let threads = 4;
        let pulls_per_thread = 5;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let stream = Arc::clone(&stream);
                thread::spawn(move || {
                    (0..pulls_per_thread)
                        .map(|_| stream.next_batch().unwrap().ids)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut counts: HashMap<DocumentId, usize> = HashMap::new();
        for handle in handles {
            for batch_ids in handle.join().unwrap() {
                assert_eq!(batch_ids.len(), 2);
                for id in batch_ids {
                    *counts.entry(id).or_default() += 1;
                }
            }
        }

        // 20 batches of 2 ids over a population of 4: 10 full cycles,
        // every identifier pulled exactly 10 times.
        for id in ids(&["a", "b", "c", "d"]) {
            assert_eq!(counts[&id], 10);
        }
    }
}
