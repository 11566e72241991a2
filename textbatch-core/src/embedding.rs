//! Word-embedding and feature-scaling capability seams
//!
//! The embedding model and the scaler are trained elsewhere and enter the
//! pipeline read-only; the traits here are the whole surface the feature
//! encoder depends on. Both are `Send + Sync` so a single instance can be
//! shared across worker threads without further synchronization.

use std::collections::HashMap;

use ndarray::Array1;

use crate::error::{Error, Result};

/// Read-only word-vector lookup with a fixed vector width.
pub trait WordEmbeddings: Send + Sync {
    /// Width of every vector returned by [`vector`](Self::vector)
    fn dimension(&self) -> usize;

    /// Whether `word` is part of the embedding vocabulary
    fn contains(&self, word: &str) -> bool;

    /// Look up the vector for `word`, if known
    fn vector(&self, word: &str) -> Option<Array1<f32>>;
}

/// Width-preserving, already-fitted normalization of a single word vector.
pub trait Scaler: Send + Sync {
    /// Transform one word vector into its normalized form
    fn transform(&self, vector: &Array1<f32>) -> Array1<f32>;
}

/// Map-backed embedding lookup.
#[derive(Debug, Clone)]
pub struct DenseEmbeddings {
    /// Vector width shared by all entries
    dimension: usize,

    /// Word to vector table
    vectors: HashMap<String, Array1<f32>>,
}

impl DenseEmbeddings {
    /// Build a lookup from `(word, vector)` pairs.
    ///
    /// Every vector must have exactly `dimension` entries.
    pub fn from_pairs(
        dimension: usize,
        pairs: impl IntoIterator<Item = (String, Vec<f32>)>,
    ) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidConfiguration(
                "embedding dimension must be positive".into(),
            ));
        }

        let mut vectors = HashMap::new();
        for (word, vector) in pairs {
            if vector.len() != dimension {
                return Err(Error::InvalidConfiguration(format!(
                    "vector for `{word}` has width {}, expected {dimension}",
                    vector.len()
                )));
            }
            vectors.insert(word, Array1::from_vec(vector));
        }

        Ok(Self { dimension, vectors })
    }

    /// Number of words in the lookup
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Whether the lookup holds no words
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl WordEmbeddings for DenseEmbeddings {
    fn dimension(&self) -> usize {
        self.dimension
    }

    fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }

    fn vector(&self, word: &str) -> Option<Array1<f32>> {
        self.vectors.get(word).cloned()
    }
}

/// Per-feature standardization with externally fitted statistics.
///
/// The transform panics if a vector's width differs from the fitted
/// statistics; the feature encoder guarantees matching widths.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    /// Fitted per-feature means
    mean: Array1<f32>,

    /// Fitted per-feature scales
    scale: Array1<f32>,
}

impl StandardScaler {
    /// Build from fitted per-feature means and scales.
    ///
    /// Zero scale entries pass the feature through centred instead of
    /// dividing by zero.
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> Result<Self> {
        if mean.len() != scale.len() {
            return Err(Error::InvalidConfiguration(format!(
                "scaler mean width {} does not match scale width {}",
                mean.len(),
                scale.len()
            )));
        }

        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();

        Ok(Self {
            mean: Array1::from_vec(mean),
            scale: Array1::from_vec(scale),
        })
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, vector: &Array1<f32>) -> Array1<f32> {
        (vector - &self.mean) / &self.scale
    }
}

/// Scaler that leaves vectors untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl Scaler for IdentityScaler {
    fn transform(&self, vector: &Array1<f32>) -> Array1<f32> {
        vector.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dense_embeddings_validate_width() {
        let result = DenseEmbeddings::from_pairs(
            3,
            vec![
                ("good".to_owned(), vec![1.0, 2.0, 3.0]),
                ("bad".to_owned(), vec![1.0]),
            ],
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn dense_embeddings_lookup() {
        let embeddings = DenseEmbeddings::from_pairs(
            2,
            vec![("word".to_owned(), vec![0.5, -0.5])],
        )
        .unwrap();

        assert_eq!(embeddings.dimension(), 2);
        assert!(embeddings.contains("word"));
        assert!(!embeddings.contains("other"));
        assert_eq!(
            embeddings.vector("word").unwrap(),
            Array1::from_vec(vec![0.5, -0.5])
        );
        assert!(embeddings.vector("other").is_none());
    }

    #[test]
    fn standard_scaler_centres_and_scales() {
        let scaler = StandardScaler::new(vec![1.0, 2.0], vec![2.0, 4.0]).unwrap();
        let scaled = scaler.transform(&Array1::from_vec(vec![3.0, 10.0]));
        assert_eq!(scaled, Array1::from_vec(vec![1.0, 2.0]));
    }

    #[test]
    fn standard_scaler_tolerates_zero_scale() {
        let scaler = StandardScaler::new(vec![1.0], vec![0.0]).unwrap();
        let scaled = scaler.transform(&Array1::from_vec(vec![4.0]));
        assert_eq!(scaled, Array1::from_vec(vec![3.0]));
    }

    #[test]
    fn standard_scaler_rejects_mismatched_statistics() {
        assert!(matches!(
            StandardScaler::new(vec![1.0, 2.0], vec![1.0]),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn identity_scaler_is_a_noop() {
        let vector = Array1::from_vec(vec![1.0, -1.0]);
        assert_eq!(IdentityScaler.transform(&vector), vector);
    }
}
