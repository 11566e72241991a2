//! Label vocabulary and multi-hot target encoding

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use ndarray::Array1;

use crate::error::{Error, Result};

/// Closed, ordered label vocabulary with dense indices.
///
/// Index assignment is fixed at construction and never changes mid-run;
/// downstream target matrices depend on it.
#[derive(Debug, Clone)]
pub struct LabelVocabulary {
    /// Labels in index order
    labels: Vec<String>,

    /// Derived label to index map
    indices: HashMap<String, usize>,
}

impl LabelVocabulary {
    /// Build a vocabulary from a caller-ordered label list.
    ///
    /// Duplicates keep their first position; an empty list is rejected.
    pub fn new(labels: impl IntoIterator<Item = impl Into<String>>) -> Result<Self> {
        let mut ordered = Vec::new();
        let mut indices = HashMap::new();

        for label in labels {
            let label = label.into();
            if !indices.contains_key(&label) {
                indices.insert(label.clone(), ordered.len());
                ordered.push(label);
            }
        }

        if ordered.is_empty() {
            return Err(Error::InvalidConfiguration(
                "label vocabulary is empty".into(),
            ));
        }

        Ok(Self {
            labels: ordered,
            indices,
        })
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the vocabulary holds no labels (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Dense index of `label`, if part of the vocabulary
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.indices.get(label).copied()
    }

    /// Whether `label` is part of the vocabulary
    pub fn contains(&self, label: &str) -> bool {
        self.indices.contains_key(label)
    }

    /// Labels in index order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Encodes raw label sets into fixed multi-hot vectors.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    /// Vocabulary shared read-only across worker threads
    vocabulary: Arc<LabelVocabulary>,
}

impl LabelEncoder {
    /// Create an encoder over a shared vocabulary
    pub fn new(vocabulary: Arc<LabelVocabulary>) -> Self {
        Self { vocabulary }
    }

    /// The vocabulary this encoder indexes into
    pub fn vocabulary(&self) -> &LabelVocabulary {
        &self.vocabulary
    }

    /// Encode a raw label set as a multi-hot vector of vocabulary length.
    ///
    /// Labels outside the vocabulary are dropped; a disjoint set encodes
    /// as all-false, which is a valid row, not an error.
    pub fn encode(&self, raw_labels: &HashSet<String>) -> Array1<bool> {
        let mut row = Array1::from_elem(self.vocabulary.len(), false);
        for label in raw_labels {
            if let Some(index) = self.vocabulary.index_of(label) {
                row[index] = true;
            }
        }
        row
    }
}
