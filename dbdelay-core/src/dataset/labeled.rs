//! dense feature matrix with integer class labels

use super::Split;
use crate::CoreError;
use itertools::Itertools;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// feature matrix (n_samples x n_features), one label per row, and the
/// column names of the matrix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// creates an empty dataset with the given columns
    pub fn new(feature_names: Vec<String>) -> Self {
        Self {
            features: Vec::new(),
            labels: Vec::new(),
            feature_names,
        }
    }

    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn add_sample(&mut self, features: Vec<f64>, label: i64) -> Result<(), CoreError> {
        if features.len() != self.feature_names.len() {
            return Err(CoreError::FeatureCountMismatch {
                expected: self.feature_names.len(),
                found: features.len(),
            });
        }
        self.features.push(features);
        self.labels.push(label);
        Ok(())
    }

    /// rows at the given indices, in index order. indices may repeat.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: indices.iter().map(|&i| self.features[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
            feature_names: self.feature_names.clone(),
        }
    }

    /// number of rows per label, ordered by label.
    pub fn class_counts(&self) -> BTreeMap<i64, usize> {
        self.labels.iter().copied().counts().into_iter().collect()
    }

    /// shuffles row indices with a seeded generator and places the first
    /// `ceil(test_ratio * n)` of them in the test set. the same seed and
    /// input always produce the same partition. no stratification.
    pub fn train_test_split(&self, test_ratio: f64, seed: u64) -> Result<Split, CoreError> {
        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(CoreError::InvalidTestRatio(test_ratio));
        }
        let n = self.n_samples();
        let test_size = (test_ratio * n as f64).ceil() as usize;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut indices: Vec<usize> = (0..n).collect();
        indices.shuffle(&mut rng);

        let (test_indices, train_indices) = indices.split_at(test_size.min(n));
        Ok(Split {
            train: self.subset(train_indices),
            test: self.subset(test_indices),
        })
    }
}
