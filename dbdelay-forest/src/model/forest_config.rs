use serde::{Deserialize, Serialize};

use super::{ClassWeight, MaxFeatures};

/// random forest hyperparameters. missing fields take their default values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ForestConfig {
    /// number of trees in the forest
    pub n_trees: usize,
    /// maximum depth of each tree, unbounded when None
    pub max_depth: Option<usize>,
    /// minimum samples a node needs to be split
    pub min_samples_split: usize,
    /// minimum samples in each leaf
    pub min_samples_leaf: usize,
    /// candidate features per split
    pub max_features: MaxFeatures,
    /// grow each tree on a bootstrap sample of the training rows
    pub bootstrap: bool,
    pub seed: u64,
    pub class_weight: ClassWeight,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            seed: 42,
            class_weight: ClassWeight::Balanced,
        }
    }
}
