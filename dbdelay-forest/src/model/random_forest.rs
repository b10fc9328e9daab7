//! bootstrap-aggregated ensemble of class-weighted CART trees.

use dbdelay_core::dataset::Dataset;
use kdam::{Bar, BarExt};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::{DecisionTree, ForestConfig, TreeConfig};
use crate::ForestError;

/// random forest classifier over integer labels. class probabilities are the
/// mean of the leaf distributions of all trees (soft voting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    config: ForestConfig,
    classes: Vec<i64>,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    feature_importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            trees: Vec::new(),
            feature_names: Vec::new(),
            feature_importances: Vec::new(),
        }
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// fits the forest. tree `i` is seeded with `seed + i`, so the result
    /// does not depend on how rayon schedules the trees.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<(), ForestError> {
        self.validate_config()?;
        if dataset.is_empty() {
            return Err(ForestError::EmptyDataset);
        }
        let n_features = dataset.n_features();
        if let Some(row) = dataset.features.iter().find(|row| row.len() != n_features) {
            return Err(ForestError::FeatureCountMismatch {
                expected: n_features,
                found: row.len(),
            });
        }
        let start = Instant::now();

        let mut classes = dataset.labels.clone();
        classes.sort_unstable();
        classes.dedup();
        let class_indices: Vec<usize> = dataset
            .labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();
        let n_classes = classes.len();
        let class_weights = self.config.class_weight.weights(&class_indices, n_classes);
        let max_features = self.config.max_features.resolve(n_features);
        log::info!(
            "fitting {} trees on {} samples, {} features ({} per split), classes {:?}",
            self.config.n_trees,
            dataset.n_samples(),
            n_features,
            max_features,
            classes
        );
        log::debug!("class weights: {class_weights:?}");

        let bar = Arc::new(Mutex::new(
            Bar::builder()
                .total(self.config.n_trees)
                .desc("fit random forest")
                .build()
                .map_err(|e| ForestError::ProgressBarError(e.to_string()))?,
        ));

        let trees = (0..self.config.n_trees)
            .into_par_iter()
            .map(|i| {
                let seed = self.config.seed.wrapping_add(i as u64);
                let tree_config = TreeConfig {
                    max_depth: self.config.max_depth,
                    min_samples_split: self.config.min_samples_split,
                    min_samples_leaf: self.config.min_samples_leaf,
                    max_features,
                    seed,
                };
                let multiplicity = if self.config.bootstrap {
                    bootstrap_counts(dataset.n_samples(), seed)
                } else {
                    vec![1; dataset.n_samples()]
                };
                let sample_weights: Vec<f64> = class_indices
                    .iter()
                    .zip(multiplicity)
                    .map(|(&c, count)| class_weights[c] * count as f64)
                    .collect();
                let tree = DecisionTree::fit(
                    &dataset.features,
                    &class_indices,
                    &sample_weights,
                    n_classes,
                    &tree_config,
                );
                if let Ok(mut b) = bar.clone().lock() {
                    let _ = b.update(1);
                }
                tree
            })
            .collect::<Result<Vec<_>, _>>()?;
        eprintln!();

        self.feature_importances = mean_importances(&trees, n_features);
        self.trees = trees;
        self.classes = classes;
        self.feature_names = dataset.feature_names.clone();
        log::info!(
            "fit {} trees in {:?} (mean depth {:.1})",
            self.trees.len(),
            start.elapsed(),
            self.trees.iter().map(|t| t.depth() as f64).sum::<f64>() / self.trees.len() as f64
        );
        Ok(())
    }

    /// sorted labels seen during fitting; the column order of probabilities.
    pub fn classes(&self) -> &[i64] {
        &self.classes
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn predict_proba_one(&self, x: &[f64]) -> Result<Vec<f64>, ForestError> {
        if self.trees.is_empty() {
            return Err(ForestError::NotFitted);
        }
        if x.len() != self.feature_names.len() {
            return Err(ForestError::FeatureCountMismatch {
                expected: self.feature_names.len(),
                found: x.len(),
            });
        }
        let mut proba = vec![0.0; self.classes.len()];
        for tree in self.trees.iter() {
            for (p, q) in proba.iter_mut().zip(tree.predict_proba_one(x)) {
                *p += q;
            }
        }
        let n_trees = self.trees.len() as f64;
        for p in proba.iter_mut() {
            *p /= n_trees;
        }
        Ok(proba)
    }

    /// most probable class; ties go to the smaller label.
    pub fn predict_one(&self, x: &[f64]) -> Result<i64, ForestError> {
        let proba = self.predict_proba_one(x)?;
        let mut best = 0;
        for (idx, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = idx;
            }
        }
        self.classes.get(best).copied().ok_or(ForestError::NotFitted)
    }

    pub fn predict(&self, dataset: &Dataset) -> Result<Vec<i64>, ForestError> {
        dataset
            .features
            .par_iter()
            .map(|x| self.predict_one(x))
            .collect()
    }

    pub fn predict_proba(&self, dataset: &Dataset) -> Result<Vec<Vec<f64>>, ForestError> {
        dataset
            .features
            .par_iter()
            .map(|x| self.predict_proba_one(x))
            .collect()
    }

    /// mean impurity decrease per feature, normalized to sum to 1.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    /// feature names with importances, most important first.
    pub fn feature_importance_ranking(&self) -> Vec<(&str, f64)> {
        let mut ranking: Vec<(&str, f64)> = self
            .feature_names
            .iter()
            .zip(self.feature_importances.iter())
            .map(|(name, &importance)| (name.as_str(), importance))
            .collect();
        ranking.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranking
    }

    fn validate_config(&self) -> Result<(), ForestError> {
        if self.config.n_trees == 0 {
            return Err(ForestError::InvalidConfig(String::from(
                "n_trees must be at least 1",
            )));
        }
        if self.config.min_samples_split < 2 {
            return Err(ForestError::InvalidConfig(format!(
                "min_samples_split must be at least 2, found {}",
                self.config.min_samples_split
            )));
        }
        if self.config.min_samples_leaf < 1 {
            return Err(ForestError::InvalidConfig(String::from(
                "min_samples_leaf must be at least 1",
            )));
        }
        if self.config.max_depth == Some(0) {
            return Err(ForestError::InvalidConfig(String::from(
                "max_depth must be at least 1 when set",
            )));
        }
        Ok(())
    }
}

/// number of times each row is drawn in a bootstrap sample of size `n`.
fn bootstrap_counts(n: usize, seed: u64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = vec![0; n];
    for _ in 0..n {
        counts[rng.random_range(0..n)] += 1;
    }
    counts
}

/// averages the importances of trees that split at least once, then
/// renormalizes.
fn mean_importances(trees: &[DecisionTree], n_features: usize) -> Vec<f64> {
    let mut importances = vec![0.0; n_features];
    let mut n_split_trees = 0;
    for tree in trees.iter().filter(|t| !t.root().is_leaf()) {
        n_split_trees += 1;
        for (acc, imp) in importances.iter_mut().zip(tree.feature_importances()) {
            *acc += imp;
        }
    }
    if n_split_trees == 0 {
        return importances;
    }
    let total: f64 = importances.iter().sum();
    if total > 0.0 {
        for imp in importances.iter_mut() {
            *imp /= total;
        }
    }
    importances
}

#[cfg(test)]
mod test {
    use super::{bootstrap_counts, RandomForest};
    use crate::model::{ClassWeight, ForestConfig};
    use crate::ForestError;
    use dbdelay_core::dataset::Dataset;

    /// label depends on the first feature only; the second is a distractor
    fn banded(n: usize) -> Dataset {
        let mut dataset = Dataset::new(vec![String::from("x"), String::from("noise")]);
        for i in 0..n {
            let x = (i % 40) as f64;
            let label = match x as i64 {
                0..=9 => -1,
                10..=24 => 0,
                _ => 3,
            };
            let noise = ((i * 7919) % 13) as f64;
            dataset
                .add_sample(vec![x, noise], label)
                .expect("should not fail");
        }
        dataset
    }

    fn small_config() -> ForestConfig {
        ForestConfig {
            n_trees: 15,
            ..Default::default()
        }
    }

    #[test]
    fn test_fit_and_predict() {
        let dataset = banded(200);
        let mut forest = RandomForest::new(small_config());
        forest.fit(&dataset).expect("should not fail");

        assert_eq!(forest.n_trees(), 15);
        assert_eq!(forest.classes(), &[-1, 0, 3]);
        assert_eq!(forest.predict_one(&[2.0, 5.0]).expect("should not fail"), -1);
        assert_eq!(forest.predict_one(&[15.0, 5.0]).expect("should not fail"), 0);
        assert_eq!(forest.predict_one(&[35.0, 5.0]).expect("should not fail"), 3);

        let predictions = forest.predict(&dataset).expect("should not fail");
        let correct = predictions
            .iter()
            .zip(dataset.labels.iter())
            .filter(|(p, t)| p == t)
            .count();
        assert!(correct as f64 / dataset.n_samples() as f64 > 0.95);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let dataset = banded(120);
        let mut forest = RandomForest::new(small_config());
        forest.fit(&dataset).expect("should not fail");
        for proba in forest.predict_proba(&dataset).expect("should not fail") {
            assert_eq!(proba.len(), 3);
            let total: f64 = proba.iter().sum();
            assert!((total - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_fit_is_deterministic() {
        let dataset = banded(160);
        let mut a = RandomForest::new(small_config());
        let mut b = RandomForest::new(small_config());
        a.fit(&dataset).expect("should not fail");
        b.fit(&dataset).expect("should not fail");
        assert_eq!(a.feature_importances(), b.feature_importances());
        let probe = Dataset {
            features: (0..40).map(|x| vec![x as f64 + 0.5, 3.0]).collect(),
            labels: vec![0; 40],
            feature_names: dataset.feature_names.clone(),
        };
        assert_eq!(
            a.predict_proba(&probe).expect("should not fail"),
            b.predict_proba(&probe).expect("should not fail")
        );
    }

    #[test]
    fn test_importance_ranking() {
        let dataset = banded(200);
        let mut forest = RandomForest::new(small_config());
        forest.fit(&dataset).expect("should not fail");
        let ranking = forest.feature_importance_ranking();
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].0, "x");
        assert!(ranking[0].1 > ranking[1].1);
        let total: f64 = ranking.iter().map(|(_, imp)| imp).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_balanced_weights_favor_minority() {
        // a single feature value shared by both classes, 9:1 imbalance
        let mut dataset = Dataset::new(vec![String::from("x")]);
        for i in 0..100 {
            let label = if i < 90 { 0 } else { 1 };
            dataset.add_sample(vec![1.0], label).expect("should not fail");
        }
        let config = ForestConfig {
            n_trees: 1,
            bootstrap: false,
            ..Default::default()
        };
        let mut balanced = RandomForest::new(config.clone());
        balanced.fit(&dataset).expect("should not fail");
        let proba = balanced.predict_proba_one(&[1.0]).expect("should not fail");
        assert!((proba[0] - 0.5).abs() < 1e-9);
        assert!((proba[1] - 0.5).abs() < 1e-9);

        let mut uniform = RandomForest::new(ForestConfig {
            class_weight: ClassWeight::Uniform,
            ..config
        });
        uniform.fit(&dataset).expect("should not fail");
        let proba = uniform.predict_proba_one(&[1.0]).expect("should not fail");
        assert!((proba[0] - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_errors() {
        let forest = RandomForest::new(ForestConfig::default());
        assert!(matches!(
            forest.predict_one(&[1.0]),
            Err(ForestError::NotFitted)
        ));

        let mut forest = RandomForest::new(small_config());
        let empty = Dataset::new(vec![String::from("x")]);
        assert!(matches!(forest.fit(&empty), Err(ForestError::EmptyDataset)));

        let mut invalid = RandomForest::new(ForestConfig {
            min_samples_split: 1,
            ..Default::default()
        });
        assert!(matches!(
            invalid.fit(&banded(10)),
            Err(ForestError::InvalidConfig(_))
        ));

        let mut forest = RandomForest::new(small_config());
        forest.fit(&banded(40)).expect("should not fail");
        assert!(matches!(
            forest.predict_one(&[1.0]),
            Err(ForestError::FeatureCountMismatch { .. })
        ));
    }

    #[test]
    fn test_bootstrap_counts() {
        let counts = bootstrap_counts(50, 42);
        assert_eq!(counts.iter().sum::<usize>(), 50);
        assert_eq!(counts, bootstrap_counts(50, 42));
        assert_ne!(counts, bootstrap_counts(50, 43));
    }
}
