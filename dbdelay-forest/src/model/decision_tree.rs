//! CART classification tree grown on weighted gini impurity.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use super::TreeNode;
use crate::ForestError;

/// minimum gap between consecutive sorted values for a split between them.
const FEATURE_THRESHOLD: f64 = 1e-7;
const EPSILON: f64 = f64::EPSILON;

/// growth parameters of a single tree. `max_features` is already resolved
/// against the number of features.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeConfig {
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: usize,
    pub seed: u64,
}

/// a fitted classification tree over class indices `0..n_classes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
    n_classes: usize,
    feature_importances: Vec<f64>,
}

impl DecisionTree {
    /// grows a tree on the rows with positive weight. `classes[i]` is the
    /// class index of row `i` and `sample_weights[i]` its weight (class
    /// weight times bootstrap multiplicity).
    pub fn fit(
        features: &[Vec<f64>],
        classes: &[usize],
        sample_weights: &[f64],
        n_classes: usize,
        config: &TreeConfig,
    ) -> Result<DecisionTree, ForestError> {
        if features.len() != classes.len() || features.len() != sample_weights.len() {
            return Err(ForestError::LabelLengthMismatch {
                n_true: classes.len(),
                n_pred: features.len(),
            });
        }
        let n_features = features.first().map(|row| row.len()).unwrap_or_default();
        if let Some(row) = features.iter().find(|row| row.len() != n_features) {
            return Err(ForestError::FeatureCountMismatch {
                expected: n_features,
                found: row.len(),
            });
        }
        if let Some(&c) = classes.iter().find(|&&c| c >= n_classes) {
            return Err(ForestError::InvalidConfig(format!(
                "class index {c} is out of range for {n_classes} classes"
            )));
        }
        let indices: Vec<usize> = (0..features.len())
            .filter(|&i| sample_weights[i] > 0.0)
            .collect();
        if indices.is_empty() {
            return Err(ForestError::EmptyDataset);
        }

        let mut builder = TreeBuilder {
            features,
            classes,
            weights: sample_weights,
            n_classes,
            n_features,
            config,
            importances: vec![0.0; n_features],
            rng: StdRng::seed_from_u64(config.seed),
        };
        let root = builder.build(indices, 0);

        let mut feature_importances = builder.importances;
        let total: f64 = feature_importances.iter().sum();
        if total > 0.0 {
            for importance in feature_importances.iter_mut() {
                *importance /= total;
            }
        }
        Ok(DecisionTree {
            root,
            n_classes,
            feature_importances,
        })
    }

    /// class distribution of the leaf a sample falls into.
    pub fn predict_proba_one(&self, x: &[f64]) -> &[f64] {
        self.root.leaf_distribution(x)
    }

    /// normalized total impurity decrease per feature; all zeros for a tree
    /// that never split.
    pub fn feature_importances(&self) -> &[f64] {
        &self.feature_importances
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }
}

struct SplitCandidate {
    feature_idx: usize,
    threshold: f64,
    /// sum over both children of child weight times child impurity
    children_cost: f64,
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f64>],
    classes: &'a [usize],
    weights: &'a [f64],
    n_classes: usize,
    n_features: usize,
    config: &'a TreeConfig,
    importances: Vec<f64>,
    rng: StdRng,
}

impl TreeBuilder<'_> {
    fn build(&mut self, indices: Vec<usize>, depth: usize) -> TreeNode {
        let distribution = self.distribution(&indices);
        let weight: f64 = distribution.iter().sum();
        let impurity = gini(&distribution, weight);
        let n_samples = indices.len();

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if depth_reached
            || n_samples < self.config.min_samples_split
            || n_samples < 2 * self.config.min_samples_leaf
            || impurity <= EPSILON
        {
            return TreeNode::leaf(distribution, n_samples);
        }

        let split = match self.best_split(&indices, &distribution) {
            Some(split) => split,
            None => return TreeNode::leaf(distribution, n_samples),
        };
        self.importances[split.feature_idx] += weight * impurity - split.children_cost;

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.features[i][split.feature_idx] <= split.threshold);
        let left = self.build(left, depth + 1);
        let right = self.build(right, depth + 1);

        TreeNode::Split {
            feature_idx: split.feature_idx,
            threshold: split.threshold,
            impurity,
            n_samples,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn distribution(&self, indices: &[usize]) -> Vec<f64> {
        let mut distribution = vec![0.0; self.n_classes];
        for &i in indices {
            distribution[self.classes[i]] += self.weights[i];
        }
        distribution
    }

    /// draws features in random order until `max_features` non-constant
    /// features were evaluated. keeps drawing past that point while no valid
    /// split has been found.
    fn best_split(&mut self, indices: &[usize], total: &[f64]) -> Option<SplitCandidate> {
        let mut candidates: Vec<usize> = (0..self.n_features).collect();
        candidates.shuffle(&mut self.rng);

        let mut best: Option<SplitCandidate> = None;
        let mut n_visited = 0;
        let mut sorted: Vec<(f64, usize)> = Vec::with_capacity(indices.len());
        for feature_idx in candidates {
            if n_visited >= self.config.max_features && best.is_some() {
                break;
            }
            sorted.clear();
            sorted.extend(indices.iter().map(|&i| (self.features[i][feature_idx], i)));
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

            let (first, last) = (sorted[0].0, sorted[sorted.len() - 1].0);
            if last <= first + FEATURE_THRESHOLD {
                continue;
            }
            n_visited += 1;

            if let Some(candidate) = self.sweep(feature_idx, &sorted, total) {
                let improves = match &best {
                    Some(b) => candidate.children_cost < b.children_cost,
                    None => true,
                };
                if improves {
                    best = Some(candidate);
                }
            }
        }
        best
    }

    /// evaluates every threshold between distinct consecutive values of one
    /// feature, moving one sample at a time from the right child to the left.
    fn sweep(
        &self,
        feature_idx: usize,
        sorted: &[(f64, usize)],
        total: &[f64],
    ) -> Option<SplitCandidate> {
        let n = sorted.len();
        let min_leaf = self.config.min_samples_leaf;
        let mut left = vec![0.0; self.n_classes];
        let mut right = vec![0.0; self.n_classes];
        let mut best: Option<SplitCandidate> = None;

        for pos in 0..n - 1 {
            let (value, i) = sorted[pos];
            left[self.classes[i]] += self.weights[i];

            let n_left = pos + 1;
            if n_left < min_leaf || n - n_left < min_leaf {
                continue;
            }
            let next = sorted[pos + 1].0;
            if next <= value + FEATURE_THRESHOLD {
                continue;
            }

            for (c, r) in right.iter_mut().enumerate() {
                *r = total[c] - left[c];
            }
            let w_left: f64 = left.iter().sum();
            let w_right: f64 = right.iter().sum();
            let children_cost = w_left * gini(&left, w_left) + w_right * gini(&right, w_right);

            let improves = match &best {
                Some(b) => children_cost < b.children_cost,
                None => true,
            };
            if improves {
                let mut threshold = value / 2.0 + next / 2.0;
                if threshold >= next || !threshold.is_finite() {
                    threshold = value;
                }
                best = Some(SplitCandidate {
                    feature_idx,
                    threshold,
                    children_cost,
                });
            }
        }
        best
    }
}

/// gini impurity of a weighted class distribution with total weight `weight`.
fn gini(distribution: &[f64], weight: f64) -> f64 {
    if weight <= 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = distribution.iter().map(|w| (w / weight).powi(2)).sum();
    (1.0 - sum_sq).max(0.0)
}
