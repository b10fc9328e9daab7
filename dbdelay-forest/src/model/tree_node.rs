use serde::{Deserialize, Serialize};

/// a node of a fitted classification tree. samples with
/// `x[feature_idx] <= threshold` descend to the left child.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    Leaf {
        /// weighted class distribution, normalized to sum to 1
        distribution: Vec<f64>,
        n_samples: usize,
    },
    Split {
        feature_idx: usize,
        threshold: f64,
        /// weighted gini impurity of this node before splitting
        impurity: f64,
        n_samples: usize,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(mut distribution: Vec<f64>, n_samples: usize) -> TreeNode {
        let total: f64 = distribution.iter().sum();
        if total > 0.0 {
            for p in distribution.iter_mut() {
                *p /= total;
            }
        }
        TreeNode::Leaf {
            distribution,
            n_samples,
        }
    }

    /// class distribution of the leaf reached by a sample.
    pub fn leaf_distribution(&self, x: &[f64]) -> &[f64] {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { distribution, .. } => return distribution,
                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    node = if x[*feature_idx] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub fn n_samples(&self) -> usize {
        match self {
            TreeNode::Leaf { n_samples, .. } => *n_samples,
            TreeNode::Split { n_samples, .. } => *n_samples,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// depth of the subtree, 1 for a single leaf
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }
}
