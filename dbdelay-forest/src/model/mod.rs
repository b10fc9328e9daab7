mod class_weight;
mod decision_tree;
mod forest_config;
mod max_features;
mod random_forest;
mod tree_node;

pub use class_weight::ClassWeight;
pub use decision_tree::{DecisionTree, TreeConfig};
pub use forest_config::ForestConfig;
pub use max_features::MaxFeatures;
pub use random_forest::RandomForest;
pub use tree_node::TreeNode;
