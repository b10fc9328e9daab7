use super::Dataset;

/// a train/test partition of a [`Dataset`]
#[derive(Debug, Clone)]
pub struct Split {
    pub train: Dataset,
    pub test: Dataset,
}
