#[derive(thiserror::Error, Debug)]
pub enum ForestError {
    #[error("cannot fit a random forest on an empty dataset")]
    EmptyDataset,
    #[error("invalid forest configuration: {0}")]
    InvalidConfig(String),
    #[error("random forest must be fit before predicting")]
    NotFitted,
    #[error("expected {expected} features per sample, found {found}")]
    FeatureCountMismatch { expected: usize, found: usize },
    #[error("label count mismatch: {n_true} true labels, {n_pred} predicted labels")]
    LabelLengthMismatch { n_true: usize, n_pred: usize },
    #[error("error building progress bar: {0}")]
    ProgressBarError(String),
}
