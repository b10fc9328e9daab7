#[derive(thiserror::Error, Debug)]
pub enum CoreError {
    #[error("test ratio must be in the open range (0, 1), found {0}")]
    InvalidTestRatio(f64),
    #[error("sample has {found} features but dataset expects {expected}")]
    FeatureCountMismatch { expected: usize, found: usize },
}
