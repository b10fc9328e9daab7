use dbdelay_collect::collection::CollectionError;
use dbdelay_core::CoreError;
use dbdelay_forest::ForestError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: ::config::ConfigError,
    },
    #[error("failure collecting input data: {source}")]
    CollectionError {
        #[from]
        source: CollectionError,
    },
    #[error("failure preparing features: {source}")]
    CoreError {
        #[from]
        source: CoreError,
    },
    #[error("failure training or evaluating the classifier: {source}")]
    ForestError {
        #[from]
        source: ForestError,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("no rows with complete weather values to train on ({0} rows before encoding)")]
    EmptyDatasetError(usize),
}
