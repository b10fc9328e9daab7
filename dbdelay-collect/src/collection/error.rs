use arrow::error::ArrowError;
use parquet::errors::ParquetError;

#[derive(thiserror::Error, Debug)]
pub enum CollectionError {
    #[error("Failed to open '{path}': {source}")]
    FileOpenError {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to create ArrowReader instance: {source}")]
    ArrowReaderError { source: ParquetError },
    #[error("Failed to retrieve Record Batch from source: {source}")]
    RecordBatchRetrievalError { source: ArrowError },
    #[error("Required column '{0}' not found in train dataset")]
    MissingColumnError(String),
    #[error("Failed to cast column '{column}' to {target}: {source}")]
    ColumnCastError {
        column: String,
        target: String,
        source: ArrowError,
    },
    #[error("Unexpected null in required column '{column}' at row {row}")]
    NullValueError { column: String, row: usize },
    #[error("Timestamp in column '{column}' at row {row} is out of range")]
    TimestampRangeError { column: String, row: usize },
    #[error("Failed to build weather request URL: {0}")]
    WeatherUrlError(String),
    #[error("Weather request failed: {0}")]
    WeatherRequestError(String),
    #[error("Failed to deserialize weather response: {0}")]
    WeatherDeserializeError(String),
    #[error("Weather series '{column}' has {found} values but {expected} timestamps")]
    WeatherSeriesLengthError {
        column: String,
        expected: usize,
        found: usize,
    },
    #[error("Failed to parse weather timestamp '{value}': {source}")]
    WeatherTimestampError {
        value: String,
        source: chrono::ParseError,
    },
    #[error("Failed writing '{path}': {source}")]
    FileWriteError {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed writing '{path}': {source}")]
    CsvWriteError { path: String, source: csv::Error },
    #[error("{0}")]
    InvalidUserInput(String),
}
