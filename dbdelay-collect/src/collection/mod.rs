mod collector;
mod column_ops;
mod error;

pub mod filter;

pub use collector::TrainRecordCollector;
pub use error::CollectionError;
pub use filter::StationRowPredicate;
