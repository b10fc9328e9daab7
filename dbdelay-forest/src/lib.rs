pub mod metrics;
pub mod model;

mod forest_error;

pub use forest_error::ForestError;
