pub mod dataset;
pub mod encode;
pub mod feature;
pub mod merge;
pub mod model;

mod core_error;

pub use core_error::CoreError;
