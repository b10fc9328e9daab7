mod labeled;
mod split;

pub use labeled::Dataset;
pub use split::Split;
