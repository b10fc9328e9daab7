mod feature_column;
mod one_hot_encoder;

pub use feature_column::{NominalColumn, NumericColumn};
pub use one_hot_encoder::OneHotEncoder;
