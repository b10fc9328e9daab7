mod feature_ops;
mod feature_record;

pub use feature_ops::{build_feature_record, build_features, is_rush_hour, is_weekend};
pub use feature_record::FeatureRecord;
