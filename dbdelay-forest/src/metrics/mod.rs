mod classification_report;
mod confusion_matrix;

pub use classification_report::{AverageMetrics, ClassMetrics, ClassificationReport};
pub use confusion_matrix::ConfusionMatrix;
