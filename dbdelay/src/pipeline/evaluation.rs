use dbdelay_forest::metrics::{ClassificationReport, ConfusionMatrix};
use serde::Serialize;
use std::fmt::Display;

/// test set scores of a fitted classifier.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub n_train: usize,
    pub n_test: usize,
    pub confusion_matrix: ConfusionMatrix,
    pub report: ClassificationReport,
    /// most important features first
    pub top_features: Vec<(String, f64)>,
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Confusion Matrix:")?;
        writeln!(f, "{}", self.confusion_matrix)?;
        writeln!(f)?;
        writeln!(f, "Classification Report:")?;
        writeln!(f, "{}", self.report)?;
        if !self.top_features.is_empty() {
            writeln!(f)?;
            write!(f, "Top {} Feature Importances:", self.top_features.len())?;
            for (name, importance) in self.top_features.iter() {
                write!(f, "\n  {name}: {importance:.4}")?;
            }
        }
        Ok(())
    }
}
