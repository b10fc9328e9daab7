use serde::Serialize;
use std::fmt::Display;

use super::confusion_matrix::{ratio, ConfusionMatrix};

const HEADERS: [&str; 4] = ["precision", "recall", "f1-score", "support"];
const WEIGHTED_AVG: &str = "weighted avg";

/// per-class scores. scores with a zero denominator are 0.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassMetrics {
    pub label: i64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AverageMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// precision, recall, f1 and support per class with accuracy, macro and
/// support-weighted averages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassificationReport {
    pub classes: Vec<ClassMetrics>,
    pub accuracy: f64,
    pub macro_avg: AverageMetrics,
    pub weighted_avg: AverageMetrics,
}

impl ClassificationReport {
    pub fn from_confusion_matrix(cm: &ConfusionMatrix) -> ClassificationReport {
        let classes: Vec<ClassMetrics> = cm
            .labels()
            .iter()
            .enumerate()
            .map(|(idx, &label)| {
                let tp = cm.true_positives(idx) as f64;
                let precision = ratio(tp, cm.predicted(idx) as f64);
                let recall = ratio(tp, cm.support(idx) as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1,
                    support: cm.support(idx),
                }
            })
            .collect();

        let total = cm.total();
        let n_classes = classes.len() as f64;
        let macro_avg = AverageMetrics {
            precision: ratio(classes.iter().map(|c| c.precision).sum(), n_classes),
            recall: ratio(classes.iter().map(|c| c.recall).sum(), n_classes),
            f1: ratio(classes.iter().map(|c| c.f1).sum(), n_classes),
            support: total,
        };
        let weighted_avg = AverageMetrics {
            precision: support_weighted(&classes, total, |c| c.precision),
            recall: support_weighted(&classes, total, |c| c.recall),
            f1: support_weighted(&classes, total, |c| c.f1),
            support: total,
        };

        ClassificationReport {
            accuracy: cm.accuracy(),
            classes,
            macro_avg,
            weighted_avg,
        }
    }

    pub fn from_predictions(
        y_true: &[i64],
        y_pred: &[i64],
    ) -> Result<ClassificationReport, crate::ForestError> {
        let cm = ConfusionMatrix::from_predictions(y_true, y_pred)?;
        Ok(Self::from_confusion_matrix(&cm))
    }
}

/// fixed-width table with two decimal places:
/// ```text
///               precision    recall  f1-score   support
///
///           -1       1.00      0.50      0.67         2
/// ```
impl Display for ClassificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = self
            .classes
            .iter()
            .map(|c| c.label.to_string().len())
            .max()
            .unwrap_or_default()
            .max(WEIGHTED_AVG.len());

        write!(f, "{:>width$} ", "")?;
        for header in HEADERS {
            write!(f, " {header:>9}")?;
        }
        writeln!(f)?;
        writeln!(f)?;

        for c in self.classes.iter() {
            let name = c.label.to_string();
            write_row(f, &name, width, c.precision, c.recall, c.f1, c.support)?;
        }
        writeln!(f)?;

        let support = self.macro_avg.support;
        writeln!(
            f,
            "{:>width$}  {:>9} {:>9} {:>9.2} {support:>9}",
            "accuracy", "", "", self.accuracy
        )?;
        let m = &self.macro_avg;
        write_row(f, "macro avg", width, m.precision, m.recall, m.f1, m.support)?;
        let w = &self.weighted_avg;
        write!(
            f,
            "{WEIGHTED_AVG:>width$}  {:>9.2} {:>9.2} {:>9.2} {:>9}",
            w.precision, w.recall, w.f1, w.support
        )
    }
}

fn support_weighted<F>(classes: &[ClassMetrics], total: usize, score: F) -> f64
where
    F: Fn(&ClassMetrics) -> f64,
{
    ratio(
        classes.iter().map(|c| score(c) * c.support as f64).sum(),
        total as f64,
    )
}

fn write_row(
    f: &mut std::fmt::Formatter<'_>,
    name: &str,
    width: usize,
    precision: f64,
    recall: f64,
    f1: f64,
    support: usize,
) -> std::fmt::Result {
    writeln!(
        f,
        "{name:>width$}  {precision:>9.2} {recall:>9.2} {f1:>9.2} {support:>9}"
    )
}
