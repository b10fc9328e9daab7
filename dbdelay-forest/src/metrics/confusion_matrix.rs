use serde::Serialize;
use std::fmt::Display;

use crate::ForestError;

/// counts of (true label, predicted label) pairs. rows are true labels and
/// columns predicted labels, both in the order of `labels`, which is the
/// sorted union of the labels in either sequence.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ConfusionMatrix {
    labels: Vec<i64>,
    matrix: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    pub fn from_predictions(y_true: &[i64], y_pred: &[i64]) -> Result<Self, ForestError> {
        if y_true.len() != y_pred.len() {
            return Err(ForestError::LabelLengthMismatch {
                n_true: y_true.len(),
                n_pred: y_pred.len(),
            });
        }
        let mut labels: Vec<i64> = y_true.iter().chain(y_pred.iter()).copied().collect();
        labels.sort_unstable();
        labels.dedup();

        let mut matrix = vec![vec![0; labels.len()]; labels.len()];
        for (t, p) in y_true.iter().zip(y_pred) {
            // both are present in labels by construction
            if let (Ok(row), Ok(col)) = (labels.binary_search(t), labels.binary_search(p)) {
                matrix[row][col] += 1;
            }
        }
        Ok(Self { labels, matrix })
    }

    pub fn labels(&self) -> &[i64] {
        &self.labels
    }

    pub fn matrix(&self) -> &[Vec<usize>] {
        &self.matrix
    }

    /// count of samples with true label `actual` predicted as `predicted`
    pub fn count(&self, actual: i64, predicted: i64) -> usize {
        match (
            self.labels.binary_search(&actual),
            self.labels.binary_search(&predicted),
        ) {
            (Ok(row), Ok(col)) => self.matrix[row][col],
            _ => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// samples on the diagonal
    pub fn correct(&self) -> usize {
        (0..self.labels.len()).map(|i| self.matrix[i][i]).sum()
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct() as f64, self.total() as f64)
    }

    /// number of samples with the label at `idx` as true label
    pub fn support(&self, idx: usize) -> usize {
        self.matrix[idx].iter().sum()
    }

    /// number of samples predicted as the label at `idx`
    pub fn predicted(&self, idx: usize) -> usize {
        self.matrix.iter().map(|row| row[idx]).sum()
    }

    pub fn true_positives(&self, idx: usize) -> usize {
        self.matrix[idx][idx]
    }
}

/// `num / den`, or 0 when `den` is 0
pub(crate) fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

/// bracketed rows with right-aligned counts, e.g.
/// ```text
/// [[ 5  0]
///  [ 1 12]]
/// ```
impl Display for ConfusionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.matrix.is_empty() {
            return write!(f, "[]");
        }
        let width = self
            .matrix
            .iter()
            .flatten()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);
        let n_rows = self.matrix.len();
        for (idx, row) in self.matrix.iter().enumerate() {
            let prefix = if idx == 0 { "[[" } else { " [" };
            let cells: Vec<String> = row.iter().map(|v| format!("{v:>width$}")).collect();
            let suffix = if idx + 1 == n_rows { "]]" } else { "]\n" };
            write!(f, "{prefix}{}{suffix}", cells.join(" "))?;
        }
        Ok(())
    }
}
