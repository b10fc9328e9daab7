use serde::{Deserialize, Serialize};

/// per-class sample weighting applied while growing trees.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ClassWeight {
    /// every sample has weight 1
    Uniform,
    /// weights inversely proportional to class frequency,
    /// `n_samples / (n_classes * count_c)`
    #[default]
    Balanced,
}

impl ClassWeight {
    /// weight of each class index given the class index of every sample.
    /// classes that never occur get weight 0.
    pub fn weights(&self, classes: &[usize], n_classes: usize) -> Vec<f64> {
        match self {
            ClassWeight::Uniform => vec![1.0; n_classes],
            ClassWeight::Balanced => {
                let mut counts = vec![0usize; n_classes];
                for &c in classes {
                    counts[c] += 1;
                }
                let n_samples = classes.len() as f64;
                counts
                    .iter()
                    .map(|&count| {
                        if count == 0 {
                            0.0
                        } else {
                            n_samples / (n_classes as f64 * count as f64)
                        }
                    })
                    .collect()
            }
        }
    }
}
