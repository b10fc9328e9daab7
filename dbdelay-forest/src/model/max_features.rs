use serde::{Deserialize, Serialize};

/// number of candidate features drawn when searching for the best split.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    #[default]
    Sqrt,
    Log2,
    All,
    Count(usize),
}

impl MaxFeatures {
    /// resolves to a feature count in `[1, n_features]` (0 only when there
    /// are no features).
    pub fn resolve(&self, n_features: usize) -> usize {
        let n = match self {
            MaxFeatures::Sqrt => (n_features as f64).sqrt().floor() as usize,
            MaxFeatures::Log2 => (n_features as f64).log2().floor() as usize,
            MaxFeatures::All => n_features,
            MaxFeatures::Count(count) => *count,
        };
        n.max(1).min(n_features)
    }
}

#[cfg(test)]
mod test {
    use super::MaxFeatures;

    #[test]
    fn test_resolve() {
        assert_eq!(MaxFeatures::Sqrt.resolve(50), 7);
        assert_eq!(MaxFeatures::Sqrt.resolve(2), 1);
        assert_eq!(MaxFeatures::Log2.resolve(50), 5);
        assert_eq!(MaxFeatures::All.resolve(50), 50);
        assert_eq!(MaxFeatures::Count(80).resolve(50), 50);
        assert_eq!(MaxFeatures::Count(0).resolve(50), 1);
        assert_eq!(MaxFeatures::Sqrt.resolve(0), 0);
    }

    #[test]
    fn test_deserialize() {
        let sqrt: MaxFeatures = serde_json::from_str(r#""sqrt""#).expect("should not fail");
        assert_eq!(sqrt, MaxFeatures::Sqrt);
        let count: MaxFeatures = serde_json::from_str(r#"{"count": 4}"#).expect("should not fail");
        assert_eq!(count, MaxFeatures::Count(4));
    }
}
