use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// coarse temperature band used as a nominal feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempCategory {
    Cold,
    Mild,
    Warm,
}

impl TempCategory {
    /// below 0°C is cold, below 15°C is mild, everything else is warm.
    pub fn from_celsius(temperature: f64) -> TempCategory {
        if temperature < 0.0 {
            TempCategory::Cold
        } else if temperature < 15.0 {
            TempCategory::Mild
        } else {
            TempCategory::Warm
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TempCategory::Cold => "cold",
            TempCategory::Mild => "mild",
            TempCategory::Warm => "warm",
        }
    }
}

impl Display for TempCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
