use serde::{Serialize, Serializer};
use std::fmt::Display;

/// severity of a train delay. variants are declared in order of increasing
/// severity, so the derived ordering is the ordinal order of the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DelayClass {
    /// the train was canceled
    Canceled,
    /// no delay
    OnTime,
    /// up to 5 minutes late
    Minor,
    /// more than 5 and up to 15 minutes late
    Moderate,
    /// more than 15 minutes late
    Severe,
}

impl DelayClass {
    pub const ALL: [DelayClass; 5] = [
        DelayClass::Canceled,
        DelayClass::OnTime,
        DelayClass::Minor,
        DelayClass::Moderate,
        DelayClass::Severe,
    ];

    /// buckets a delay in minutes. negative values are the cancellation
    /// sentinel. bucket bounds are inclusive on the lower class, so 5 minutes
    /// is [`DelayClass::Minor`] and 15 minutes is [`DelayClass::Moderate`].
    /// NaN fails every comparison and lands in [`DelayClass::Severe`].
    pub fn from_minutes(minutes: f64) -> DelayClass {
        if minutes < 0.0 {
            DelayClass::Canceled
        } else if minutes == 0.0 {
            DelayClass::OnTime
        } else if minutes <= 5.0 {
            DelayClass::Minor
        } else if minutes <= 15.0 {
            DelayClass::Moderate
        } else {
            DelayClass::Severe
        }
    }

    /// the integer label of this class, -1 for cancellations and 0..=3 otherwise.
    pub fn code(&self) -> i64 {
        match self {
            DelayClass::Canceled => -1,
            DelayClass::OnTime => 0,
            DelayClass::Minor => 1,
            DelayClass::Moderate => 2,
            DelayClass::Severe => 3,
        }
    }

    pub fn from_code(code: i64) -> Option<DelayClass> {
        DelayClass::ALL.into_iter().find(|c| c.code() == code)
    }
}

impl Display for DelayClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for DelayClass {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.code())
    }
}

#[cfg(test)]
mod test {
    use super::DelayClass;

    #[test]
    fn test_boundaries_are_inclusive_on_lower_class() {
        assert_eq!(DelayClass::from_minutes(-1.0), DelayClass::Canceled);
        assert_eq!(DelayClass::from_minutes(-0.5), DelayClass::Canceled);
        assert_eq!(DelayClass::from_minutes(0.0), DelayClass::OnTime);
        assert_eq!(DelayClass::from_minutes(0.1), DelayClass::Minor);
        assert_eq!(DelayClass::from_minutes(5.0), DelayClass::Minor);
        assert_eq!(DelayClass::from_minutes(5.01), DelayClass::Moderate);
        assert_eq!(DelayClass::from_minutes(15.0), DelayClass::Moderate);
        assert_eq!(DelayClass::from_minutes(15.01), DelayClass::Severe);
        assert_eq!(DelayClass::from_minutes(240.0), DelayClass::Severe);
    }

    #[test]
    fn test_nan_is_severe() {
        assert_eq!(DelayClass::from_minutes(f64::NAN), DelayClass::Severe);
    }

    #[test]
    fn test_mapping_is_monotone_over_minutes() {
        let mut previous = DelayClass::from_minutes(-10.0);
        for step in -40..=400 {
            let minutes = step as f64 * 0.25;
            let current = DelayClass::from_minutes(minutes);
            assert!(previous <= current, "class decreased at {minutes} minutes");
            assert!((-1..=3).contains(&current.code()));
            previous = current;
        }
    }

    #[test]
    fn test_code_round_trip_and_serialization() {
        for class in DelayClass::ALL {
            assert_eq!(DelayClass::from_code(class.code()), Some(class));
        }
        assert_eq!(DelayClass::from_code(4), None);
        let json = serde_json::to_string(&DelayClass::Canceled).expect("should not fail");
        assert_eq!(json, "-1");
    }
}
