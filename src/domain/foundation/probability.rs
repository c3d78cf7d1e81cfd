//! Probability value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Confidence of a single hypothesis, between 0 and 100 inclusive.
///
/// Hypotheses are scored independently, so a set of probabilities does not
/// need to sum to 100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Probability(f64);

impl Probability {
    /// Zero percent.
    pub const ZERO: Self = Self(0.0);

    /// Creates a Probability, returning error if outside [0, 100].
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(0.0..=100.0).contains(&value) {
            return Err(ValidationError::out_of_range("probabilidad", 0.0, 100.0, value));
        }
        Ok(Self(value))
    }

    /// Returns the value on the 0-100 scale.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Probability {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_inclusive() {
        assert!(Probability::try_new(0.0).is_ok());
        assert!(Probability::try_new(42.5).is_ok());
        assert!(Probability::try_new(100.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        match Probability::try_new(101.0) {
            Err(ValidationError::OutOfRange { field, min, max, actual }) => {
                assert_eq!(field, "probabilidad");
                assert_eq!(min, 0.0);
                assert_eq!(max, 100.0);
                assert_eq!(actual, 101.0);
            }
            other => panic!("Expected OutOfRange error, got {:?}", other),
        }
        assert!(Probability::try_new(-0.1).is_err());
        assert!(Probability::try_new(f64::NAN).is_err());
    }

    #[test]
    fn deserializes_integers_and_floats() {
        let p: Probability = serde_json::from_str("85").unwrap();
        assert_eq!(p.value(), 85.0);
        let p: Probability = serde_json::from_str("12.5").unwrap();
        assert_eq!(p.value(), 12.5);
        assert!(serde_json::from_str::<Probability>("150").is_err());
    }

    #[test]
    fn displays_with_percent_sign() {
        assert_eq!(Probability::try_new(70.0).unwrap().to_string(), "70%");
    }
}
