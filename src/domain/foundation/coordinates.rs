//! Geographic coordinates of a farm or plot.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates", into = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize, Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates coordinates, rejecting values outside [-90,90] / [-180,180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::out_of_range("latitude", -90.0, 90.0, latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::out_of_range(
                "longitude",
                -180.0,
                180.0,
                longitude,
            ));
        }
        Ok(Self { latitude, longitude })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = ValidationError;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinates> for RawCoordinates {
    fn from(c: Coordinates) -> Self {
        Self {
            latitude: c.latitude,
            longitude: c.longitude,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(Coordinates::new(90.0, 180.0).is_ok());
        assert!(Coordinates::new(-90.0, -180.0).is_ok());
        assert!(Coordinates::new(19.43, -99.13).is_ok());
    }

    #[test]
    fn rejects_latitude_out_of_range() {
        let err = Coordinates::new(90.5, 0.0).unwrap_err();
        assert_eq!(err.field(), "latitude");
    }

    #[test]
    fn rejects_longitude_out_of_range() {
        let err = Coordinates::new(0.0, -180.01).unwrap_err();
        assert_eq!(err.field(), "longitude");
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(Coordinates::new(f64::NAN, 0.0).is_err());
        assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn deserialization_validates_bounds() {
        let ok: Coordinates =
            serde_json::from_str(r#"{"latitude": 20.5, "longitude": -101.2}"#).unwrap();
        assert_eq!(ok.latitude(), 20.5);

        let bad = serde_json::from_str::<Coordinates>(r#"{"latitude": 120, "longitude": 0}"#);
        assert!(bad.is_err());
    }
}
