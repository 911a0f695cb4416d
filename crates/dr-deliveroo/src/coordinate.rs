use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// A latitude/longitude pair.
///
/// The textual form is kept exactly as it was provided so it can be sent in
/// query parameters unchanged. Coordinates built from numbers use the
/// shortest representation that round-trips.
#[derive(Clone, Debug)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
    latitude_text: String,
    longitude_text: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid {component} `{text}`: not a decimal number")]
pub struct CoordinateParseError {
    pub component: &'static str,
    pub text: String,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            latitude_text: latitude.to_string(),
            longitude_text: longitude.to_string(),
        }
    }

    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateParseError> {
        Ok(Self {
            latitude: parse_component("latitude", latitude)?,
            longitude: parse_component("longitude", longitude)?,
            latitude_text: latitude.to_string(),
            longitude_text: longitude.to_string(),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_text(&self) -> &str {
        &self.latitude_text
    }

    pub fn longitude_text(&self) -> &str {
        &self.longitude_text
    }
}

fn parse_component(component: &'static str, text: &str) -> Result<f64, CoordinateParseError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CoordinateParseError {
            component,
            text: text.to_string(),
        })
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        (self.latitude - other.latitude).abs() < f64::EPSILON
            && (self.longitude - other.longitude).abs() < f64::EPSILON
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude_text, self.longitude_text)
    }
}

impl Serialize for Coordinate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.latitude, self.longitude].serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsed_equals_numeric() {
        let parsed = Coordinate::parse("52.5166791", "13.4584727").unwrap();
        let numeric = Coordinate::new(52.5166791, 13.4584727);
        assert_eq!(parsed, numeric);
        assert_eq!(parsed.latitude_text(), "52.5166791");
        assert_eq!(parsed.longitude_text(), "13.4584727");
    }

    #[test]
    fn parse_keeps_text_verbatim() {
        let coordinate = Coordinate::parse("52.50", "-0.1000").unwrap();
        assert_eq!(coordinate.latitude_text(), "52.50");
        assert_eq!(coordinate.longitude_text(), "-0.1000");
        assert_eq!(coordinate.latitude(), 52.5);
        assert_eq!(coordinate.longitude(), -0.1);
    }

    #[test]
    fn numeric_text_round_trips() {
        let coordinate = Coordinate::new(52.5166791, 13.4584727);
        assert_eq!(coordinate.latitude_text(), "52.5166791");
        assert_eq!(coordinate.longitude_text(), "13.4584727");
    }

    #[test]
    fn parse_invalid_latitude() {
        let err = Coordinate::parse("north", "13.4").unwrap_err();
        assert_eq!(
            err,
            CoordinateParseError {
                component: "latitude",
                text: "north".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_non_finite() {
        let err = Coordinate::parse("52.5", "inf").unwrap_err();
        assert_eq!(err.component, "longitude");
        assert!(Coordinate::parse("NaN", "1").is_err());
    }

    #[test]
    fn display_uses_text() {
        let coordinate = Coordinate::parse("52.50", "13.40").unwrap();
        assert_eq!(coordinate.to_string(), "52.50,13.40");
    }
}
