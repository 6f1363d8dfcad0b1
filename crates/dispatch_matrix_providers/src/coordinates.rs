use std::{fmt::Display, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid coordinates {0:?}, expected \"lat,lng\"")]
pub struct ParseCoordinatesError(String);

/// A WGS84 position, latitude and longitude in degrees.
#[derive(Serialize, Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Bit pattern of both components, usable as a hash key. `-0.0` and
    /// `0.0` map to the same key.
    pub fn key(&self) -> (u64, u64) {
        ((self.lat + 0.0).to_bits(), (self.lng + 0.0).to_bits())
    }
}

impl Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`.
impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCoordinatesError(value.to_string());

        let (lat, lng) = value.split_once(',').ok_or_else(invalid)?;
        let coordinates = Coordinates::new(
            lat.trim().parse().map_err(|_| invalid())?,
            lng.trim().parse().map_err(|_| invalid())?,
        );

        if !coordinates.is_valid() {
            return Err(invalid());
        }

        Ok(coordinates)
    }
}

impl From<&Coordinates> for geo::Point<f64> {
    fn from(value: &Coordinates) -> Self {
        geo::Point::new(value.lng, value.lat)
    }
}
