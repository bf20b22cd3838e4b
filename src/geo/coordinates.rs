//! Validated geographic coordinates and the haversine distance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Fallback coordinates used when a caller has no better origin: the
/// geographic centre of Kazakhstan.
pub const BASE_COORDS: Coordinates = Coordinates {
    latitude: 48.0,
    longitude: 66.0,
};

/// Seeded cities and their coordinates.
const CITY_GAZETTEER: &[(&str, f64, f64)] = &[
    ("Almaty", 43.2220, 76.8512),
    ("Astana", 51.1694, 71.4491),
    ("Shymkent", 42.3419, 69.5901),
    ("Aktobe", 50.2833, 57.1667),
    ("Karaganda", 49.8014, 73.1059),
    ("Taraz", 42.9000, 71.3667),
    ("Pavlodar", 52.3000, 76.9500),
    ("Oskemen", 49.9500, 82.6167),
    ("Semey", 50.4111, 80.2275),
    ("Kostanay", 53.2167, 63.6333),
    ("Kyzylorda", 44.8500, 65.5167),
    ("Petropavl", 54.8667, 69.1500),
];

/// Errors returned while constructing coordinate values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum GeoError {
    /// Latitude outside the [-90, 90] degree range.
    #[error("latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),

    /// Longitude outside the [-180, 180] degree range.
    #[error("longitude {0} out of range [-180, 180]")]
    InvalidLongitude(f64),
}

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Creates a validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] when either component is outside its range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Returns the latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(self) -> f64 {
        self.latitude
    }

    /// Returns the longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(self) -> f64 {
        self.longitude
    }
}

/// Looks up the coordinates of a seeded city by name.
#[must_use]
pub fn city_coordinates(name: &str) -> Option<Coordinates> {
    CITY_GAZETTEER
        .iter()
        .find(|(city, _, _)| city.eq_ignore_ascii_case(name.trim()))
        .and_then(|&(_, latitude, longitude)| Coordinates::new(latitude, longitude).ok())
}

/// Haversine great-circle distance between two points, in kilometres,
/// rounded to one decimal place.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "great-circle distance is inherently floating point"
)]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat_delta = (to.latitude - from.latitude).to_radians();
    let lon_delta = (to.longitude - from.longitude).to_radians();

    let half_chord = (lat_delta / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (lon_delta / 2.0).sin().powi(2);
    let angular = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());

    (EARTH_RADIUS_KM * angular * 10.0).round() / 10.0
}
