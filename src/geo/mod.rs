//! Coordinate value types and great-circle distance.
//!
//! Tasks may carry a location so volunteers can judge how far away a
//! request is. Only the pure coordinate math and the static gazetteer of
//! seeded cities live here; geocoding lookups belong to the hosting
//! application.

mod coordinates;

pub use coordinates::{BASE_COORDS, Coordinates, GeoError, city_coordinates, distance_km};
