//! Geospatial utilities for ride search.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Batch distances from one origin to many points, with optional parallelism
//! - Strict coordinate validation for callers that want it
//!
//! # Example
//!
//! ```
//! use rideshare_geo::{haversine_distance, Coordinate};
//!
//! let coord1 = Coordinate::new(52.5200, 13.4050); // Berlin
//! let coord2 = Coordinate::new(48.8566, 2.3522);  // Paris
//!
//! let distance_km = haversine_distance(&coord1, &coord2);
//! assert!((distance_km - 878.0).abs() < 10.0); // ~878 km
//! ```

mod haversine;
pub mod batch;
mod error;

pub use haversine::{distance_km, haversine_distance, EARTH_RADIUS_KM};
pub use batch::distances_from;
pub use error::{GeoError, GeoErrorCode, Result};

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// No range checks are performed; distance calculations are defined for
    /// any finite pair of values.
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate, rejecting values outside the valid ranges.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coord = Self::new(latitude, longitude);
        if coord.is_valid() {
            Ok(coord)
        } else {
            Err(GeoError::InvalidCoordinate(format!("({latitude}, {longitude})")))
        }
    }

    /// Returns true if the coordinate has valid values.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}
