//! Geographic locations and grid cell indices.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// A (latitude, longitude) pair in degrees, WGS84-equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Create a new location.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that both coordinates are finite.
    pub fn validate(&self) -> GridResult<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(GridError::invalid_input(format!(
                "location ({}, {}) has non-finite coordinates",
                self.latitude, self.longitude
            )));
        }
        Ok(())
    }

    /// Max of the per-axis absolute differences, in degrees.
    ///
    /// This is not a geodesic distance: longitude and latitude degrees are
    /// compared as if they had the same length.
    pub fn chebyshev_degrees(&self, latitude: f64, longitude: f64) -> f64 {
        let dlon = (longitude - self.longitude).abs();
        let dlat = (latitude - self.latitude).abs();
        dlon.max(dlat)
    }

    /// Planar distance in degrees, treating (longitude, latitude) as x/y.
    pub fn planar_degrees(&self, latitude: f64, longitude: f64) -> f64 {
        (longitude - self.longitude).hypot(latitude - self.latitude)
    }
}

/// Index of a grid cell.
///
/// `x` indexes the longitude axis and `y` the latitude axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridIndex {
    pub x: usize,
    pub y: usize,
}

impl GridIndex {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}
