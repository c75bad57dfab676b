//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// A geographic bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Smallest box enclosing a disc of `radius` degrees around `center`.
    pub fn around(center: &Location, radius: f64) -> Self {
        Self {
            min_lon: center.longitude - radius,
            min_lat: center.latitude - radius,
            max_lon: center.longitude + radius,
            max_lat: center.latitude + radius,
        }
    }

    /// Box spanning the extremes of the given axes, or `None` if either is empty.
    pub fn from_axes(latitude: &[f64], longitude: &[f64]) -> Option<Self> {
        let (min_lat, max_lat) = extent(latitude)?;
        let (min_lon, max_lon) = extent(longitude)?;
        Some(Self::new(min_lon, min_lat, max_lon, max_lat))
    }

    /// Width in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Check if a point is contained within this bbox (edges included).
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.max_lon < other.min_lon
            || self.min_lon > other.max_lon
            || self.max_lat < other.min_lat
            || self.min_lat > other.max_lat)
    }
}

fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_around_center() {
        let bbox = BoundingBox::around(&Location::new(45.0, 7.0), 0.5);
        assert_eq!(bbox.min_lon, 6.5);
        assert_eq!(bbox.max_lon, 7.5);
        assert_eq!(bbox.min_lat, 44.5);
        assert_eq!(bbox.max_lat, 45.5);
        assert!((bbox.width() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_axes_handles_descending() {
        let bbox = BoundingBox::from_axes(&[50.0, 45.0, 40.0], &[5.0, 10.0]).unwrap();
        assert_eq!(bbox, BoundingBox::new(5.0, 40.0, 10.0, 50.0));
        assert!(BoundingBox::from_axes(&[], &[1.0]).is_none());
    }

    #[test]
    fn test_contains_includes_edges() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(bbox.contains(0.0, 10.0));
        assert!(bbox.contains(5.0, 5.0));
        assert!(!bbox.contains(10.1, 5.0));
    }

    #[test]
    fn test_intersects() {
        let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
        let c = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
