//! Common test fixtures for hazard-grids tests.
//!
//! Pre-defined locations, grids and times representing common scenarios in
//! regional flood monitoring.

/// Locations of interest as (latitude, longitude) in degrees.
pub mod locations {
    /// Zaragoza, on the Ebro
    pub const ZARAGOZA: (f64, f64) = (41.65, -0.88);

    /// Lleida, on the Segre
    pub const LLEIDA: (f64, f64) = (41.62, 0.62);

    /// Valencia (south of the Ebro test grid)
    pub const VALENCIA: (f64, f64) = (39.47, -0.38);
}

/// Common grid specifications for testing.
pub mod grid {
    /// Regional 0.1 degree grid over the Ebro basin (40x40 cells).
    pub const EBRO_0P1: GridSpec = GridSpec {
        width: 40,
        height: 40,
        first_lon: -2.0,
        first_lat: 40.0,
        step: 0.1,
    };

    /// Coarse 1 degree grid, handy for hand-checked examples.
    pub const COARSE_1DEG: GridSpec = GridSpec {
        width: 5,
        height: 4,
        first_lon: -3.0,
        first_lat: 39.0,
        step: 1.0,
    };

    /// Regular grid specification for testing.
    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        /// Longitude count
        pub width: usize,
        /// Latitude count
        pub height: usize,
        pub first_lon: f64,
        pub first_lat: f64,
        /// Spacing in degrees along both axes
        pub step: f64,
    }

    impl GridSpec {
        /// Returns the total number of grid cells.
        pub fn size(&self) -> usize {
            self.width * self.height
        }

        /// Ascending latitude axis values.
        pub fn latitude(&self) -> Vec<f64> {
            crate::generators::regular_axis(self.first_lat, self.step, self.height)
        }

        /// Ascending longitude axis values.
        pub fn longitude(&self) -> Vec<f64> {
            crate::generators::regular_axis(self.first_lon, self.step, self.width)
        }
    }
}

/// Common time values for testing.
pub mod time {
    use chrono::{DateTime, TimeZone, Utc};

    /// A fixed reference time for tests
    pub const REFERENCE_TIME: &str = "2024-10-29T00:00:00Z";

    /// [`REFERENCE_TIME`] as a timestamp.
    pub fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 29, 0, 0, 0)
            .single()
            .unwrap_or_default()
    }
}

/// Return-period threshold schedules in years.
pub mod thresholds {
    /// Schedule used by the hazard maps
    pub const HAZARD_MAPS: [f64; 5] = [1.0, 20.0, 50.0, 100.0, 200.0];

    /// Finer schedule for short-duration events
    pub const SHORT_DURATION: [f64; 4] = [2.0, 5.0, 10.0, 25.0];
}
