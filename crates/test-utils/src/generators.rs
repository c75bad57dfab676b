//! Test data generators for synthetic forecast datasets.
//!
//! These generators create predictable, verifiable data patterns that can
//! be used across the test suite. Grids are row-major with latitude as the
//! row and longitude as the column.

use chrono::{DateTime, Duration, Utc};
use grid_common::{Dataset, TimeAxis, TimeBounds, Variable};

use crate::fixtures::grid::GridSpec;
use crate::fixtures::time::reference_time;

/// Evenly spaced axis values: `start`, `start + step`, ...
pub fn regular_axis(start: f64, step: f64, count: usize) -> Vec<f64> {
    (0..count).map(|i| start + i as f64 * step).collect()
}

/// Creates a test grid with predictable values.
///
/// Each cell value is calculated as: `col * 1000 + row`
///
/// # Example
///
/// ```
/// use test_utils::create_test_grid;
///
/// let grid = create_test_grid(10, 5);
/// assert_eq!(grid.len(), 50);
/// assert_eq!(grid[0], 0.0);    // col=0, row=0
/// assert_eq!(grid[1], 1000.0); // col=1, row=0
/// assert_eq!(grid[10], 1.0);   // col=0, row=1
/// ```
pub fn create_test_grid(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            data.push((col * 1000 + row) as f64);
        }
    }
    data
}

/// Creates a grid with deterministic precipitation values in mm.
///
/// Most cells are dry; roughly a quarter get up to 50 mm.
pub fn create_precipitation_grid(width: usize, height: usize, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            let precip = if hash % 4 == 0 {
                (hash % 5000) as f64 / 100.0
            } else {
                0.0
            };
            data.push(precip);
        }
    }
    data
}

/// Creates a grid of return periods in years.
///
/// Values span 0 to 300 years, with about one cell in ten missing (NaN).
pub fn create_return_period_grid(width: usize, height: usize, seed: u32) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            let hash = simple_hash(col as u32, row as u32, seed);
            if hash % 10 == 0 {
                data.push(f64::NAN);
            } else {
                data.push((hash % 30_000) as f64 / 100.0);
            }
        }
    }
    data
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}

/// Creates a grid with NaN values at specified (col, row) positions, zeros elsewhere.
pub fn create_grid_with_nans(
    width: usize,
    height: usize,
    nan_positions: &[(usize, usize)],
) -> Vec<f64> {
    let mut data = vec![0.0; width * height];
    for &(col, row) in nan_positions {
        if col < width && row < height {
            data[row * width + col] = f64::NAN;
        }
    }
    data
}

/// Six-hourly accumulation steps starting at the reference time, with bounds.
///
/// Each step is stamped at the end of its 6 h window.
pub fn create_time_axis(steps: usize) -> TimeAxis {
    let start = reference_time();
    let times: Vec<DateTime<Utc>> = (1..=steps as i64)
        .map(|i| start + Duration::hours(6 * i))
        .collect();
    let bounds = times
        .iter()
        .map(|&end| TimeBounds::new(end - Duration::hours(6), end))
        .collect();
    TimeAxis::new(times).with_bounds(bounds)
}

/// A single 2-D precipitation field `tp` over `spec`, valued `col * 1000 + row`.
pub fn create_field_dataset(spec: &GridSpec) -> Dataset {
    Dataset::new()
        .with_coord("latitude", spec.latitude())
        .with_coord("longitude", spec.longitude())
        .with_variable(
            "tp",
            Variable::new(
                ["latitude", "longitude"],
                create_test_grid(spec.width, spec.height),
            )
            .with_long_name("Accumulated precipitation")
            .with_units("mm/6h"),
        )
}

/// A return-period dataset over `spec` with `steps` time steps.
///
/// Holds `rp` (years, with missing cells) and `tp` (mm) over
/// (time, latitude, longitude), plus time bounds.
pub fn create_rp_dataset(spec: &GridSpec, steps: usize, seed: u32) -> Dataset {
    let mut rp = Vec::with_capacity(steps * spec.size());
    let mut tp = Vec::with_capacity(steps * spec.size());
    for step in 0..steps {
        let step_seed = seed.wrapping_add(step as u32);
        rp.extend(create_return_period_grid(spec.width, spec.height, step_seed));
        tp.extend(create_precipitation_grid(spec.width, spec.height, step_seed));
    }

    Dataset::new()
        .with_coord("latitude", spec.latitude())
        .with_coord("longitude", spec.longitude())
        .with_time(create_time_axis(steps))
        .with_variable(
            "rp",
            Variable::new(["time", "latitude", "longitude"], rp)
                .with_long_name("Return period")
                .with_units("years"),
        )
        .with_variable(
            "tp",
            Variable::new(["time", "latitude", "longitude"], tp)
                .with_long_name("Accumulated precipitation")
                .with_units("mm/6h"),
        )
}

/// Rename `latitude`/`longitude` to the short `lat`/`lon` names.
pub fn with_short_axis_names(mut dataset: Dataset) -> Dataset {
    for (from, to) in [("latitude", "lat"), ("longitude", "lon")] {
        if let Some(values) = dataset.coords.remove(from) {
            dataset.coords.insert(to.to_string(), values);
        }
        for variable in dataset.data_vars.values_mut() {
            for dim in variable.dims.iter_mut().filter(|d| d.as_str() == from) {
                *dim = to.to_string();
            }
        }
    }
    dataset
}
