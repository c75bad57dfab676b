//! Time series at grid cells.

use chrono::{DateTime, Utc};
use grid_common::{
    normalize_axes, Dataset, Grid, GridError, GridIndex, GridResult, Location, LATITUDE,
    LONGITUDE, TIME,
};
use serde::{Deserialize, Serialize};

use crate::radius::PointSet;

/// Default fraction of missing steps at which a series is discarded.
pub const DEFAULT_MAX_MISSING_FRACTION: f64 = 0.25;

/// Values of one variable at one grid cell over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub variable: String,
    pub index: GridIndex,
    /// Center of the cell the series was taken from.
    pub location: Location,
    pub times: Vec<DateTime<Utc>>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }

    /// Fraction of steps that are missing (0 for an empty series).
    pub fn missing_fraction(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        self.missing_count() as f64 / self.values.len() as f64
    }

    /// True when at least `limit` of the steps are missing.
    pub fn is_mostly_missing(&self, limit: f64) -> bool {
        self.missing_count() as f64 >= self.values.len() as f64 * limit
    }
}

/// Series taken together for one selected point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    pub index: GridIndex,
    /// Center of the selected cell.
    pub location: Location,
    /// Whether this point is the cell nearest to the location of interest.
    pub is_main: bool,
    /// One series per requested variable, in request order.
    pub series: Vec<TimeSeries>,
}

impl PointSeries {
    /// The series of a variable at this point.
    pub fn get(&self, variable: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.variable == variable)
    }
}

/// Extract the time series of `variable` at a grid cell.
///
/// The variable must be defined over exactly time, latitude and longitude
/// (in any order).
pub fn extract_series(dataset: &Dataset, variable: &str, index: GridIndex) -> GridResult<TimeSeries> {
    let dataset = normalize_axes(dataset);
    let grid = Grid::from_dataset(&dataset)?;
    extract_from(&dataset, &grid, variable, index)
}

/// Extract series of `variables` for every point of a selection.
///
/// Points are screened on `screen_variable` (usually `rp`): when at least
/// `max_missing_fraction` of its steps are missing, every series of that
/// point is dropped, so the kept points are the same for all variables.
/// The point at `main` is flagged so it can be drawn apart from the rest.
pub fn series_for_points(
    dataset: &Dataset,
    variables: &[&str],
    screen_variable: &str,
    points: &PointSet,
    main: GridIndex,
    max_missing_fraction: f64,
) -> GridResult<Vec<PointSeries>> {
    let dataset = normalize_axes(dataset);
    let grid = Grid::from_dataset(&dataset)?;

    let mut out = Vec::with_capacity(points.len());
    for record in points {
        let screen = extract_from(&dataset, &grid, screen_variable, record.index)?;
        if screen.is_mostly_missing(max_missing_fraction) {
            tracing::warn!(
                lon = record.longitude,
                lat = record.latitude,
                variable = screen_variable,
                missing = screen.missing_count(),
                steps = screen.len(),
                "too many missing values, skipping point"
            );
            continue;
        }

        let series = variables
            .iter()
            .map(|&name| {
                if name == screen_variable {
                    Ok(screen.clone())
                } else {
                    extract_from(&dataset, &grid, name, record.index)
                }
            })
            .collect::<GridResult<Vec<_>>>()?;

        out.push(PointSeries {
            index: record.index,
            location: record.location(),
            is_main: record.index == main,
            series,
        });
    }
    Ok(out)
}

fn extract_from(
    dataset: &Dataset,
    grid: &Grid,
    name: &str,
    index: GridIndex,
) -> GridResult<TimeSeries> {
    let variable = dataset.require_variable(name)?;
    let positions = (
        variable.dim_position(TIME),
        variable.dim_position(LATITUDE),
        variable.dim_position(LONGITUDE),
    );
    let (Some(_), Some(lat_pos), Some(lon_pos)) = positions else {
        return Err(GridError::invalid_input(format!(
            "'{}' must be indexed by time, latitude and longitude, got {:?}",
            name, variable.dims
        )));
    };
    if variable.dims.len() != 3 {
        return Err(GridError::invalid_input(format!(
            "'{}' has extra dims {:?}; slice them first",
            name, variable.dims
        )));
    }

    let (ny, nx) = grid.shape();
    if index.y >= ny || index.x >= nx {
        return Err(GridError::invalid_input(format!(
            "cell ({}, {}) outside grid of shape ({}, {})",
            index.x, index.y, nx, ny
        )));
    }

    let shape = dataset.shape_of(name)?;
    let values = variable.values_at(&shape, &[(lat_pos, index.y), (lon_pos, index.x)]);
    let times = dataset.require_time()?.times.clone();

    Ok(TimeSeries {
        variable: name.to_string(),
        index,
        location: Location::new(grid.latitude()[index.y], grid.longitude()[index.x]),
        times,
        values,
    })
}
