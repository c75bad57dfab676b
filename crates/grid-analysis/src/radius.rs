//! Grid points within a radius of a center location.
//!
//! The disc is built in planar degree units: `(longitude, latitude)` is
//! treated as an x/y plane. Near the poles or across the anti-meridian the
//! result is only an approximation of a geodesic buffer. The disc is closed,
//! so a point exactly `radius` degrees away is selected.

use std::collections::BTreeMap;

use grid_common::{
    normalize_axes, BoundingBox, Dataset, Grid, GridError, GridIndex, GridResult, Location,
    Variable, LATITUDE, LONGITUDE,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default selection radius in degrees.
pub const DEFAULT_RADIUS_DEGREES: f64 = 0.2;

/// Relative padding of the prefilter box. `center ± radius` can round inside
/// a cell the exact distance test accepts, so the box is grown by this much
/// of the largest magnitude involved.
const PREFILTER_SLACK: f64 = 1e-9;

/// One grid cell flattened into a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    pub latitude: f64,
    pub longitude: f64,
    /// Cell index in the source grid.
    pub index: GridIndex,
    /// Values of every spatial variable at this cell, in row-major order over
    /// the variable's non-spatial dims (a single value for 2-D fields).
    pub attributes: BTreeMap<String, Vec<f64>>,
}

impl PointRecord {
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }

    /// All values of a variable at this cell.
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.attributes.get(name).map(Vec::as_slice)
    }

    /// The value of a 2-D variable at this cell.
    pub fn value(&self, name: &str) -> Option<f64> {
        match self.values(name)? {
            [v] => Some(*v),
            _ => None,
        }
    }
}

/// Records selected from a grid, in grid scan order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointSet {
    records: Vec<PointRecord>,
}

impl PointSet {
    pub fn new(records: Vec<PointRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    /// Record for a given grid cell, if selected.
    pub fn get(&self, index: GridIndex) -> Option<&PointRecord> {
        self.records.iter().find(|r| r.index == index)
    }

    pub fn contains(&self, index: GridIndex) -> bool {
        self.get(index).is_some()
    }

    /// Serialize the records as a JSON array for the plotting side.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records)
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a PointRecord;
    type IntoIter = std::slice::Iter<'a, PointRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// A variable prepared for per-cell extraction.
struct SpatialVariable<'a> {
    name: &'a str,
    variable: &'a Variable,
    shape: Vec<usize>,
    lat_pos: usize,
    lon_pos: usize,
}

/// Select the grid cells within `radius_degrees` of `center`.
///
/// Every variable defined over latitude and longitude is carried into the
/// records. An empty set is returned when no cell falls inside the disc.
pub fn select(dataset: &Dataset, center: &Location, radius_degrees: f64) -> GridResult<PointSet> {
    if !(radius_degrees.is_finite() && radius_degrees > 0.0) {
        return Err(GridError::invalid_input(format!(
            "radius must be a positive number of degrees, got {}",
            radius_degrees
        )));
    }
    center.validate()?;

    let dataset = normalize_axes(dataset);
    let grid = Grid::from_dataset(&dataset)?;
    let variables = spatial_variables(&dataset)?;

    // The box only narrows the scan; membership is decided by the distance test.
    let magnitude = center.latitude.abs().max(center.longitude.abs()) + radius_degrees;
    let disc_bbox = BoundingBox::around(center, radius_degrees + magnitude * PREFILTER_SLACK);
    if !grid.bbox().is_some_and(|b| b.intersects(&disc_bbox)) {
        tracing::debug!(
            lat = center.latitude,
            lon = center.longitude,
            radius_degrees,
            "selection disc does not overlap grid"
        );
        return Ok(PointSet::default());
    }

    let latitude = grid.latitude();
    let longitude = grid.longitude();
    let records: Vec<PointRecord> = (0..latitude.len())
        .into_par_iter()
        .filter(|&y| latitude[y] >= disc_bbox.min_lat && latitude[y] <= disc_bbox.max_lat)
        .flat_map_iter(|y| {
            let lat = latitude[y];
            let variables = &variables;
            longitude.iter().enumerate().filter_map(move |(x, &lon)| {
                let inside = disc_bbox.contains(lon, lat)
                    && center.planar_degrees(lat, lon) <= radius_degrees;
                inside.then(|| flatten_cell(variables, lat, lon, GridIndex::new(x, y)))
            })
        })
        .collect();

    tracing::debug!(
        lat = center.latitude,
        lon = center.longitude,
        radius_degrees,
        selected = records.len(),
        cells = grid.len(),
        "selected grid points within radius"
    );

    Ok(PointSet::new(records))
}

fn spatial_variables(dataset: &Dataset) -> GridResult<Vec<SpatialVariable<'_>>> {
    let mut out = Vec::new();
    for (name, variable) in &dataset.data_vars {
        let (Some(lat_pos), Some(lon_pos)) = (
            variable.dim_position(LATITUDE),
            variable.dim_position(LONGITUDE),
        ) else {
            tracing::debug!(variable = %name, "skipping variable without spatial dims");
            continue;
        };
        out.push(SpatialVariable {
            name,
            variable,
            shape: dataset.shape_of(name)?,
            lat_pos,
            lon_pos,
        });
    }
    Ok(out)
}

fn flatten_cell(
    variables: &[SpatialVariable<'_>],
    latitude: f64,
    longitude: f64,
    index: GridIndex,
) -> PointRecord {
    let attributes = variables
        .iter()
        .map(|v| {
            let values = v
                .variable
                .values_at(&v.shape, &[(v.lat_pos, index.y), (v.lon_pos, index.x)]);
            (v.name.to_string(), values)
        })
        .collect();

    PointRecord {
        latitude,
        longitude,
        index,
        attributes,
    }
}
