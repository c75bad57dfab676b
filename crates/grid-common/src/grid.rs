//! Regular latitude/longitude grids and axis-name normalization.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::dataset::Dataset;
use crate::error::{GridError, GridResult};

/// Canonical latitude axis name.
pub const LATITUDE: &str = "latitude";
/// Canonical longitude axis name.
pub const LONGITUDE: &str = "longitude";
/// Short latitude name some sources use.
pub const LAT_ALIAS: &str = "lat";
/// Short longitude name some sources use.
pub const LON_ALIAS: &str = "lon";
/// Time axis name.
pub const TIME: &str = "time";

/// Rename `lat`/`lon` axes to `latitude`/`longitude`.
///
/// Only applies when both short names are present and neither canonical name
/// is; otherwise the dataset is returned untouched (borrowed), so an existing
/// `latitude` or `longitude` axis is never overwritten. Variable dims are
/// renamed along with the coordinates. Idempotent.
pub fn normalize_axes(dataset: &Dataset) -> Cow<'_, Dataset> {
    if !(dataset.has_coord(LAT_ALIAS) && dataset.has_coord(LON_ALIAS)) {
        return Cow::Borrowed(dataset);
    }
    if dataset.has_coord(LATITUDE) || dataset.has_coord(LONGITUDE) {
        tracing::warn!("dataset has both short and canonical axis names, not renaming");
        return Cow::Borrowed(dataset);
    }

    let mut renamed = dataset.clone();
    for (from, to) in [(LAT_ALIAS, LATITUDE), (LON_ALIAS, LONGITUDE)] {
        if let Some(values) = renamed.coords.remove(from) {
            renamed.coords.insert(to.to_string(), values);
        }
        for variable in renamed.data_vars.values_mut() {
            for dim in variable.dims.iter_mut().filter(|d| d.as_str() == from) {
                *dim = to.to_string();
            }
        }
    }

    tracing::debug!("renamed lat/lon axes to latitude/longitude");
    Cow::Owned(renamed)
}

/// A validated regular latitude/longitude grid.
///
/// Cells are addressed by `(latitude index, longitude index)`; the natural
/// scan order is row-major with latitude outer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    latitude: Vec<f64>,
    longitude: Vec<f64>,
}

impl Grid {
    /// Build a grid from axis values. All values must be finite.
    pub fn new(latitude: Vec<f64>, longitude: Vec<f64>) -> GridResult<Self> {
        for (name, axis) in [(LATITUDE, &latitude), (LONGITUDE, &longitude)] {
            if let Some(bad) = axis.iter().find(|v| !v.is_finite()) {
                return Err(GridError::invalid_input(format!(
                    "{} axis contains non-finite value {}",
                    name, bad
                )));
            }
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Extract the grid of a dataset, normalizing axis names first.
    pub fn from_dataset(dataset: &Dataset) -> GridResult<Self> {
        let dataset = normalize_axes(dataset);
        let latitude = dataset
            .coord(LATITUDE)
            .ok_or_else(|| GridError::missing_axis(LATITUDE))?;
        let longitude = dataset
            .coord(LONGITUDE)
            .ok_or_else(|| GridError::missing_axis(LONGITUDE))?;
        Self::new(latitude.to_vec(), longitude.to_vec())
    }

    pub fn latitude(&self) -> &[f64] {
        &self.latitude
    }

    pub fn longitude(&self) -> &[f64] {
        &self.longitude
    }

    /// Grid dimensions as (latitude count, longitude count).
    pub fn shape(&self) -> (usize, usize) {
        (self.latitude.len(), self.longitude.len())
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.latitude.len() * self.longitude.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extent of the grid, or `None` when it has no cells.
    pub fn bbox(&self) -> Option<BoundingBox> {
        BoundingBox::from_axes(&self.latitude, &self.longitude)
    }
}
