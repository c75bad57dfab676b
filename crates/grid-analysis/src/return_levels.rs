//! Return-level curves at a grid cell.
//!
//! Return-level variables are named `rp<N>` (`rp2`, `rp50`, ...) and hold,
//! per cell, the value expected once every N years.

use grid_common::{
    normalize_axes, Dataset, Grid, GridError, GridIndex, GridResult, Location, LATITUDE,
    LONGITUDE,
};
use serde::{Deserialize, Serialize};

/// (return period in years, value) pairs for one cell, sorted by years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnLevelCurve {
    pub index: GridIndex,
    pub location: Location,
    pub levels: Vec<(f64, f64)>,
}

/// Years encoded in a return-level variable name, e.g. `rp50` -> 50.
///
/// Takes the first run of digits; names without digits are not return
/// levels.
fn parse_years(name: &str) -> Option<f64> {
    if !name.starts_with("rp") {
        return None;
    }
    let digits: String = name
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Collect every return level of a cell.
pub fn return_level_curve(dataset: &Dataset, index: GridIndex) -> GridResult<ReturnLevelCurve> {
    let dataset = normalize_axes(dataset);
    let grid = Grid::from_dataset(&dataset)?;
    let (ny, nx) = grid.shape();
    if index.y >= ny || index.x >= nx {
        return Err(GridError::invalid_input(format!(
            "cell ({}, {}) outside grid of shape ({}, {})",
            index.x, index.y, nx, ny
        )));
    }

    let mut levels = Vec::new();
    for (name, variable) in &dataset.data_vars {
        let Some(years) = parse_years(name) else {
            continue;
        };
        let (Some(lat_pos), Some(lon_pos)) = (
            variable.dim_position(LATITUDE),
            variable.dim_position(LONGITUDE),
        ) else {
            continue;
        };
        if variable.dims.len() != 2 {
            return Err(GridError::invalid_input(format!(
                "return level '{}' must be a 2-D field, got dims {:?}",
                name, variable.dims
            )));
        }
        let shape = dataset.shape_of(name)?;
        let value = variable.values_at(&shape, &[(lat_pos, index.y), (lon_pos, index.x)]);
        levels.push((years, value[0]));
    }

    if levels.is_empty() {
        return Err(GridError::missing_variable("rp<N> return levels"));
    }
    levels.sort_by(|a, b| a.0.total_cmp(&b.0));

    Ok(ReturnLevelCurve {
        index,
        location: Location::new(grid.latitude()[index.y], grid.longitude()[index.x]),
        levels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_common::Variable;

    fn levels_dataset() -> Dataset {
        let ds = Dataset::new()
            .with_coord("latitude", vec![39.0, 39.5])
            .with_coord("longitude", vec![-0.5]);
        [("rp2", 20.0), ("rp100", 90.0), ("rp10", 45.0), ("rp_class", 3.0)]
            .into_iter()
            .fold(ds, |ds, (name, base)| {
                ds.with_variable(
                    name,
                    Variable::new(["latitude", "longitude"], vec![base, base + 1.0]),
                )
            })
    }

    #[test]
    fn test_parse_years() {
        assert_eq!(parse_years("rp2"), Some(2.0));
        assert_eq!(parse_years("rp100"), Some(100.0));
        assert_eq!(parse_years("rp_20yr"), Some(20.0));
        assert_eq!(parse_years("rp"), None);
        assert_eq!(parse_years("rp_class"), None);
        assert_eq!(parse_years("tp6"), None);
    }

    #[test]
    fn test_curve_sorted_by_years() {
        let curve = return_level_curve(&levels_dataset(), GridIndex::new(0, 1)).unwrap();
        assert_eq!(curve.levels, vec![(2.0, 21.0), (10.0, 46.0), (100.0, 91.0)]);
        assert_eq!(curve.location, Location::new(39.5, -0.5));
    }

    #[test]
    fn test_curve_without_levels() {
        let ds = Dataset::new()
            .with_coord("latitude", vec![0.0])
            .with_coord("longitude", vec![0.0]);
        assert!(matches!(
            return_level_curve(&ds, GridIndex::new(0, 0)),
            Err(GridError::MissingVariable(_))
        ));
    }

    #[test]
    fn test_curve_index_out_of_range() {
        assert!(matches!(
            return_level_curve(&levels_dataset(), GridIndex::new(1, 0)),
            Err(GridError::InvalidInput(_))
        ));
    }
}
