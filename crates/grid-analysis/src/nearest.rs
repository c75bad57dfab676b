//! Nearest gridpoint lookup.
//!
//! Distance is the Chebyshev distance over degrees,
//! `max(|lon - lon0|, |lat - lat0|)`, not a geodesic distance.
//!
//! Ties are broken by scan order: latitude outer, longitude inner, first
//! cell reaching the minimum wins. The winner is therefore the tied cell
//! with the smallest latitude index, then the smallest longitude index.

use grid_common::{Dataset, Grid, GridError, GridIndex, GridResult, Location};

/// Find the cell of `grid` closest to `location`.
pub fn locate(location: &Location, grid: &Grid) -> GridResult<GridIndex> {
    location.validate()?;
    if grid.is_empty() {
        return Err(GridError::invalid_input("grid has no cells"));
    }

    let mut best: Option<(f64, GridIndex)> = None;
    for (y, &lat) in grid.latitude().iter().enumerate() {
        for (x, &lon) in grid.longitude().iter().enumerate() {
            let distance = location.chebyshev_degrees(lat, lon);
            if best.map_or(true, |(d, _)| distance < d) {
                best = Some((distance, GridIndex::new(x, y)));
            }
        }
    }

    let (distance, index) =
        best.ok_or_else(|| GridError::invalid_input("grid has no cells"))?;
    tracing::debug!(
        lat = location.latitude,
        lon = location.longitude,
        x = index.x,
        y = index.y,
        distance,
        "located nearest gridpoint"
    );
    Ok(index)
}

/// Find the closest cell of a dataset's grid, normalizing axis names first.
pub fn locate_in_dataset(location: &Location, dataset: &Dataset) -> GridResult<GridIndex> {
    let grid = Grid::from_dataset(dataset)?;
    locate(location, &grid)
}
