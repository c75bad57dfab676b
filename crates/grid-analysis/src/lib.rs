//! Spatial queries and classification over gridded forecast fields.
//!
//! This crate is the analysis core behind the hazard-monitoring plots. It
//! takes datasets supplied by a loading layer and produces the indices,
//! point sets and classified grids that the plotting side consumes:
//!
//! - **Nearest gridpoint**: Chebyshev-degree lookup of the cell closest to a
//!   location
//! - **Radius selection**: grid cells inside a planar-degree disc, flattened
//!   into point records
//! - **Return-period classes**: ordinal binning of return periods against a
//!   threshold schedule
//!
//! # Architecture
//!
//! ```text
//! Dataset (lat/lon or latitude/longitude)
//!      │
//!      ▼
//! normalize_axes ──► Grid::from_dataset
//!      │                   │
//!      │                   ├─► locate(location) ──► GridIndex
//!      │                   │                            │
//!      │                   │                            ├─► extract_series
//!      │                   │                            └─► return_level_curve
//!      │                   │
//!      ├─► select(center, radius) ──► PointSet ──► series_for_points
//!      │
//!      └─► classify(thresholds) ──► ClassifiedDataset
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_analysis::{classify, locate, select, AnalysisConfig, Grid, Location};
//!
//! let config = AnalysisConfig::from_env();
//! let grid = Grid::from_dataset(&dataset)?;
//! let index = locate(&Location::new(39.47, -0.38), &grid)?;
//! let points = select(&dataset, &Location::new(39.47, -0.38), config.radius_degrees)?;
//! let classes = classify(&dataset, &config.return_period_thresholds)?;
//! ```

pub mod config;
pub mod nearest;
pub mod predictors;
pub mod radius;
pub mod return_levels;
pub mod return_period;
pub mod stats;
pub mod timeseries;

// Re-export commonly used types at crate root
pub use config::AnalysisConfig;
pub use grid_common::{
    normalize_axes, Dataset, Grid, GridError, GridIndex, GridResult, Location, TimeAxis,
    TimeBounds, Variable, VariableAttrs,
};
pub use nearest::{locate, locate_in_dataset};
pub use predictors::{convert_variable, select_level, select_time, ConvertedField, PredictorKind};
pub use radius::{select, PointRecord, PointSet, DEFAULT_RADIUS_DEGREES};
pub use return_levels::{return_level_curve, ReturnLevelCurve};
pub use return_period::{
    classify, digitize, ClassifiedDataset, DEFAULT_THRESHOLDS, RP_CLASS_VARIABLE, RP_VARIABLE,
};
pub use stats::{summarize, FieldSummary};
pub use timeseries::{
    extract_series, series_for_points, PointSeries, TimeSeries, DEFAULT_MAX_MISSING_FRACTION,
};
