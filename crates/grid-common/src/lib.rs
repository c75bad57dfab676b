//! Common types shared across the gridded forecast analysis crates.

pub mod bbox;
pub mod dataset;
pub mod error;
pub mod grid;
pub mod location;

pub use bbox::BoundingBox;
pub use dataset::{Dataset, TimeAxis, TimeBounds, Variable, VariableAttrs};
pub use error::{GridError, GridResult};
pub use grid::{normalize_axes, Grid, LATITUDE, LAT_ALIAS, LONGITUDE, LON_ALIAS, TIME};
pub use location::{GridIndex, Location};
