//! In-memory gridded datasets.
//!
//! A [`Dataset`] holds named numeric coordinate axes, an optional time axis
//! (with its `time_bnds` companion) and data variables. Each variable names
//! its dims and stores values in row-major order over them; NaN marks a
//! missing value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};
use crate::grid::TIME;

/// Start/end bounds of one time step (the `time_bnds` variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeBounds {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}

/// Time coordinate of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAxis {
    pub times: Vec<DateTime<Utc>>,
    /// Accumulation window of each step, when the source provides one.
    pub bounds: Option<Vec<TimeBounds>>,
}

impl TimeAxis {
    pub fn new(times: Vec<DateTime<Utc>>) -> Self {
        Self {
            times,
            bounds: None,
        }
    }

    pub fn with_bounds(mut self, bounds: Vec<TimeBounds>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Index of the step at exactly `time`.
    pub fn index_of(&self, time: &DateTime<Utc>) -> Option<usize> {
        self.times.iter().position(|t| t == time)
    }
}

/// Descriptive attributes carried by a variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableAttrs {
    pub long_name: Option<String>,
    pub units: Option<String>,
    pub standard_name: Option<String>,
}

/// A data variable: named dims and row-major values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    pub dims: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default)]
    pub attrs: VariableAttrs,
}

impl Variable {
    pub fn new<S: Into<String>>(dims: impl IntoIterator<Item = S>, values: Vec<f64>) -> Self {
        Self {
            dims: dims.into_iter().map(Into::into).collect(),
            values,
            attrs: VariableAttrs::default(),
        }
    }

    pub fn with_long_name(mut self, long_name: impl Into<String>) -> Self {
        self.attrs.long_name = Some(long_name.into());
        self
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.attrs.units = Some(units.into());
        self
    }

    pub fn with_standard_name(mut self, standard_name: impl Into<String>) -> Self {
        self.attrs.standard_name = Some(standard_name.into());
        self
    }

    /// Position of `dim` within this variable's dims.
    pub fn dim_position(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    pub fn has_dim(&self, dim: &str) -> bool {
        self.dim_position(dim).is_some()
    }

    /// Check whether the dims are exactly `expected`, in order.
    pub fn dims_are(&self, expected: &[&str]) -> bool {
        self.dims.len() == expected.len() && self.dims.iter().zip(expected).all(|(d, e)| d == e)
    }

    /// Values with some dims pinned to an index, in row-major order over the
    /// remaining dims. `fixed` holds `(dim position, index)` pairs and
    /// `shape` must be the variable's validated shape.
    pub fn values_at(&self, shape: &[usize], fixed: &[(usize, usize)]) -> Vec<f64> {
        let strides = row_major_strides(shape);
        let base: usize = fixed.iter().map(|&(pos, idx)| idx * strides[pos]).sum();
        let free: Vec<usize> = (0..shape.len())
            .filter(|pos| !fixed.iter().any(|&(f, _)| f == *pos))
            .collect();
        let count: usize = free.iter().map(|&pos| shape[pos]).product();

        let mut out = Vec::with_capacity(count);
        for k in 0..count {
            let mut rem = k;
            let mut offset = base;
            for &pos in free.iter().rev() {
                offset += (rem % shape[pos]) * strides[pos];
                rem /= shape[pos];
            }
            out.push(self.values[offset]);
        }
        out
    }
}

fn row_major_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len().saturating_sub(1)).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// A grid plus data variables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Numeric coordinate axes by name (latitude, longitude, plev, ...).
    pub coords: BTreeMap<String, Vec<f64>>,
    /// Time coordinate and its bounds.
    pub time: Option<TimeAxis>,
    /// Data variables by name.
    pub data_vars: BTreeMap<String, Variable>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_coord(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.coords.insert(name.into(), values);
        self
    }

    pub fn with_time(mut self, time: TimeAxis) -> Self {
        self.time = Some(time);
        self
    }

    pub fn with_variable(mut self, name: impl Into<String>, variable: Variable) -> Self {
        self.data_vars.insert(name.into(), variable);
        self
    }

    pub fn coord(&self, name: &str) -> Option<&[f64]> {
        self.coords.get(name).map(Vec::as_slice)
    }

    pub fn has_coord(&self, name: &str) -> bool {
        self.coords.contains_key(name)
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.data_vars.get(name)
    }

    /// Look up a variable, failing with `MissingVariable` if absent.
    pub fn require_variable(&self, name: &str) -> GridResult<&Variable> {
        self.data_vars
            .get(name)
            .ok_or_else(|| GridError::missing_variable(name))
    }

    /// Time axis, failing with `MissingAxis` if absent.
    pub fn require_time(&self) -> GridResult<&TimeAxis> {
        self.time.as_ref().ok_or_else(|| GridError::missing_axis(TIME))
    }

    /// Length of a dimension: the time axis for `time`, else a coordinate.
    pub fn dim_len(&self, dim: &str) -> GridResult<usize> {
        if dim == TIME {
            return self.require_time().map(TimeAxis::len);
        }
        self.coords
            .get(dim)
            .map(Vec::len)
            .ok_or_else(|| GridError::missing_axis(dim))
    }

    /// Shape of a variable, checked against its value count.
    pub fn shape_of(&self, name: &str) -> GridResult<Vec<usize>> {
        let variable = self.require_variable(name)?;
        let shape = variable
            .dims
            .iter()
            .map(|d| self.dim_len(d))
            .collect::<GridResult<Vec<_>>>()?;

        let expected: usize = shape.iter().product();
        if expected != variable.values.len() {
            return Err(GridError::invalid_input(format!(
                "variable '{}' has {} values but dims {:?} imply {}",
                name,
                variable.values.len(),
                variable.dims,
                expected
            )));
        }
        Ok(shape)
    }

    /// Select one index along `dim`, dropping that dim from the result.
    pub fn slice(&self, name: &str, dim: &str, index: usize) -> GridResult<Variable> {
        let shape = self.shape_of(name)?;
        let variable = self.require_variable(name)?;
        let pos = variable.dim_position(dim).ok_or_else(|| {
            GridError::invalid_input(format!("variable '{}' has no dim '{}'", name, dim))
        })?;
        if index >= shape[pos] {
            return Err(GridError::invalid_input(format!(
                "index {} out of range for dim '{}' of length {}",
                index, dim, shape[pos]
            )));
        }

        let values = variable.values_at(&shape, &[(pos, index)]);
        let dims = variable
            .dims
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pos)
            .map(|(_, d)| d.clone())
            .collect();

        Ok(Variable {
            dims,
            values,
            attrs: variable.attrs.clone(),
        })
    }
}
