//! Global summaries of a field.

use std::fmt;

use grid_common::Variable;
use serde::{Deserialize, Serialize};

/// Label used when a variable carries no `long_name`.
const DEFAULT_LABEL: &str = "Data array";

/// Global minimum and maximum of a variable, ignoring missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSummary {
    pub label: String,
    pub units: String,
    /// `None` when every value is missing.
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Summarize a variable's value range.
pub fn summarize(variable: &Variable) -> FieldSummary {
    let (min, max) = variable
        .values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((None, None), |(lo, hi): (Option<f64>, Option<f64>), &v| {
            (
                Some(lo.map_or(v, |lo| lo.min(v))),
                Some(hi.map_or(v, |hi| hi.max(v))),
            )
        });

    let summary = FieldSummary {
        label: variable
            .attrs
            .long_name
            .clone()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
        units: variable.attrs.units.clone().unwrap_or_default(),
        min,
        max,
    };
    tracing::info!("{}", summary);
    summary
}

impl fmt::Display for FieldSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_value = |v: Option<f64>| v.map_or_else(|| "nan".to_string(), |v| v.to_string());
        write!(
            f,
            "{} global minimum: {} {}\n{} global maximum: {} {}",
            self.label,
            fmt_value(self.min),
            self.units,
            self.label,
            fmt_value(self.max),
            self.units
        )
    }
}
