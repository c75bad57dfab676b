//! Configuration for the analysis core.
//!
//! The return-period threshold schedule here must match the discrete color
//! scale used by the return-period maps; nothing enforces that coupling.

use serde::{Deserialize, Serialize};

use crate::radius::DEFAULT_RADIUS_DEGREES;
use crate::return_period::DEFAULT_THRESHOLDS;
use crate::timeseries::DEFAULT_MAX_MISSING_FRACTION;

/// Configuration for the analysis core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Ascending return-period thresholds in years.
    pub return_period_thresholds: Vec<f64>,

    /// Radius of the point selection disc, in degrees.
    pub radius_degrees: f64,

    /// Fraction of missing steps at which a time series is discarded.
    pub max_missing_fraction: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            return_period_thresholds: DEFAULT_THRESHOLDS.to_vec(),
            radius_degrees: DEFAULT_RADIUS_DEGREES,
            max_missing_fraction: DEFAULT_MAX_MISSING_FRACTION,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("RP_THRESHOLDS") {
            if let Some(thresholds) = parse_thresholds(&val) {
                config.return_period_thresholds = thresholds;
            }
        }

        if let Ok(val) = std::env::var("SELECTION_RADIUS_DEGREES") {
            if let Ok(radius) = val.parse() {
                config.radius_degrees = radius;
            }
        }

        if let Ok(val) = std::env::var("MAX_MISSING_FRACTION") {
            if let Ok(fraction) = val.parse() {
                config.max_missing_fraction = fraction;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.return_period_thresholds.is_empty() {
            return Err("return_period_thresholds must not be empty".to_string());
        }

        if self
            .return_period_thresholds
            .windows(2)
            .any(|w| w[0] >= w[1])
        {
            return Err("return_period_thresholds must be strictly ascending".to_string());
        }

        if !(self.radius_degrees.is_finite() && self.radius_degrees > 0.0) {
            return Err("radius_degrees must be > 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.max_missing_fraction) {
            return Err("max_missing_fraction must be within 0-1".to_string());
        }

        Ok(())
    }
}

/// Parse a comma-separated threshold list such as "1,20,50,100,200".
fn parse_thresholds(s: &str) -> Option<Vec<f64>> {
    let parsed: Result<Vec<f64>, _> = s
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect();
    parsed.ok().filter(|v| !v.is_empty())
}
