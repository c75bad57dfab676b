//! Atmospheric predictor fields: unit conversion and level/time slicing.

use chrono::{DateTime, Utc};
use grid_common::{normalize_axes, Dataset, GridError, GridResult, Variable, TIME};
use serde::{Deserialize, Serialize};

/// Name of the pressure level axis (values in Pa).
pub const PLEV: &str = "plev";

/// Standard gravity, m/s^2.
const GRAVITY: f64 = 9.80665;

/// Known predictors, keyed by CF standard name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictorKind {
    MeanSeaLevelPressure,
    AirTemperature,
    EastwardWind,
    NorthwardWind,
    Geopotential,
    VerticalVelocity,
    SpecificHumidity,
}

impl PredictorKind {
    pub fn from_standard_name(name: &str) -> Option<Self> {
        match name {
            "air_pressure_at_mean_sea_level" => Some(Self::MeanSeaLevelPressure),
            "air_temperature" => Some(Self::AirTemperature),
            "eastward_wind" => Some(Self::EastwardWind),
            "northward_wind" => Some(Self::NorthwardWind),
            "geopotential" => Some(Self::Geopotential),
            "lagrangian_tendency_of_air_pressure" => Some(Self::VerticalVelocity),
            "specific_humidity" => Some(Self::SpecificHumidity),
            _ => None,
        }
    }

    /// Display name of the converted field.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::MeanSeaLevelPressure => "Mean sea level pressure",
            Self::AirTemperature => "Temperature",
            Self::EastwardWind => "U component of wind",
            Self::NorthwardWind => "V component of wind",
            Self::Geopotential => "Geopotential height",
            Self::VerticalVelocity => "Vertical velocity",
            Self::SpecificHumidity => "Specific humidity",
        }
    }

    /// Units after conversion.
    pub fn display_units(&self) -> &'static str {
        match self {
            Self::MeanSeaLevelPressure => "hPa",
            Self::AirTemperature => "C",
            Self::EastwardWind | Self::NorthwardWind => "m/s",
            Self::Geopotential => "dam",
            Self::VerticalVelocity => "Pa/s",
            Self::SpecificHumidity => "g/kg",
        }
    }

    /// Convert a value from the source units.
    pub fn convert(&self, value: f64) -> f64 {
        match self {
            // Pa -> hPa
            Self::MeanSeaLevelPressure => value / 100.0,
            // K -> C
            Self::AirTemperature => value - 273.15,
            // m^2/s^2 -> dam
            Self::Geopotential => value / GRAVITY / 10.0,
            // kg/kg -> g/kg
            Self::SpecificHumidity => value * 1000.0,
            Self::EastwardWind | Self::NorthwardWind | Self::VerticalVelocity => value,
        }
    }
}

/// A field ready for display: converted values plus name and units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedField {
    pub dims: Vec<String>,
    pub values: Vec<f64>,
    pub name: String,
    pub units: String,
}

/// Convert a predictor variable using its attributes.
///
/// A known `standard_name` is converted; an unknown one passes through
/// unlabelled. Without a standard name the `long_name` and `units` are kept.
pub fn convert_variable(variable: &Variable) -> ConvertedField {
    let attrs = &variable.attrs;
    let (values, name, units) = match (&attrs.standard_name, &attrs.long_name) {
        (Some(standard_name), _) => match PredictorKind::from_standard_name(standard_name) {
            Some(kind) => (
                variable.values.iter().map(|&v| kind.convert(v)).collect(),
                kind.display_name().to_string(),
                kind.display_units().to_string(),
            ),
            None => {
                tracing::warn!(%standard_name, "variable not in predictor list, passing through");
                (variable.values.clone(), String::new(), String::new())
            }
        },
        (None, Some(long_name)) => (
            variable.values.clone(),
            long_name.clone(),
            attrs.units.clone().unwrap_or_default(),
        ),
        (None, None) => (variable.values.clone(), String::new(), String::new()),
    };

    ConvertedField {
        dims: variable.dims.clone(),
        values,
        name,
        units,
    }
}

/// Select a pressure level given in hPa.
///
/// The `plev` axis holds Pa, so the level matched is `hpa * 100`.
pub fn select_level(dataset: &Dataset, variable: &str, hpa: f64) -> GridResult<Variable> {
    let dataset = normalize_axes(dataset);
    let plev = dataset
        .coord(PLEV)
        .ok_or_else(|| GridError::missing_axis(PLEV))?;
    let pa = hpa * 100.0;
    let index = plev
        .iter()
        .position(|&p| (p - pa).abs() < 1e-6)
        .ok_or_else(|| {
            GridError::invalid_input(format!("pressure level {} hPa not found in {}", hpa, PLEV))
        })?;
    dataset.slice(variable, PLEV, index)
}

/// Select the time step at exactly `time`.
pub fn select_time(dataset: &Dataset, variable: &str, time: &DateTime<Utc>) -> GridResult<Variable> {
    let dataset = normalize_axes(dataset);
    let index = dataset.require_time()?.index_of(time).ok_or_else(|| {
        GridError::invalid_input(format!("time {} not found", time.to_rfc3339()))
    })?;
    dataset.slice(variable, TIME, index)
}
