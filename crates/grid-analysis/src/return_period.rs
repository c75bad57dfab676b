//! Return-period classification.
//!
//! A continuous return-period field (`rp`, in years) is binned against an
//! ascending threshold schedule. Bins are left-inclusive: the class of a
//! value is the number of thresholds it is greater than or equal to, so a
//! value equal to a threshold lands in that threshold's class. Missing
//! values are treated as 0 before binning and fall into the lowest class.

use grid_common::{
    normalize_axes, Dataset, Grid, GridError, GridResult, TimeAxis, TimeBounds, Variable,
    VariableAttrs, LATITUDE, LONGITUDE, TIME,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default return-period thresholds in years.
pub const DEFAULT_THRESHOLDS: [f64; 5] = [1.0, 20.0, 50.0, 100.0, 200.0];

/// Name of the continuous return-period variable.
pub const RP_VARIABLE: &str = "rp";

/// Name of the classified variable.
pub const RP_CLASS_VARIABLE: &str = "rp_class";

/// Name of the time bounds variable.
pub const TIME_BNDS: &str = "time_bnds";

/// Class values are stored as i8.
const MAX_THRESHOLDS: usize = i8::MAX as usize;

/// Class of a single value: the number of thresholds `t` with `value >= t`.
///
/// `thresholds` must be sorted ascending. NaN is treated as 0.
pub fn digitize(value: f64, thresholds: &[f64]) -> i8 {
    let value = if value.is_nan() { 0.0 } else { value };
    thresholds.partition_point(|&t| t <= value) as i8
}

fn validate_thresholds(thresholds: &[f64]) -> GridResult<()> {
    if thresholds.is_empty() {
        return Err(GridError::invalid_input("threshold list is empty"));
    }
    if thresholds.len() > MAX_THRESHOLDS {
        return Err(GridError::invalid_input(format!(
            "at most {} thresholds are supported, got {}",
            MAX_THRESHOLDS,
            thresholds.len()
        )));
    }
    if thresholds.iter().any(|t| !t.is_finite()) {
        return Err(GridError::invalid_input("thresholds must be finite"));
    }
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(GridError::invalid_input(format!(
            "thresholds must be strictly ascending, got {:?}",
            thresholds
        )));
    }
    Ok(())
}

/// Return-period classes over (time, latitude, longitude).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedDataset {
    /// Time axis, with the source `time_bnds` carried through unchanged.
    pub time: TimeAxis,
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
    /// Class values, row-major over (time, latitude, longitude).
    pub rp_class: Vec<i8>,
    pub attrs: VariableAttrs,
    /// Threshold schedule the classes were computed against.
    pub thresholds: Vec<f64>,
}

impl ClassifiedDataset {
    /// Dimensions as (time, latitude, longitude).
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.time.len(), self.latitude.len(), self.longitude.len())
    }

    /// Class at a time step and cell (`y` latitude index, `x` longitude index).
    pub fn get(&self, t: usize, y: usize, x: usize) -> Option<i8> {
        let (nt, ny, nx) = self.shape();
        if t >= nt || y >= ny || x >= nx {
            return None;
        }
        self.rp_class.get((t * ny + y) * nx + x).copied()
    }

    /// The `time_bnds` of the source dataset.
    pub fn time_bnds(&self) -> &[TimeBounds] {
        self.time.bounds.as_deref().unwrap_or_default()
    }

    /// Number of classes: one more than the number of thresholds.
    pub fn class_count(&self) -> usize {
        self.thresholds.len() + 1
    }

    /// Number of values in each class. Values outside `0..class_count()`
    /// are not counted.
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; self.class_count()];
        for &c in &self.rp_class {
            if let Some(count) = usize::try_from(c).ok().and_then(|i| counts.get_mut(i)) {
                *count += 1;
            }
        }
        counts
    }

    /// Convert back into a generic dataset holding only `rp_class`.
    pub fn to_dataset(&self) -> Dataset {
        let mut variable = Variable::new(
            [TIME, LATITUDE, LONGITUDE],
            self.rp_class.iter().map(|&c| f64::from(c)).collect(),
        );
        variable.attrs = self.attrs.clone();

        Dataset::new()
            .with_coord(LATITUDE, self.latitude.clone())
            .with_coord(LONGITUDE, self.longitude.clone())
            .with_time(self.time.clone())
            .with_variable(RP_CLASS_VARIABLE, variable)
    }
}

/// Classify the `rp` variable of `dataset` against `thresholds`.
///
/// The result keeps only the classes, the time/latitude/longitude axes and
/// `time_bnds`; every other variable is dropped.
pub fn classify(dataset: &Dataset, thresholds: &[f64]) -> GridResult<ClassifiedDataset> {
    validate_thresholds(thresholds)?;
    tracing::info!(?thresholds, "using return period thresholds (years)");

    let dataset = normalize_axes(dataset);
    let rp = dataset.require_variable(RP_VARIABLE)?;
    if !rp.dims_are(&[TIME, LATITUDE, LONGITUDE]) {
        return Err(GridError::invalid_input(format!(
            "'{}' must be indexed by (time, latitude, longitude), got {:?}",
            RP_VARIABLE, rp.dims
        )));
    }

    let time = dataset.require_time()?;
    let bounds = time
        .bounds
        .as_ref()
        .ok_or_else(|| GridError::missing_variable(TIME_BNDS))?;
    if bounds.len() != time.len() {
        return Err(GridError::invalid_input(format!(
            "{} has {} entries for {} time steps",
            TIME_BNDS,
            bounds.len(),
            time.len()
        )));
    }

    let grid = Grid::from_dataset(&dataset)?;
    dataset.shape_of(RP_VARIABLE)?;

    let rp_class: Vec<i8> = rp
        .values
        .par_iter()
        .map(|&v| digitize(v, thresholds))
        .collect();

    tracing::debug!(
        values = rp_class.len(),
        max_class = rp_class.iter().copied().max().unwrap_or(0),
        "classified return periods"
    );

    Ok(ClassifiedDataset {
        time: time.clone(),
        latitude: grid.latitude().to_vec(),
        longitude: grid.longitude().to_vec(),
        rp_class,
        attrs: VariableAttrs {
            long_name: Some("Return period class".to_string()),
            units: Some("class".to_string()),
            standard_name: None,
        },
        thresholds: thresholds.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn rp_dataset(values: Vec<f64>) -> Dataset {
        let t0 = Utc.with_ymd_and_hms(2024, 10, 29, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 10, 29, 6, 0, 0).unwrap();
        let axis = TimeAxis::new(vec![t1]).with_bounds(vec![TimeBounds::new(t0, t1)]);
        let n = values.len();
        Dataset::new()
            .with_coord("latitude", vec![39.5])
            .with_coord("longitude", (0..n).map(|i| i as f64 * 0.1).collect())
            .with_time(axis)
            .with_variable("rp", Variable::new(["time", "latitude", "longitude"], values))
            .with_variable(
                "tp",
                Variable::new(["time", "latitude", "longitude"], vec![0.0; n]),
            )
    }

    #[test]
    fn test_digitize_left_inclusive() {
        let t = DEFAULT_THRESHOLDS;
        assert_eq!(digitize(20.0, &t), 2);
        assert_eq!(digitize(19.999, &t), 1);
        assert_eq!(digitize(0.0, &t), 0);
        assert_eq!(digitize(1.0, &t), 1);
        assert_eq!(digitize(200.0, &t), 5);
        assert_eq!(digitize(500.0, &t), 5);
        assert_eq!(digitize(f64::NAN, &t), 0);
        assert_eq!(digitize(f64::INFINITY, &t), 5);
        assert_eq!(digitize(-3.0, &t), 0);
    }

    #[test]
    fn test_classify_values() {
        let ds = rp_dataset(vec![0.0, 19.999, 20.0, 75.0, 500.0, f64::NAN]);
        let classes = classify(&ds, &DEFAULT_THRESHOLDS).unwrap();
        assert_eq!(classes.rp_class, vec![0, 1, 2, 3, 5, 0]);
        assert_eq!(classes.shape(), (1, 1, 6));
        assert_eq!(classes.get(0, 0, 2), Some(2));
        assert_eq!(classes.get(0, 0, 6), None);
        assert_eq!(classes.histogram(), vec![2, 1, 1, 1, 0, 1]);
    }

    #[test]
    fn test_histogram_ignores_out_of_range_classes() {
        let mut classes = classify(&rp_dataset(vec![0.0, 20.0, 75.0]), &DEFAULT_THRESHOLDS).unwrap();
        classes.rp_class = vec![-1, 0, 2, 6, i8::MAX];
        assert_eq!(classes.histogram(), vec![1, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_classify_carries_metadata() {
        let ds = rp_dataset(vec![5.0, 50.0]);
        let classes = classify(&ds, &DEFAULT_THRESHOLDS).unwrap();
        let source_time = ds.time.as_ref().unwrap();
        assert_eq!(&classes.time, source_time);
        assert_eq!(classes.time_bnds(), source_time.bounds.as_deref().unwrap());
        assert_eq!(classes.latitude, vec![39.5]);
        assert_eq!(classes.longitude, vec![0.0, 0.1]);
        assert_eq!(classes.attrs.long_name.as_deref(), Some("Return period class"));
        assert_eq!(classes.attrs.units.as_deref(), Some("class"));
        assert_eq!(classes.thresholds, DEFAULT_THRESHOLDS.to_vec());

        let out = classes.to_dataset();
        assert_eq!(out.data_vars.len(), 1);
        assert!(out.variable(RP_CLASS_VARIABLE).is_some());
        assert!(out.variable("tp").is_none());
    }

    #[test]
    fn test_classify_missing_rp() {
        let mut ds = rp_dataset(vec![1.0]);
        ds.data_vars.remove("rp");
        assert_eq!(
            classify(&ds, &DEFAULT_THRESHOLDS),
            Err(GridError::MissingVariable("rp".to_string()))
        );
    }

    #[test]
    fn test_classify_missing_time_bnds() {
        let mut ds = rp_dataset(vec![1.0]);
        ds.time.as_mut().unwrap().bounds = None;
        assert_eq!(
            classify(&ds, &DEFAULT_THRESHOLDS),
            Err(GridError::MissingVariable("time_bnds".to_string()))
        );
    }

    #[test]
    fn test_classify_missing_time_axis() {
        let mut ds = rp_dataset(vec![1.0]);
        ds.time = None;
        assert_eq!(
            classify(&ds, &DEFAULT_THRESHOLDS),
            Err(GridError::MissingAxis("time".to_string()))
        );
    }

    #[test]
    fn test_classify_rejects_bad_thresholds() {
        let ds = rp_dataset(vec![1.0]);
        for thresholds in [vec![], vec![1.0, 1.0], vec![20.0, 1.0], vec![1.0, f64::NAN]] {
            assert!(matches!(
                classify(&ds, &thresholds),
                Err(GridError::InvalidInput(_))
            ));
        }
        let too_many: Vec<f64> = (0..128).map(f64::from).collect();
        assert!(matches!(
            classify(&ds, &too_many),
            Err(GridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_classify_rejects_wrong_dims() {
        let mut ds = rp_dataset(vec![1.0, 2.0]);
        ds.data_vars.get_mut("rp").unwrap().dims =
            vec!["time".into(), "longitude".into(), "latitude".into()];
        assert!(matches!(
            classify(&ds, &DEFAULT_THRESHOLDS),
            Err(GridError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_classify_short_axis_names() {
        let mut ds = rp_dataset(vec![25.0]);
        let lat = ds.coords.remove("latitude").unwrap();
        let lon = ds.coords.remove("longitude").unwrap();
        ds.coords.insert("lat".into(), lat);
        ds.coords.insert("lon".into(), lon);
        for v in ds.data_vars.values_mut() {
            v.dims = vec!["time".into(), "lat".into(), "lon".into()];
        }
        let classes = classify(&ds, &DEFAULT_THRESHOLDS).unwrap();
        assert_eq!(classes.rp_class, vec![2]);
    }
}
