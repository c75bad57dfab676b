//! Tests for datasets as handed over by the loading layer.

use grid_common::{normalize_axes, Dataset, Grid, GridError, LATITUDE, LONGITUDE};

const SHORT_NAMED_JSON: &str = r#"{
    "coords": {
        "lat": [41.5, 41.6],
        "lon": [-1.0, -0.9, -0.8]
    },
    "time": {
        "times": ["2024-10-29T06:00:00Z"],
        "bounds": [{"start": "2024-10-29T00:00:00Z", "end": "2024-10-29T06:00:00Z"}]
    },
    "data_vars": {
        "tp": {
            "dims": ["time", "lat", "lon"],
            "values": [0.0, 1.5, 3.0, 4.5, 6.0, 7.5],
            "attrs": {"long_name": "Accumulated precipitation", "units": "mm/6h"}
        }
    }
}"#;

fn load() -> Dataset {
    serde_json::from_str(SHORT_NAMED_JSON).unwrap()
}

// ============================================================================
// Deserialization
// ============================================================================

#[test]
fn test_deserialize_dataset() {
    let ds = load();
    assert_eq!(ds.coord("lon").map(<[f64]>::len), Some(3));
    let time = ds.require_time().unwrap();
    assert_eq!(time.len(), 1);
    assert_eq!(time.bounds.as_ref().unwrap().len(), 1);
    let tp = ds.variable("tp").unwrap();
    assert_eq!(tp.attrs.units.as_deref(), Some("mm/6h"));
    assert_eq!(tp.attrs.standard_name, None);
}

#[test]
fn test_attrs_default_when_absent() {
    let ds: Dataset = serde_json::from_str(
        r#"{"coords": {}, "time": null, "data_vars": {"x": {"dims": [], "values": [1.0]}}}"#,
    )
    .unwrap();
    assert_eq!(ds.variable("x").unwrap().attrs.long_name, None);
}

// ============================================================================
// Normalization
// ============================================================================

#[test]
fn test_normalize_then_shape() {
    let ds = load();
    assert_eq!(ds.shape_of("tp").unwrap(), vec![1, 2, 3]);
    assert_eq!(ds.coord(LATITUDE), None);

    let normalized = normalize_axes(&ds);
    assert_eq!(normalized.shape_of("tp").unwrap(), vec![1, 2, 3]);
    assert_eq!(
        normalized.variable("tp").unwrap().dims,
        vec!["time", LATITUDE, LONGITUDE]
    );
}

#[test]
fn test_normalize_keeps_values() {
    let ds = load();
    let normalized = normalize_axes(&ds);
    assert_eq!(
        normalized.variable("tp").unwrap().values,
        ds.variable("tp").unwrap().values
    );
    assert_eq!(normalized.time, ds.time);
}

#[test]
fn test_normalize_idempotent_and_noop_on_canonical() {
    let once = normalize_axes(&load()).into_owned();
    let twice = normalize_axes(&once).into_owned();
    assert_eq!(once, twice);
}

#[test]
fn test_grid_from_loaded_dataset() {
    let grid = Grid::from_dataset(&load()).unwrap();
    assert_eq!(grid.shape(), (2, 3));
    assert_eq!(grid.latitude(), &[41.5, 41.6]);
}

#[test]
fn test_grid_needs_both_aliases() {
    let mut ds = load();
    ds.coords.remove("lon");
    assert_eq!(
        Grid::from_dataset(&ds),
        Err(GridError::MissingAxis(LATITUDE.to_string()))
    );
}
