//! Benchmarks for the grid analysis crate.
//!
//! Run with: cargo bench --package grid-analysis
//! Or: cargo bench --package grid-analysis --bench analysis_benchmarks

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};

use grid_analysis::{
    classify, locate, select, Dataset, Grid, Location, TimeAxis, TimeBounds, Variable,
    DEFAULT_THRESHOLDS,
};

/// Regional grid at 0.05 degrees with `steps` time steps of random return periods.
fn random_rp_dataset(width: usize, height: usize, steps: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(42);
    let latitude = (0..height).map(|i| 36.0 + i as f64 * 0.05).collect();
    let longitude = (0..width).map(|i| -9.0 + i as f64 * 0.05).collect();
    let rp = (0..width * height * steps)
        .map(|_| {
            if rng.gen_bool(0.05) {
                f64::NAN
            } else {
                rng.gen_range(0.0..300.0)
            }
        })
        .collect();

    let t0 = Utc.with_ymd_and_hms(2024, 10, 29, 0, 0, 0).unwrap();
    let times: Vec<_> = (1..=steps as i64).map(|i| t0 + Duration::hours(6 * i)).collect();
    let bounds = times
        .iter()
        .map(|&t| TimeBounds::new(t - Duration::hours(6), t))
        .collect();

    Dataset::new()
        .with_coord("latitude", latitude)
        .with_coord("longitude", longitude)
        .with_time(TimeAxis::new(times).with_bounds(bounds))
        .with_variable("rp", Variable::new(["time", "latitude", "longitude"], rp))
}

// =============================================================================
// NEAREST GRIDPOINT BENCHMARKS
// =============================================================================

fn bench_locate(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    for &(width, height) in &[(100, 100), (400, 300)] {
        let ds = random_rp_dataset(width, height, 1);
        let grid = Grid::from_dataset(&ds).unwrap();
        let query = Location::new(40.4, -3.7);
        group.throughput(Throughput::Elements((width * height) as u64));
        group.bench_function(format!("locate_{}x{}", width, height), |b| {
            b.iter(|| locate(black_box(&query), black_box(&grid)))
        });
    }

    group.finish();
}

// =============================================================================
// RADIUS SELECTION BENCHMARKS
// =============================================================================

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("select");
    let ds = random_rp_dataset(400, 300, 8);
    let center = Location::new(40.4, -3.7);

    for radius in [0.2, 1.0, 5.0] {
        group.bench_function(format!("select_r{}", radius), |b| {
            b.iter(|| select(black_box(&ds), black_box(&center), radius))
        });
    }

    group.finish();
}

// =============================================================================
// CLASSIFICATION BENCHMARKS
// =============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for steps in [1, 8, 40] {
        let ds = random_rp_dataset(400, 300, steps);
        group.throughput(Throughput::Elements((400 * 300 * steps) as u64));
        group.bench_function(format!("classify_{}_steps", steps), |b| {
            b.iter(|| classify(black_box(&ds), &DEFAULT_THRESHOLDS))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_locate, bench_select, bench_classify);
criterion_main!(benches);
