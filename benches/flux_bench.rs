//! Benchmarks for the HLL Riemann solver and the hydrostatic reconstruction.
//!
//! Run with: `cargo bench --bench flux_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use flood_swe::solver::{FaceState, SweState};
use flood_swe::source::HydrostaticReconstruction;
use flood_swe::types::Direction;
use flood_swe::{hll_x, hll_y};

const G: f64 = 9.80665;
const TOL_H: f64 = 1e-3;

/// Smoothly varying wet left/right pairs.
fn wet_pairs(n: usize) -> Vec<(SweState, SweState)> {
    (0..n)
        .map(|i| {
            let phase = i as f64 * 0.1;
            let h_l = 1.0 + 0.5 * phase.sin();
            let h_r = 1.0 + 0.4 * (phase + 0.5).sin();
            let left = SweState::new(h_l, h_l * (0.5 + 0.3 * phase.cos()), h_l * 0.2);
            let right = SweState::new(h_r, h_r * 0.4, h_r * (0.3 - 0.1 * phase.sin()));
            (left, right)
        })
        .collect()
}

fn bench_hll(c: &mut Criterion) {
    let mut group = c.benchmark_group("hll");
    let pairs = wet_pairs(1000);

    group.bench_function("hll_x", |b| {
        b.iter(|| {
            pairs
                .iter()
                .map(|(l, r)| hll_x(black_box(l), black_box(r), G, TOL_H).h)
                .sum::<f64>()
        });
    });

    group.bench_function("hll_y", |b| {
        b.iter(|| {
            pairs
                .iter()
                .map(|(l, r)| hll_y(black_box(l), black_box(r), G, TOL_H).h)
                .sum::<f64>()
        });
    });

    group.finish();
}

/// Wet/dry fronts take the vacuum branches of the wave-speed estimate.
fn bench_wet_dry_fronts(c: &mut Criterion) {
    let mut group = c.benchmark_group("hll_wet_dry");

    for dry_fraction in [0.0, 0.5, 1.0] {
        let pairs: Vec<_> = wet_pairs(1000)
            .into_iter()
            .enumerate()
            .map(|(i, (l, r))| {
                if (i as f64 / 1000.0) < dry_fraction {
                    (l, SweState::zero())
                } else {
                    (l, r)
                }
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(dry_fraction),
            &pairs,
            |b, pairs| {
                b.iter(|| {
                    pairs
                        .iter()
                        .map(|(l, r)| hll_x(black_box(l), black_box(r), G, TOL_H).h)
                        .sum::<f64>()
                });
            },
        );
    }

    group.finish();
}

fn bench_reconstruction(c: &mut Criterion) {
    let wd = HydrostaticReconstruction::new(TOL_H);
    let faces: Vec<_> = (0..1000)
        .map(|i| {
            let z = 0.5 * (i as f64 * 0.07).sin();
            let left = FaceState::new(1.0 - z, 1.0, 0.2, 0.0);
            let right = FaceState::new(0.8 + z, 1.1, -0.1, 0.05);
            (left, right)
        })
        .collect();

    c.bench_function("hydrostatic_reconstruction", |b| {
        b.iter(|| {
            faces
                .iter()
                .map(|(l, r)| wd.reconstruct(black_box(l), black_box(r), Direction::East).z_face)
                .sum::<f64>()
        });
    });
}

criterion_group!(benches, bench_hll, bench_wet_dry_fronts, bench_reconstruction);
criterion_main!(benches);
