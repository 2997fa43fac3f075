//! Benchmarks for the last-step solver.
//!
//! Run with: cargo bench -p tessera-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tessera_core::{
    AmplitudeVector, FixedScheduleEvolver, LastStepOptimizer, PhasePair, ProblemInstance,
    RotationOperator, SolverConfig, solve,
};

const RATIO: f64 = 8.0 / 4096.0;

/// Benchmark building and applying a single round.
fn bench_rotation(c: &mut Criterion) {
    let v = AmplitudeVector::initial(RATIO);
    c.bench_function("rotation_apply", |b| {
        b.iter(|| {
            let q = RotationOperator::new(black_box(RATIO), black_box(PhasePair::new(1.0, 2.0)))
                .unwrap();
            q.apply(black_box(&v))
        });
    });
}

/// Benchmark the grid scan at several resolutions.
fn bench_grid_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_scan");
    let v_pre = FixedScheduleEvolver::new(RATIO).unwrap().pre_final(18);

    for grid_steps in &[90, 180, 360] {
        let config = SolverConfig::new().with_grid_steps(*grid_steps);
        let optimizer = LastStepOptimizer::new(RATIO, config).unwrap();
        group.bench_with_input(
            BenchmarkId::new("steps", grid_steps),
            grid_steps,
            |b, _| {
                b.iter(|| optimizer.grid_scan(black_box(&v_pre)));
            },
        );
    }

    group.finish();
}

/// Benchmark a complete solve with the reference configuration.
fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(10);

    for k in &[1_usize, 17, 18] {
        let problem = ProblemInstance::new(RATIO, *k).unwrap();
        group.bench_with_input(BenchmarkId::new("k", k), k, |b, _| {
            b.iter(|| solve(black_box(&problem), &SolverConfig::default()).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rotation, bench_grid_scan, bench_solve);
criterion_main!(benches);
