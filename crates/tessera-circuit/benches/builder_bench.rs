//! Benchmarks for lowering and emission.
//!
//! Run with: cargo bench -p tessera-circuit

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tessera_circuit::{GroverCircuitBuilder, emit_qasm3};
use tessera_core::PhaseSchedule;
use tessera_oracle::Preset;

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for preset in Preset::ALL {
        let builder = GroverCircuitBuilder::new(
            preset.spec(),
            PhaseSchedule::canonical(18).unwrap(),
        );
        group.bench_with_input(BenchmarkId::new("preset", preset), &builder, |b, builder| {
            b.iter(|| black_box(builder).build().unwrap());
        });
    }
    group.finish();
}

fn bench_emit(c: &mut Criterion) {
    let circuit = GroverCircuitBuilder::new(
        Preset::Axis1.spec(),
        PhaseSchedule::canonical(18).unwrap(),
    )
    .build()
    .unwrap();
    c.bench_function("emit_qasm3", |b| {
        b.iter(|| emit_qasm3(black_box(&circuit)));
    });
}

criterion_group!(benches, bench_build, bench_emit);
criterion_main!(benches);
