//! Placement benchmarks.
//!
//! Measures the per-episode layout cost a training loop pays between
//! episodes, and the per-step cost of spawn-point sampling during one.
//!
//! Run with: `cargo bench --bench placement_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use assembly_env::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn setup_env(extent: f64) -> EnvironmentManager<MemoryScene> {
    EnvironmentManager::seeded(
        MemoryScene::training_default(extent, extent),
        EnvConfig::default(),
        0xA55E_B1E5,
    )
    .expect("training scene should initialize")
}

// ---------------------------------------------------------------------------
// Benchmark 1: full episode layout (reset + obstacles + pair)
// ---------------------------------------------------------------------------

fn bench_start_episode(c: &mut Criterion) {
    let mut group = c.benchmark_group("start_episode");
    for &obstacle_count in &[0usize, 10, 100] {
        let mut env = setup_env(40.0);
        let config = EpisodeConfig { obstacle_count };
        group.bench_with_input(
            BenchmarkId::from_parameter(obstacle_count),
            &config,
            |b, config| {
                b.iter(|| {
                    let report = env.start_episode(config).expect("episode layout");
                    black_box(report.pair.separation());
                });
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark 2: assembly pair on a tight boundary (many rejections)
// ---------------------------------------------------------------------------

fn bench_tight_assembly_pair(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly_pair");
    for &extent in &[14.0f64, 20.0, 60.0] {
        let mut env = setup_env(extent);
        group.bench_with_input(BenchmarkId::from_parameter(extent), &extent, |b, _| {
            b.iter(|| {
                let pair = env.generate_assembly_pair().expect("pair fits");
                black_box(pair.target.id);
            });
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark 3: spawn-point sampling
// ---------------------------------------------------------------------------

fn bench_find_valid_position(c: &mut Criterion) {
    let mut env = setup_env(20.0);
    env.generate_assembly_pair().expect("pair fits");
    c.bench_function("find_valid_position", |b| {
        b.iter(|| {
            let p = env.find_valid_position().expect("spawn point");
            black_box(env.normalized_position(p));
        });
    });
}

// ---------------------------------------------------------------------------
// Criterion groups and main
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_start_episode,
    bench_tight_assembly_pair,
    bench_find_valid_position,
);
criterion_main!(benches);
