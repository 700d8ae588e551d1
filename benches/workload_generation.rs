//! Workload generation throughput benchmark
//!
//! Measures how long the generator takes to synthesize a population with
//! the default date window and job universe.
//!
//! # Run Instructions
//!
//! ```bash
//! cargo bench --bench workload_generation
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jobdrift::config::SimulationConfig;
use jobdrift::workload::{LabelAssigner, RecordGenerator};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_label_assignment(c: &mut Criterion) {
    let config = SimulationConfig::default();
    let names = config.job_names();
    let assigner = LabelAssigner::new().unwrap();

    c.bench_function("label_assignment_166_jobs", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(42);
            black_box(assigner.assign(&names, &mut rng));
        });
    });
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    group.sample_size(20);

    for size in [10_000usize, 100_000] {
        let config = SimulationConfig {
            population_size: size,
            ..SimulationConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(config.seed);
        let generator = RecordGenerator::new(config, &mut rng).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &generator, |b, g| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(7);
                black_box(g.generate(&mut rng));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_label_assignment, bench_generate);
criterion_main!(benches);
