use criterion::{black_box, criterion_group, criterion_main, Bencher, Criterion};
use std::time::Instant;

use rngbench::{measure, Strategy};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_f64");
    for strategy in Strategy::ALL {
        group.bench_function(strategy.to_string(), |b: &mut Bencher| {
            let generator = strategy.prepare();
            b.iter(|| black_box(generator.next_f64()));
        });
    }
    group.finish();

    let mut group = c.benchmark_group("measure_4_threads");
    group.sample_size(10);
    for strategy in Strategy::ALL {
        group.bench_function(strategy.to_string(), |b: &mut Bencher| {
            b.iter_custom(|iters| {
                let start = Instant::now();
                for _ in 0..iters {
                    black_box(measure(4, 10_000, strategy).unwrap());
                }
                start.elapsed()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
