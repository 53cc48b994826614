//! Insert/extract throughput for both balance modes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use powertree::{BalanceMode, PowerTree};

fn fill(mode: BalanceMode, n: u64) -> PowerTree {
    let mut tree = PowerTree::with_mode(mode);
    for i in 0..n {
        // Scatter powers so both sides of the tree get work
        tree.insert(i.wrapping_mul(2654435761) % (n * 4), i);
    }
    tree
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for n in [256u64, 1024] {
        for mode in [BalanceMode::Subtree, BalanceMode::Path] {
            group.bench_with_input(BenchmarkId::new(mode.to_string(), n), &n, |b, &n| {
                b.iter(|| black_box(fill(mode, n)));
            });
        }
    }
    group.finish();
}

fn benchmark_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain_min");
    for mode in [BalanceMode::Subtree, BalanceMode::Path] {
        group.bench_function(mode.to_string(), |b| {
            b.iter_batched(
                || fill(mode, 1024),
                |mut tree| {
                    while let Ok(identifier) = tree.extract_min() {
                        black_box(identifier);
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_insert, benchmark_drain);
criterion_main!(benches);
