//! Benchmarks for the tracker hot paths
//!
//! Run with: cargo bench

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mindshare::tracker::{reduce, search, Action, MockMetrics, TokenDraft, TrackerState};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn populated_state(count: usize) -> TrackerState {
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = TrackerState::default();
    for i in 0..count {
        state = reduce(
            state,
            Action::Add {
                draft: TokenDraft::new(format!("Token{}", i), format!("Addr{:040}", i)),
                added_at: Utc::now(),
                metrics: MockMetrics::generate_with(&mut rng),
            },
        )
        .state;
    }
    state
}

fn bench_generate(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    c.bench_function("generate_metrics", |b| {
        b.iter(|| MockMetrics::generate_with(black_box(&mut rng)))
    });
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000] {
        let state = populated_state(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("search_{}", size), |b| {
            b.iter(|| search(black_box(&state.tokens), black_box("token42")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_search);
criterion_main!(benches);
