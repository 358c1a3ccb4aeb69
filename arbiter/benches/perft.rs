use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use arbiter::*;

fn perft_benchmark(c: &mut Criterion) {
    let kiwipete = Position::from_fen(FEN_KIWIPETE).unwrap();
    c.bench_function("Kiwipete Perft 3", |b| {
        b.iter(|| {
            let kiwipete = black_box(&kiwipete);
            let depth = black_box(3);
            black_box(perft(kiwipete, depth))
        });
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(30).measurement_time(Duration::from_secs(60));
    targets = perft_benchmark
}
criterion_main!(benches);
