use criterion::{criterion_group, criterion_main, Criterion, black_box};
use mushbot::board::Position;
use mushbot::search::eval::from_weights;
use mushbot::search::{EvalWeights, SearchParams, Searcher};
use mushbot::selfplay::random_grid;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn bench_search(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(11);
    let grid = random_grid(10, 17, &mut rng).unwrap();
    let mut group = c.benchmark_group("search");
    for &(name, weights, order) in &[
        ("diff_ordered_d2", EvalWeights::default(), true),
        ("diff_unordered_d2", EvalWeights::default(), false),
        ("aggressive_ordered_d2", EvalWeights::aggressive(), true),
    ] {
        group.bench_function(name, |ben| {
            ben.iter(|| {
                let mut s = Searcher::new(from_weights(weights));
                let mut pos = Position::new(grid.clone());
                let p = SearchParams { max_depth: 2, order_moves: order, ..SearchParams::default() };
                let r = s.search_with_params(black_box(&mut pos), p);
                black_box(r.nodes)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
