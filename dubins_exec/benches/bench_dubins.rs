//! # Dubins Planner Benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use dubins_lib::{
    dubins::{selector::all_candidates, DEFAULT_STEP_RADIUS_FRACTION},
    find_shortest_path, DubinsPath, Pose,
};

fn dubins_benchmark(c: &mut Criterion) {
    // ---- Build the request ----

    let start = Pose::from_degrees(0.0, 0.0, 45.0);
    let end = Pose::from_degrees(10.0, 5.0, -30.0);
    let radius_m = 2.0;

    let path: DubinsPath = find_shortest_path(&start, &end, radius_m).unwrap();

    // Evaluating all six primitives
    c.bench_function("all_candidates", |b| {
        b.iter(|| all_candidates(black_box(&start), black_box(&end), radius_m).unwrap())
    });

    // Full selection
    c.bench_function("find_shortest_path", |b| {
        b.iter(|| find_shortest_path(black_box(&start), black_box(&end), radius_m).unwrap())
    });

    // Tracing at the default step
    c.bench_function("DubinsPath::trace", |b| {
        b.iter(|| {
            path.trace(black_box(radius_m * DEFAULT_STEP_RADIUS_FRACTION))
                .unwrap()
        })
    });

    c.bench_function("DubinsPath::endpoint", |b| b.iter(|| black_box(&path).endpoint()));
}

criterion_group!(benches, dubins_benchmark);
criterion_main!(benches);
