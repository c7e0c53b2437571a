//! Benchmarks of building [`RoomTemplate`]s and of the maze generators behind them.

#![allow(missing_docs)]

use std::hint::black_box;
use std::time::Duration;

use rand::SeedableRng as _;
use strum::IntoEnumIterator as _;

use undercroft_content::maze::MazeGrid;
use undercroft_content::{RoomTemplate, TemplateParameters, identity_provider};

fn main() {
    let mut criterion = criterion::Criterion::default().configure_from_args();

    template_benches(&mut criterion);
    maze_benches(&mut criterion);

    criterion.final_summary();
}

fn template_benches(c: &mut criterion::Criterion) {
    let mut group = c.benchmark_group("template");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(5));
    group.noise_threshold(0.05);

    let materials = identity_provider();
    for template in RoomTemplate::iter() {
        group.bench_function(format!("{template}"), |b| {
            b.iter_with_large_drop(|| {
                template
                    .build(black_box(&materials), TemplateParameters { seed: Some(0) })
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn maze_benches(c: &mut criterion::Criterion) {
    for size in [13, 63] {
        c.bench_function(&format!("backtracker({size})"), |b| {
            let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(0);
            b.iter_with_large_drop(|| MazeGrid::backtracker(black_box(size), size, &mut rng));
        });
        c.bench_function(&format!("recursive_bisection({size})"), |b| {
            let mut rng = rand_xoshiro::Xoshiro256Plus::seed_from_u64(0);
            b.iter_with_large_drop(|| {
                MazeGrid::recursive_bisection(black_box(size), size, &mut rng)
            });
        });
    }
}
