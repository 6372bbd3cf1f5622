use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use pellet_pursuit::game::search::PathFinder;
use pellet_pursuit::game::tick::{tick, RoundConfig};
use pellet_pursuit::{Cell, Direction, Grid, RoundState, RunnerId};

/// Serpentine arena: horizontal baffles with alternating gaps force the
/// search to sweep the full width of every band.
fn walled_grid(size: u32) -> Grid {
    let mut grid = Grid::new(size);
    let side = size as i32;
    for y in (2..side - 2).step_by(2) {
        let gap = if (y / 2) % 2 == 0 { side - 2 } else { 1 };
        for x in 1..side - 1 {
            if x != gap {
                grid.set_wall(Cell::new(x, y));
            }
        }
    }
    grid
}

fn bench_search(c: &mut Criterion) {
    let grid = walled_grid(64);
    let start = Cell::new(1, 1);
    let goal = Cell::new(62, 62);

    let mut group = c.benchmark_group("search");

    group.bench_function("find_path_alloc", |b| {
        b.iter(|| {
            let mut finder = PathFinder::new();
            let path = finder.find_path(&grid, start, goal);
            black_box(path.len());
        })
    });

    let mut finder = PathFinder::new();
    let mut out = Vec::new();
    group.bench_function("find_path_into_reuse", |b| {
        b.iter(|| {
            finder.find_path_into(&grid, start, goal, &mut out);
            black_box(out.len());
        })
    });

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut grid = Grid::new(32);
    grid.fill_pellets();
    let mut state = RoundState::new(grid);

    for i in 0..4u32 {
        state.add_runner(RunnerId(i), Cell::new(1 + i as i32 * 2, 1), 0.5);
    }
    for i in 0..4 {
        state.add_hunter(Cell::new(30 - i as i32 * 2, 30), 0.1);
    }

    let mut intents = BTreeMap::new();
    for i in 0..4u32 {
        intents.insert(RunnerId(i), Direction::Right);
    }
    let config = RoundConfig::default();

    let mut group = c.benchmark_group("tick");

    group.bench_function("single_tick", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| {
                let result = tick(&mut state, &intents, &config);
                black_box(result.events.len());
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("hundred_ticks", |b| {
        b.iter_batched(
            || state.clone(),
            |mut state| {
                for _ in 0..100 {
                    let result = tick(&mut state, &intents, &config);
                    black_box(result.events.len());
                }
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_search, bench_tick);
criterion_main!(benches);
