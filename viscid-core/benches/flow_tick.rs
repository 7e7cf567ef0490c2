#![allow(missing_docs)]
//! Benchmarks for liquid passes.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::hint::black_box;

use viscid_core::{LiquidSimulation, MemoryGrid};
use viscid_registry::{LiquidType, Material};
use viscid_utils::BlockPos;

const SEED: u64 = 12345;

/// A hollow stone basin of `size` x 4 x `size` with an infinite source in one corner.
fn create_pool(size: i32) -> (MemoryGrid, LiquidSimulation<StdRng>) {
    let mut grid = MemoryGrid::new();
    grid.fill(
        BlockPos::new(-1, -1, -1),
        BlockPos::new(size, 4, size),
        Material::STONE,
    );
    grid.fill(
        BlockPos::new(0, 0, 0),
        BlockPos::new(size - 1, 3, size - 1),
        Material::AIR,
    );

    let mut simulation = LiquidSimulation::with_rng(8, StdRng::seed_from_u64(SEED));
    let source = BlockPos::new(0, 3, 0);
    grid.place_liquid(source, LiquidType::Water, 8);
    simulation.set_infinite(source, true);
    simulation.add(&grid, source);

    (grid, simulation)
}

fn bench_fill_pool(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_pool");

    for size in [4, 8, 16] {
        group.bench_with_input(BenchmarkId::new("passes_64", size), &size, |b, &size| {
            b.iter_batched(
                || create_pool(size),
                |(mut grid, mut simulation)| {
                    for _ in 0..64 {
                        black_box(simulation.process_tick(&mut grid));
                    }
                    grid
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn bench_settled_pass(c: &mut Criterion) {
    let (mut grid, mut simulation) = create_pool(8);
    simulation.drain(&mut grid, 10_000);

    c.bench_function("settled_pass", |b| {
        b.iter(|| black_box(simulation.process_tick(&mut grid)));
    });
}

criterion_group!(benches, bench_fill_pool, bench_settled_pass);
criterion_main!(benches);
