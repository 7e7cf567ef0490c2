//! End-to-end flow scenarios on an in-memory grid.
#![allow(missing_docs, clippy::unwrap_used)]

use std::cell::Cell;
use std::collections::BTreeSet;

use rand::SeedableRng;
use rand::rngs::StdRng;
use viscid_core::fluid::level::decode_level;
use viscid_core::fluid::{MAX_LEVEL, level_of};
use viscid_core::{BlockGrid, FlowError, LiquidSimulation, MemoryGrid};
use viscid_registry::{LiquidType, Material, is_liquid};
use viscid_utils::BlockPos;

fn simulation(flow_rate: u8) -> LiquidSimulation<StdRng> {
    LiquidSimulation::with_rng(flow_rate, StdRng::seed_from_u64(0x5eed))
}

/// Stone box with the given inner bounds hollowed out.
fn basin(min: BlockPos, max: BlockPos) -> MemoryGrid {
    let mut grid = MemoryGrid::new();
    grid.fill(min.offset(-1, -1, -1), max.offset(1, 1, 1), Material::STONE);
    grid.fill(min, max, Material::AIR);
    grid
}

fn total_liquid(grid: &MemoryGrid) -> u32 {
    grid.iter()
        .filter(|(_, material, _)| is_liquid(*material, false))
        .map(|(_, _, raw)| u32::from(decode_level(raw)))
        .sum()
}

#[test]
fn falling_column() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(0, 2, 0));
    let mut sim = simulation(8);
    let top = BlockPos::new(0, 2, 0);
    let middle = BlockPos::new(0, 1, 0);
    let bottom = BlockPos::new(0, 0, 0);
    grid.place_liquid(top, LiquidType::Water, 8);
    sim.add(&grid, top);

    let report = sim.process_tick(&mut grid);
    assert_eq!(report.units_moved, 8);
    assert!(grid.material_at(top).is_air());
    assert_eq!(level_of(&grid, middle), Ok(8));
    assert_eq!(level_of(&grid, bottom), Ok(0));
    assert!(sim.active().contains(middle));

    sim.process_tick(&mut grid);
    assert!(grid.material_at(middle).is_air());
    assert_eq!(level_of(&grid, bottom), Ok(8));

    // Nowhere left to go
    let report = sim.process_tick(&mut grid);
    assert_eq!(report.settled, 1);
    assert!(sim.active().is_empty());
}

#[test]
fn falling_column_is_bounded_by_flow_rate() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(0, 2, 0));
    let mut sim = simulation(3);
    let top = BlockPos::new(0, 2, 0);
    grid.place_liquid(top, LiquidType::Water, 8);
    sim.add(&grid, top);

    sim.process_tick(&mut grid);
    assert_eq!(level_of(&grid, top), Ok(5));
    assert_eq!(level_of(&grid, BlockPos::new(0, 1, 0)), Ok(3));
    assert_eq!(sim.flowed(top), 3);
}

#[test]
fn horizontal_equalization() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(1, 0, 0));
    let mut sim = simulation(8);
    let left = BlockPos::new(0, 0, 0);
    let right = BlockPos::new(1, 0, 0);
    grid.place_liquid(left, LiquidType::Water, 8);
    sim.add(&grid, left);

    sim.process_tick(&mut grid);
    assert_eq!(level_of(&grid, left), Ok(4));
    assert_eq!(level_of(&grid, right), Ok(4));

    let report = sim.process_tick(&mut grid);
    assert_eq!(report.units_moved, 0);
    assert_eq!(report.settled, 2);
    assert!(sim.active().is_empty());
    assert_eq!(level_of(&grid, left), Ok(4));
    assert_eq!(level_of(&grid, right), Ok(4));
}

#[test]
fn infinite_source_never_drains() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let source = BlockPos::new(0, 10, 0);
    grid.place_liquid(source, LiquidType::Water, 8);
    sim.set_infinite(source, true);

    for x in 1..=8 {
        sim.flow(&mut grid, source, BlockPos::new(x, 10, 0), 1)
            .unwrap();
        assert_eq!(level_of(&grid, source), Ok(MAX_LEVEL));
    }

    let err = sim.flow(&mut grid, source, BlockPos::new(9, 10, 0), 1);
    assert!(matches!(err, Err(FlowError::ExceedsFlowRate { remaining: 0, .. })));
    assert_eq!(level_of(&grid, source), Ok(MAX_LEVEL));
}

#[test]
fn infinite_source_keeps_feeding_ticks() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(3, 1, 0));
    let mut sim = simulation(8);
    let source = BlockPos::new(0, 1, 0);
    grid.place_liquid(source, LiquidType::Water, 8);
    sim.set_infinite(source, true);
    sim.add(&grid, source);

    for _ in 0..20 {
        sim.process_tick(&mut grid);
        assert_eq!(level_of(&grid, source), Ok(MAX_LEVEL));
    }
    assert!(total_liquid(&grid) > 40);
}

#[test]
fn water_and_lava_do_not_mix() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let water = BlockPos::new(0, 0, 0);
    let lava = BlockPos::new(1, 0, 0);
    grid.place_liquid(water, LiquidType::Water, 8);
    grid.place_liquid(lava, LiquidType::Lava, 2);

    assert_eq!(
        sim.flow(&mut grid, water, lava, 1),
        Err(FlowError::IncompatibleTarget {
            target: lava,
            liquid: LiquidType::Water,
        })
    );
    assert_eq!(level_of(&grid, water), Ok(8));
    assert_eq!(level_of(&grid, lava), Ok(2));
    assert!(!sim.can_flow_from_to(&grid, water, lava));
}

#[test]
fn flow_conserves_liquid() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let from = BlockPos::new(0, 0, 0);
    let to = BlockPos::new(0, 0, 1);
    grid.place_liquid(from, LiquidType::Lava, 7);
    grid.place_liquid(to, LiquidType::Lava, 2);

    sim.flow(&mut grid, from, to, 3).unwrap();
    assert_eq!(level_of(&grid, from), Ok(4));
    assert_eq!(level_of(&grid, to), Ok(5));

    // Overfilling the target fails without touching either side
    assert_eq!(
        sim.flow(&mut grid, from, to, 4),
        Err(FlowError::InvalidLevel(9))
    );
    assert_eq!(level_of(&grid, from), Ok(4));
    assert_eq!(level_of(&grid, to), Ok(5));
}

#[test]
fn flow_into_infinite_target_is_absorbed() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let from = BlockPos::new(0, 0, 0);
    let sink = BlockPos::new(1, 0, 0);
    grid.place_liquid(from, LiquidType::Water, 5);
    grid.place_liquid(sink, LiquidType::Water, 8);
    sim.set_infinite(sink, true);

    sim.flow(&mut grid, from, sink, 2).unwrap();
    assert_eq!(level_of(&grid, from), Ok(3));
    assert_eq!(level_of(&grid, sink), Ok(8));
}

#[test]
fn flow_from_non_liquid_fails() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let stone = BlockPos::new(0, 0, 0);
    grid.set_material(stone, Material::STONE);

    assert_eq!(
        sim.flow(&mut grid, stone, BlockPos::new(1, 0, 0), 1),
        Err(FlowError::NotALiquid(stone))
    );
    assert_eq!(
        sim.flow(&mut grid, BlockPos::new(5, 5, 5), stone, 1),
        Err(FlowError::NotALiquid(BlockPos::new(5, 5, 5)))
    );
}

#[test]
fn set_level_round_trip() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);

    for level in 1..=8 {
        let pos = BlockPos::new(level, 0, 0);
        sim.set_level(&mut grid, pos, level, Some(LiquidType::Lava))
            .unwrap();
        assert_eq!(level_of(&grid, pos).map(i32::from), Ok(level));
        assert_eq!(grid.material_at(pos), Material::LAVA);
        assert!(sim.active().contains(pos));
    }
}

#[test]
fn set_level_rejects_bad_input() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let pos = BlockPos::new(0, 0, 0);
    grid.place_liquid(pos, LiquidType::Water, 6);

    for level in [-1, 9, 100] {
        assert_eq!(
            sim.set_level(&mut grid, pos, level, None),
            Err(FlowError::InvalidLevel(level))
        );
        assert_eq!(level_of(&grid, pos), Ok(6));
    }
    assert!(sim.active().is_empty());

    let air = BlockPos::new(0, 1, 0);
    assert_eq!(
        sim.set_level(&mut grid, air, 3, None),
        Err(FlowError::MissingLiquidType(air))
    );
    assert!(grid.material_at(air).is_air());
}

#[test]
fn set_level_zero_clears_cell() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let pos = BlockPos::new(0, 0, 0);
    grid.place_liquid(pos, LiquidType::Water, 6);

    sim.set_level(&mut grid, pos, 0, None).unwrap();
    assert!(grid.material_at(pos).is_air());
    assert!(grid.is_empty());
}

#[test]
fn set_level_stabilizes_flowing_material() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let pos = BlockPos::new(0, 0, 0);
    grid.set_material(pos, Material::FLOWING_WATER);
    grid.set_raw_level(pos, 2);

    // The hint is ignored for a cell that already holds a liquid
    sim.set_level(&mut grid, pos, 3, Some(LiquidType::Lava))
        .unwrap();
    assert_eq!(grid.material_at(pos), Material::WATER);
    assert_eq!(level_of(&grid, pos), Ok(3));
}

#[test]
fn empty_tick_is_idempotent() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(2, 0, 2));
    grid.place_liquid(BlockPos::new(1, 0, 1), LiquidType::Water, 5);
    let before = grid.clone();
    let mut sim = simulation(8);

    let report = sim.process_tick(&mut grid);
    assert_eq!(report, Default::default());
    assert!(sim.active().is_empty());
    assert_eq!(
        grid.iter().collect::<BTreeSet<_>>(),
        before.iter().collect::<BTreeSet<_>>()
    );
}

#[test]
fn vacated_cells_are_skipped_and_forgotten() {
    let mut grid = MemoryGrid::new();
    let mut sim = simulation(8);
    let pos = BlockPos::new(0, 0, 0);
    grid.place_liquid(pos, LiquidType::Water, 8);
    sim.set_infinite(pos, true);
    sim.add(&grid, pos);

    grid.set_material(pos, Material::STONE);
    let report = sim.process_tick(&mut grid);
    assert_eq!(report.skipped, 1);
    assert!(!sim.is_infinite(pos));
    assert!(sim.active().is_empty());
}

#[test]
fn pool_conserves_liquid_and_respects_budget() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(4, 3, 4));
    let mut sim = simulation(3);
    for (x, z) in [(0, 0), (4, 4), (2, 2)] {
        let pos = BlockPos::new(x, 3, z);
        grid.place_liquid(pos, LiquidType::Water, 8);
        sim.add(&grid, pos);
    }
    let total = total_liquid(&grid);

    for _ in 0..40 {
        sim.process_tick(&mut grid);
        assert_eq!(total_liquid(&grid), total);
        for (pos, material, _) in grid.iter() {
            if is_liquid(material, false) {
                assert!(sim.flowed(pos) <= 3);
            }
        }
    }
}

#[test]
fn drain_settles_everything() {
    let mut grid = basin(BlockPos::new(0, 0, 0), BlockPos::new(3, 2, 3));
    let mut sim = simulation(8);
    for x in 0..4 {
        let pos = BlockPos::new(x, 2, 0);
        grid.place_liquid(pos, LiquidType::Lava, 8);
        sim.add(&grid, pos);
    }
    let total = total_liquid(&grid);

    let passes = sim.drain(&mut grid, 500);
    assert!(passes < 500);
    assert!(sim.active().is_empty());
    assert_eq!(total_liquid(&grid), total);

    // 32 units over a 4x4 floor
    for x in 0..4 {
        for z in 0..4 {
            assert!(grid.material_at(BlockPos::new(x, 2, z)).is_air());
        }
    }
}

/// Grid whose `trap` cell turns to stone once it has been read `trip_on` times.
struct CollapsingGrid {
    inner: MemoryGrid,
    trap: BlockPos,
    trip_on: u32,
    reads: Cell<u32>,
}

impl BlockGrid for CollapsingGrid {
    fn material_at(&self, pos: BlockPos) -> Material {
        if pos == self.trap {
            let reads = self.reads.get() + 1;
            self.reads.set(reads);
            if reads >= self.trip_on {
                return Material::STONE;
            }
        }
        self.inner.material_at(pos)
    }

    fn set_material(&mut self, pos: BlockPos, material: Material) {
        self.inner.set_material(pos, material);
    }

    fn raw_level_at(&self, pos: BlockPos) -> u8 {
        self.inner.raw_level_at(pos)
    }

    fn set_raw_level(&mut self, pos: BlockPos, raw: u8) {
        self.inner.set_raw_level(pos, raw);
    }
}

#[test]
fn failed_cell_does_not_abort_pass() {
    let a = BlockPos::new(0, 1, 0);
    let b = BlockPos::new(5, 1, 0);
    let mut inner = MemoryGrid::new();
    inner.place_liquid(a, LiquidType::Water, 8);
    inner.place_liquid(b, LiquidType::Water, 8);

    // The cell below `a` passes the flow checks, then collapses before the
    // transaction reads it again
    let mut grid = CollapsingGrid {
        inner,
        trap: a.below(),
        trip_on: 3,
        reads: Cell::new(0),
    };
    let mut sim = simulation(8);
    sim.add(&grid, a);
    sim.add(&grid, b);

    let report = sim.process_tick(&mut grid);
    assert_eq!(
        report,
        viscid_core::TickReport {
            processed: 2,
            failed: 1,
            units_moved: 8,
            ..Default::default()
        }
    );
    assert_eq!(level_of(&grid, a), Ok(8));
    assert!(grid.material_at(b).is_air());
    assert_eq!(level_of(&grid, b.below()), Ok(8));
}
