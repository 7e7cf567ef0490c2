//! The three flow phases a cell goes through during a pass.

use rand::Rng;
use rand::seq::SliceRandom;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use viscid_registry::{LiquidType, same_liquid};
use viscid_utils::{BlockPos, Direction};

use super::flowing::LiquidSimulation;
use super::level::level_at;
use crate::error::FlowError;
use crate::grid::BlockGrid;

/// Returns the horizontal neighbours of `pos` holding `liquid` or air, keeping
/// only those with the lowest level.
fn lowest_horizontal_neighbors<G: BlockGrid + ?Sized>(
    grid: &G,
    pos: BlockPos,
    liquid: LiquidType,
) -> SmallVec<[BlockPos; 4]> {
    let mut lowest = u8::MAX;
    let mut result = SmallVec::new();

    for direction in Direction::HORIZONTAL {
        let neighbor = grid.neighbor(pos, direction);
        if !same_liquid(grid.material_at(neighbor), liquid.material()) {
            continue;
        }
        let Some(level) = level_at(grid, neighbor) else {
            continue;
        };

        if level < lowest {
            result.clear();
            lowest = level;
        }
        if level == lowest {
            result.push(neighbor);
        }
    }

    result
}

/// Neighbours a flood fill from `source` may step onto next.
fn fill_candidates<G: BlockGrid + ?Sized>(
    grid: &G,
    pos: BlockPos,
    source: BlockPos,
    liquid: LiquidType,
) -> impl Iterator<Item = BlockPos> {
    Direction::ALL.into_iter().filter_map(move |direction| {
        let neighbor = grid.neighbor(pos, direction);
        (neighbor.y() <= source.y() && same_liquid(grid.material_at(neighbor), liquid.material()))
            .then_some(neighbor)
    })
}

impl<R: Rng> LiquidSimulation<R> {
    /// Moves as much liquid as possible into the cell directly below.
    ///
    /// Returns `true` when the cell cannot flow any further this pass.
    pub fn flow_down<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
    ) -> Result<bool, FlowError> {
        let below = grid.neighbor(pos, Direction::Down);
        while self.can_flow_from_to(grid, pos, below) {
            self.flow(grid, pos, below, 1)?;
        }
        Ok(!self.can_flow(grid, pos))
    }

    /// Levels the cell out against its horizontal neighbours, one unit at a time.
    ///
    /// Each unit goes to a random neighbour among those with the lowest level.
    /// Returns `true` once the cell is level with that neighbour, and `false`
    /// if a difference remains or there is nowhere to go.
    pub fn flow_horizontally<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
    ) -> Result<bool, FlowError> {
        let liquid = LiquidType::from_material(grid.material_at(pos))?;

        loop {
            let candidates = lowest_horizontal_neighbors(grid, pos, liquid);
            if candidates.is_empty() {
                return Ok(false);
            }
            let target = candidates[self.rng.random_range(0..candidates.len())];

            if self.can_flow_from_to(grid, pos, target) {
                self.flow(grid, pos, target, 1)?;
                continue;
            }

            return Ok(level_at(grid, pos) == level_at(grid, target));
        }
    }

    /// Pushes the cell's remaining budget into the connected body of liquid.
    ///
    /// Breadth-first fill over same-liquid and air cells at or below the
    /// source, layer by layer from the source's own elevation downwards. Each
    /// layer is shuffled before it is visited. Air cells receive liquid but the
    /// fill does not continue through them.
    pub fn flow_to_nearest<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        source: BlockPos,
    ) -> Result<(), FlowError> {
        let liquid = LiquidType::from_material(grid.material_at(source))?;

        let mut visited = FxHashSet::default();
        visited.insert(source);
        let mut queued = FxHashSet::default();
        let mut pending: Vec<BlockPos> = Vec::new();
        for neighbor in fill_candidates(grid, source, source, liquid) {
            if queued.insert(neighbor) {
                pending.push(neighbor);
            }
        }

        let mut current_y = source.y();
        while self.can_flow(grid, source) && !pending.is_empty() {
            let (mut layer, rest): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|pos| pos.y() >= current_y);
            pending = rest;

            if layer.is_empty() {
                current_y -= 1;
                continue;
            }

            layer.shuffle(&mut self.rng);

            while self.can_flow(grid, source) {
                let Some(current) = layer.pop() else {
                    break;
                };
                queued.remove(&current);
                visited.insert(current);

                // Expanding through air would spread the fill across open space
                if !grid.material_at(current).is_air() {
                    for neighbor in fill_candidates(grid, current, source, liquid) {
                        if !visited.contains(&neighbor) && queued.insert(neighbor) {
                            pending.push(neighbor);
                        }
                    }
                }

                while self.can_flow_from_to(grid, source, current) {
                    self.flow(grid, source, current, 1)?;
                }
            }

            // Unvisited cells of an interrupted layer stay for later
            for pos in layer {
                pending.push(pos);
            }
        }

        Ok(())
    }
}
