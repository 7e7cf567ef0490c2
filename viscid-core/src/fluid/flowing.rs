//! The liquid simulation: level mutation, transactions and the per-pass loop.
//!
//! Each pass takes a snapshot of the active set and handles every cell once:
//! 1. Move as much liquid as possible straight down.
//! 2. Level out with the lowest horizontal neighbour.
//! 3. Push what is left through the connected body with a layered flood fill.
//!
//! A cell that moved nothing during its pass drops out of the active set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use viscid_registry::{LiquidType, Material, is_liquid, same_liquid};
use viscid_utils::{BlockPos, Direction};

use super::active_set::ActiveSet;
use super::infinite::InfiniteSources;
use super::level::{MAX_LEVEL, MIN_LEVEL, decode_level, encode_level, level_at, level_of};
use crate::config::LiquidConfig;
use crate::error::FlowError;
use crate::grid::BlockGrid;

/// Summary of one simulation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Cells taken from the active set.
    pub processed: usize,
    /// Cells that were no longer liquid when their turn came.
    pub skipped: usize,
    /// Cells that moved nothing and left the active set.
    pub settled: usize,
    /// Cells whose handling failed.
    pub failed: usize,
    /// Total liquid units moved.
    pub units_moved: u32,
}

/// What happened to a single cell during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellOutcome {
    Skipped,
    Settled,
    Flowed(u8),
}

/// Level-based liquid simulation over a [`BlockGrid`].
///
/// Owns only the active set, the infinite-source flags and the per-pass flow
/// budgets. All cell state is read back from the grid.
pub struct LiquidSimulation<R = StdRng> {
    /// Maximum units a single cell may emit per pass.
    flow_rate: u8,
    active: ActiveSet,
    infinite: InfiniteSources,
    /// Units emitted by each cell during the current pass.
    flowed: FxHashMap<BlockPos, u8>,
    pub(super) rng: R,
}

impl LiquidSimulation<StdRng> {
    /// Creates a simulation from configuration.
    ///
    /// Uses the configured seed if there is one, otherwise seeds from the OS.
    #[must_use]
    pub fn new(config: &LiquidConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config.flow_rate, rng)
    }
}

impl<R: Rng> LiquidSimulation<R> {
    /// Creates a simulation with an explicit flow rate and random source.
    #[must_use]
    pub fn with_rng(flow_rate: u8, rng: R) -> Self {
        Self {
            flow_rate,
            active: ActiveSet::new(),
            infinite: InfiniteSources::new(),
            flowed: FxHashMap::default(),
            rng,
        }
    }

    /// Maximum units a single cell may emit per pass.
    #[must_use]
    pub fn flow_rate(&self) -> u8 {
        self.flow_rate
    }

    /// The cells queued for the next pass.
    #[must_use]
    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// The infinite-source flags.
    #[must_use]
    pub fn infinite_sources(&self) -> &InfiniteSources {
        &self.infinite
    }

    /// Mutable access to the infinite-source flags.
    pub fn infinite_sources_mut(&mut self) -> &mut InfiniteSources {
        &mut self.infinite
    }

    /// Queues a cell (and its upper and lateral liquid neighbours) for processing.
    pub fn add<G: BlockGrid + ?Sized>(&mut self, grid: &G, pos: BlockPos) -> bool {
        self.active.add(grid, pos)
    }

    /// Marks or unmarks a cell as an infinite source.
    pub fn set_infinite(&mut self, pos: BlockPos, value: bool) {
        self.infinite.set_infinite(pos, value);
    }

    /// Returns `true` if the cell is an infinite source.
    #[must_use]
    pub fn is_infinite(&self, pos: BlockPos) -> bool {
        self.infinite.is_infinite(pos)
    }

    /// Units the cell has emitted during the current pass.
    #[must_use]
    pub fn flowed(&self, pos: BlockPos) -> u8 {
        self.flowed.get(&pos).copied().unwrap_or(0)
    }

    /// What is left of the cell's budget for the current pass.
    #[must_use]
    pub fn remaining_budget(&self, pos: BlockPos) -> u8 {
        self.flow_rate.saturating_sub(self.flowed(pos))
    }

    /// Checks whether the cell is a liquid that can still emit this pass.
    #[must_use]
    pub fn can_flow<G: BlockGrid + ?Sized>(&self, grid: &G, pos: BlockPos) -> bool {
        is_liquid(grid.material_at(pos), false)
            && level_at(grid, pos).is_some_and(|level| level > MIN_LEVEL)
            && self.flowed(pos) < self.flow_rate
    }

    /// Checks whether the cell is air or liquid with room left.
    #[must_use]
    pub fn can_accept<G: BlockGrid + ?Sized>(&self, grid: &G, pos: BlockPos) -> bool {
        level_at(grid, pos).is_some_and(|level| level < MAX_LEVEL)
    }

    /// Checks whether a single unit may move from `from` to `to` right now.
    ///
    /// Downward moves only need room below. Any other move needs a level
    /// difference of at least 2, so that neighbours never swap a unit back and forth.
    #[must_use]
    pub fn can_flow_from_to<G: BlockGrid + ?Sized>(
        &self,
        grid: &G,
        from: BlockPos,
        to: BlockPos,
    ) -> bool {
        if !self.can_flow(grid, from)
            || !self.can_accept(grid, to)
            || !same_liquid(grid.material_at(from), grid.material_at(to))
        {
            return false;
        }

        if to == grid.neighbor(from, Direction::Down) {
            return true;
        }

        match (level_at(grid, from), level_at(grid, to)) {
            (Some(from_level), Some(to_level)) => from_level >= to_level.saturating_add(2),
            _ => false,
        }
    }

    /// Sets the level of a cell.
    ///
    /// Level 0 turns the cell into air. Filling an air cell needs `liquid`;
    /// a cell that already holds liquid keeps its own type. Infinite sources
    /// silently ignore the request. The cell is queued afterwards either way.
    pub fn set_level<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
        level: i32,
        liquid: Option<LiquidType>,
    ) -> Result<(), FlowError> {
        let current = level_of(grid, pos)?;

        if i32::from(current) != level && !self.is_infinite(pos) {
            let Ok(level) = u8::try_from(level) else {
                return Err(FlowError::InvalidLevel(level));
            };
            if level > MAX_LEVEL {
                return Err(FlowError::InvalidLevel(i32::from(level)));
            }

            if level == MIN_LEVEL {
                grid.set_material(pos, Material::AIR);
            } else {
                let material = grid.material_at(pos);
                let liquid = if material.is_air() {
                    liquid.ok_or(FlowError::MissingLiquidType(pos))?
                } else {
                    LiquidType::from_material(material)?
                };

                // Stabilize the block type before writing the level
                grid.set_material(pos, liquid.material());
                grid.set_raw_level(pos, encode_level(level)?);
            }
        }

        self.active.add(grid, pos);
        Ok(())
    }

    /// Raises the level of a cell by `amount`.
    pub fn raise_level<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
        amount: u8,
        liquid: Option<LiquidType>,
    ) -> Result<(), FlowError> {
        let current = level_of(grid, pos)?;
        self.set_level(grid, pos, i32::from(current) + i32::from(amount), liquid)
    }

    /// Lowers the level of a cell by `amount`.
    pub fn lower_level<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
        amount: u8,
        liquid: Option<LiquidType>,
    ) -> Result<(), FlowError> {
        let current = level_of(grid, pos)?;
        self.set_level(grid, pos, i32::from(current) - i32::from(amount), liquid)
    }

    /// Moves `amount` units of liquid from `from` to `to`.
    ///
    /// Both ends are validated before anything is written, so a failed
    /// transaction leaves the grid untouched. The amount counts against the
    /// source's budget for the current pass.
    pub fn flow<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        from: BlockPos,
        to: BlockPos,
        amount: u8,
    ) -> Result<(), FlowError> {
        let source_material = grid.material_at(from);
        if !is_liquid(source_material, false) {
            return Err(FlowError::NotALiquid(from));
        }
        let liquid = LiquidType::from_material(source_material)?;

        let target_material = grid.material_at(to);
        if !target_material.is_air()
            && LiquidType::try_from_material(target_material) != Some(liquid)
        {
            return Err(FlowError::IncompatibleTarget { target: to, liquid });
        }

        let remaining = self.remaining_budget(from);
        if amount > remaining {
            return Err(FlowError::ExceedsFlowRate {
                from,
                amount,
                remaining,
            });
        }

        let source_level = decode_level(grid.raw_level_at(from));
        if !self.is_infinite(from) && amount > source_level {
            return Err(FlowError::InvalidLevel(
                i32::from(source_level) - i32::from(amount),
            ));
        }
        let target_level = level_of(grid, to)?;
        if !self.is_infinite(to) && target_level + amount > MAX_LEVEL {
            return Err(FlowError::InvalidLevel(
                i32::from(target_level) + i32::from(amount),
            ));
        }

        self.lower_level(grid, from, amount, Some(liquid))?;
        self.raise_level(grid, to, amount, Some(liquid))?;
        *self.flowed.entry(from).or_insert(0) += amount;

        log::trace!("Flowed {amount} {liquid} from {from} to {to}");
        Ok(())
    }

    /// Runs one pass over every cell currently in the active set.
    ///
    /// Failures are logged and counted per cell; they never abort the pass.
    pub fn process_tick<G: BlockGrid + ?Sized>(&mut self, grid: &mut G) -> TickReport {
        let _span = tracing::debug_span!("liquid_tick", active = self.active.len()).entered();

        let snapshot = self.active.snapshot_and_clear();
        self.flowed.clear();

        let mut report = TickReport {
            processed: snapshot.len(),
            ..TickReport::default()
        };

        for pos in snapshot {
            match self.handle_liquid_block(grid, pos) {
                Ok(CellOutcome::Skipped) => report.skipped += 1,
                Ok(CellOutcome::Settled) => report.settled += 1,
                Ok(CellOutcome::Flowed(amount)) => report.units_moved += u32::from(amount),
                Err(error) => {
                    log::warn!("Failed to handle liquid at {pos}: {error}");
                    report.failed += 1;
                    report.units_moved += u32::from(self.flowed(pos));
                }
            }
        }

        if report.processed > 0 {
            log::debug!(
                "Processed {} liquid blocks, moved {} units, {} still active",
                report.processed,
                report.units_moved,
                self.active.len()
            );
        }

        report
    }

    /// Runs passes until nothing is active or `max_passes` is reached.
    ///
    /// Used on shutdown so pending flow is finished instead of discarded.
    /// Returns the number of passes run.
    pub fn drain<G: BlockGrid + ?Sized>(&mut self, grid: &mut G, max_passes: usize) -> usize {
        let mut passes = 0;
        while !self.active.is_empty() && passes < max_passes {
            self.process_tick(grid);
            passes += 1;
        }

        if !self.active.is_empty() {
            log::warn!(
                "Stopped draining after {passes} passes with {} liquid blocks still active",
                self.active.len()
            );
        }
        passes
    }

    fn handle_liquid_block<G: BlockGrid + ?Sized>(
        &mut self,
        grid: &mut G,
        pos: BlockPos,
    ) -> Result<CellOutcome, FlowError> {
        self.flowed.insert(pos, 0);

        if !is_liquid(grid.material_at(pos), false) {
            // Vacated since it was queued
            self.infinite.forget(pos);
            self.active.remove(pos);
            return Ok(CellOutcome::Skipped);
        }

        if self.can_flow(grid, pos) && !self.flow_down(grid, pos)? && !self.flow_horizontally(grid, pos)? {
            self.flow_to_nearest(grid, pos)?;
        }

        match self.flowed(pos) {
            0 => {
                self.active.remove(pos);
                Ok(CellOutcome::Settled)
            }
            amount => Ok(CellOutcome::Flowed(amount)),
        }
    }
}
