//! Maps game ticks onto simulation passes.

use rand::Rng;

use crate::fluid::{LiquidSimulation, TickReport};
use crate::grid::BlockGrid;

/// Game ticks between two simulation passes.
pub const DEFAULT_TICKS_PER_FLOW: u32 = 4;

/// Counts game ticks and fires a simulation pass on every `ticks_per_flow`-th one.
#[derive(Debug, Clone)]
pub struct FlowTicker {
    ticks_per_flow: u32,
    game_tick: u64,
}

impl FlowTicker {
    /// Creates a ticker. A period of 0 is treated as 1.
    #[must_use]
    pub fn new(ticks_per_flow: u32) -> Self {
        Self {
            ticks_per_flow: ticks_per_flow.max(1),
            game_tick: 0,
        }
    }

    /// Game ticks between two passes.
    #[must_use]
    pub fn ticks_per_flow(&self) -> u32 {
        self.ticks_per_flow
    }

    /// Game ticks counted so far.
    #[must_use]
    pub fn game_tick(&self) -> u64 {
        self.game_tick
    }

    /// Counts one game tick and returns `true` if a pass is due.
    pub fn advance(&mut self) -> bool {
        self.game_tick += 1;
        self.game_tick % u64::from(self.ticks_per_flow) == 0
    }

    /// Counts one game tick and runs a pass over `grid` if one is due.
    pub fn tick<R, G>(
        &mut self,
        simulation: &mut LiquidSimulation<R>,
        grid: &mut G,
    ) -> Option<TickReport>
    where
        R: Rng,
        G: BlockGrid + ?Sized,
    {
        if !self.advance() {
            return None;
        }
        log::trace!("Running liquid pass on game tick {}", self.game_tick);
        Some(simulation.process_tick(grid))
    }
}

impl Default for FlowTicker {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_FLOW)
    }
}
