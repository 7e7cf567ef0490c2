//! Host world events that feed the simulation.
//!
//! A host forwards block events here instead of running its own liquid logic.
//! The affected coordinate is queued, and for the spread-like events the host
//! is told to cancel its native behaviour whenever a liquid is involved.

use rand::Rng;
use viscid_registry::is_liquid;
use viscid_utils::{BlockPos, Direction};

use crate::fluid::LiquidSimulation;
use crate::grid::BlockGrid;

/// A block event raised by the host world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidEvent {
    /// A block tries to spread into a neighbour.
    FromTo {
        /// The spreading block.
        pos: BlockPos,
    },
    /// A block was placed.
    Place {
        /// The placed block.
        pos: BlockPos,
    },
    /// A bucket was emptied against a block face.
    BucketEmpty {
        /// The block that was clicked.
        clicked: BlockPos,
        /// The clicked face, pointing at the cell that receives the liquid.
        face: Direction,
    },
    /// A block's physics update fired.
    Physics {
        /// The updated block.
        pos: BlockPos,
    },
    /// A block spread on its own.
    Spread {
        /// The spreading block.
        pos: BlockPos,
    },
}

impl LiquidEvent {
    /// The coordinate this event concerns.
    #[must_use]
    pub fn affected_pos(&self) -> BlockPos {
        match *self {
            Self::FromTo { pos } | Self::Place { pos } | Self::Physics { pos } | Self::Spread { pos } => pos,
            Self::BucketEmpty { clicked, face } => face.relative(clicked),
        }
    }

    /// Whether the host's own handling of this event must be suppressed for liquids.
    #[must_use]
    pub fn cancels_for_liquids(&self) -> bool {
        matches!(
            self,
            Self::FromTo { .. } | Self::Physics { .. } | Self::Spread { .. }
        )
    }
}

/// What the host should do with the event after it was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Suppress the host's native behaviour.
    Cancel,
    /// Let the event through.
    Allow,
}

/// Queues the coordinate affected by `event` and decides whether the host
/// should cancel it.
pub fn handle_event<R, G>(
    simulation: &mut LiquidSimulation<R>,
    grid: &G,
    event: LiquidEvent,
) -> EventOutcome
where
    R: Rng,
    G: BlockGrid + ?Sized,
{
    let pos = event.affected_pos();
    let liquid = is_liquid(grid.material_at(pos), false);

    if simulation.add(grid, pos) {
        log::trace!("Queued {pos} from {event:?}");
    }

    if liquid && event.cancels_for_liquids() {
        EventOutcome::Cancel
    } else {
        EventOutcome::Allow
    }
}
