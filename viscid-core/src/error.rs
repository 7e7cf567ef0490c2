//! Errors raised by level mutation and liquid transactions.

use thiserror::Error;
use viscid_registry::{LiquidType, RegistryError};
use viscid_utils::BlockPos;

/// Local failure of a level mutation or a transaction.
///
/// None of these are fatal: the simulation logs them per cell and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// The block is neither air nor a liquid.
    #[error("block at {0} is not a liquid")]
    NotALiquid(BlockPos),
    /// A level outside `0..=8` was requested.
    #[error("invalid liquid level {0}")]
    InvalidLevel(i32),
    /// An empty cell was asked to hold liquid without saying which one.
    #[error("cannot convert {0} to a liquid since no liquid type is specified")]
    MissingLiquidType(BlockPos),
    /// The target is occupied by something other than the source's liquid.
    #[error("target {target} is not empty, not a liquid or not {liquid}")]
    IncompatibleTarget {
        /// The rejected target.
        target: BlockPos,
        /// The liquid that tried to flow into it.
        liquid: LiquidType,
    },
    /// The transaction would take the source past its per-pass budget.
    #[error("flow of {amount} from {from} exceeds the remaining flow rate of {remaining}")]
    ExceedsFlowRate {
        /// The emitting cell.
        from: BlockPos,
        /// The requested amount.
        amount: u8,
        /// What is left of the cell's budget.
        remaining: u8,
    },
    /// A material could not be mapped to a liquid type.
    #[error(transparent)]
    InvalidMaterial(#[from] RegistryError),
}
