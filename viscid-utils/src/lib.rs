//! Shared coordinate and direction types for the viscid workspace.

/// The six block faces.
pub mod direction;
/// Vector math.
pub mod math;
/// Grid position types.
pub mod types;

pub use direction::Direction;
pub use types::BlockPos;
