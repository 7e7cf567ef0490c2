//! Liquid flow simulation.
//!
//! Liquid levels run from 0 (air) to 8 (full) and are stored in the grid's raw
//! data. [`LiquidSimulation`] drives the flow; [`ActiveSet`] and
//! [`InfiniteSources`] hold the only state the grid doesn't.

mod active_set;
mod flowing;
mod infinite;
pub mod level;
mod spread;

pub use active_set::ActiveSet;
pub use flowing::{LiquidSimulation, TickReport};
pub use infinite::InfiniteSources;
pub use level::{MAX_LEVEL, MIN_LEVEL, level_at, level_of};
