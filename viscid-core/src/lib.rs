//! # Viscid Core
//!
//! Level-based liquid simulation for voxel grids. Liquids fall, level out with
//! their horizontal neighbours and, once the direct neighbours are saturated,
//! push their remaining flow through the connected body with a layered flood
//! fill. Every cell may move at most a fixed budget of liquid per pass.
//!
//! The grid itself is not owned here: everything reads and writes through the
//! [`grid::BlockGrid`] trait.

pub mod command;
pub mod config;
pub mod error;
pub mod events;
pub mod fluid;
pub mod grid;
pub mod ticks;

pub use error::FlowError;
pub use fluid::{LiquidSimulation, TickReport};
pub use grid::{BlockGrid, MemoryGrid};
