//! Access to the voxel grid the liquids live in.
//!
//! The simulation never owns block storage. Hosts implement [`BlockGrid`] over
//! their own world; [`MemoryGrid`] is a sparse in-memory implementation for tests
//! and headless runs.

mod memory;
mod raycast;

pub use memory::MemoryGrid;
pub use raycast::target_block;

use viscid_registry::Material;
use viscid_utils::{BlockPos, Direction};

/// Read/write access to block material and raw liquid data.
pub trait BlockGrid {
    /// Returns the material at the position. Unknown positions are air.
    fn material_at(&self, pos: BlockPos) -> Material;

    /// Replaces the material at the position, resetting its raw level to 0.
    fn set_material(&mut self, pos: BlockPos, material: Material);

    /// Returns the raw level data stored at the position.
    fn raw_level_at(&self, pos: BlockPos) -> u8;

    /// Stores raw level data at the position, leaving the material untouched.
    fn set_raw_level(&mut self, pos: BlockPos, raw: u8);

    /// Returns the neighbouring position in the given direction.
    fn neighbor(&self, pos: BlockPos, direction: Direction) -> BlockPos {
        direction.relative(pos)
    }
}
