//! RAM-only grid storage.
//!
//! This module provides an in-memory grid that doesn't persist anything.
//! Useful for:
//! - Unit and scenario tests
//! - Benchmarks
//! - The headless host

use rustc_hash::FxHashMap;
use viscid_registry::{LiquidType, Material};
use viscid_utils::BlockPos;

use super::BlockGrid;
use crate::fluid::level::encode_level;

/// A stored non-air block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    material: Material,
    raw: u8,
}

/// Sparse in-memory grid.
///
/// Only non-air cells are stored, so an "infinite" world of air costs nothing.
/// Every position that was never set (or was set back to air) reads as air with
/// raw level 0.
#[derive(Debug, Clone, Default)]
pub struct MemoryGrid {
    cells: FxHashMap<BlockPos, Cell>,
}

impl MemoryGrid {
    /// Creates an empty grid (all air).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the inclusive box between `min` and `max` with a material.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, material: Material) {
        for x in min.x()..=max.x() {
            for y in min.y()..=max.y() {
                for z in min.z()..=max.z() {
                    self.set_material(BlockPos::new(x, y, z), material);
                }
            }
        }
    }

    /// Places liquid at the given level directly, bypassing the simulation.
    ///
    /// A level of 0 clears the cell; levels above 8 are clamped to 8.
    pub fn place_liquid(&mut self, pos: BlockPos, liquid: LiquidType, level: u8) {
        match encode_level(level.min(8)) {
            Ok(raw) => {
                self.set_material(pos, liquid.material());
                self.set_raw_level(pos, raw);
            }
            Err(_) => self.set_material(pos, Material::AIR),
        }
    }

    /// Number of stored non-air cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if every cell is air.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates over all stored non-air cells.
    pub fn iter(&self) -> impl Iterator<Item = (BlockPos, Material, u8)> + '_ {
        self.cells
            .iter()
            .map(|(pos, cell)| (*pos, cell.material, cell.raw))
    }
}

impl BlockGrid for MemoryGrid {
    fn material_at(&self, pos: BlockPos) -> Material {
        self.cells.get(&pos).map_or(Material::AIR, |cell| cell.material)
    }

    fn set_material(&mut self, pos: BlockPos, material: Material) {
        if material.is_air() {
            self.cells.remove(&pos);
        } else {
            self.cells.insert(pos, Cell { material, raw: 0 });
        }
    }

    fn raw_level_at(&self, pos: BlockPos) -> u8 {
        self.cells.get(&pos).map_or(0, |cell| cell.raw)
    }

    fn set_raw_level(&mut self, pos: BlockPos, raw: u8) {
        // Air carries no data
        if let Some(cell) = self.cells.get_mut(&pos) {
            cell.raw = raw;
        }
    }
}
