//! Conversion between normalized liquid levels and raw grid data.
//!
//! Raw data layout:
//! - 0 = source (full)
//! - 1-7 = partial, 1 holds the most
//! - 8 and above = falling, treated as full

use viscid_registry::is_liquid;
use viscid_utils::BlockPos;

use crate::error::FlowError;
use crate::grid::BlockGrid;

/// The level of an empty (air) cell.
pub const MIN_LEVEL: u8 = 0;

/// The level of a full cell.
pub const MAX_LEVEL: u8 = 8;

/// Decodes raw grid data into a level in `1..=8`.
#[must_use]
pub const fn decode_level(raw: u8) -> u8 {
    if raw >= MAX_LEVEL {
        MAX_LEVEL
    } else {
        MAX_LEVEL - raw
    }
}

/// Encodes a non-zero level as raw grid data.
///
/// Level 0 has no raw form: an empty cell is stored as air instead.
pub fn encode_level(level: u8) -> Result<u8, FlowError> {
    if level == MIN_LEVEL || level > MAX_LEVEL {
        return Err(FlowError::InvalidLevel(i32::from(level)));
    }
    Ok(MAX_LEVEL - level)
}

/// Returns the level at `pos`, or `None` if the block is neither air nor a liquid.
#[must_use]
pub fn level_at<G: BlockGrid + ?Sized>(grid: &G, pos: BlockPos) -> Option<u8> {
    let material = grid.material_at(pos);
    if material.is_air() {
        Some(MIN_LEVEL)
    } else if is_liquid(material, false) {
        Some(decode_level(grid.raw_level_at(pos)))
    } else {
        None
    }
}

/// Returns the level at `pos`, failing for blocks that are not liquid or air.
pub fn level_of<G: BlockGrid + ?Sized>(grid: &G, pos: BlockPos) -> Result<u8, FlowError> {
    level_at(grid, pos).ok_or(FlowError::NotALiquid(pos))
}
