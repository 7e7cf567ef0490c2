//! The built-in material table.

use super::{Material, MaterialEntry};

/// Empty space.
pub const AIR: MaterialEntry = MaterialEntry {
    id: Material::AIR,
    name: "air",
};

/// A solid block liquids cannot enter.
pub const STONE: MaterialEntry = MaterialEntry {
    id: Material::STONE,
    name: "stone",
};

/// Water in motion.
pub const FLOWING_WATER: MaterialEntry = MaterialEntry {
    id: Material::FLOWING_WATER,
    name: "flowing_water",
};

/// Water at rest.
pub const WATER: MaterialEntry = MaterialEntry {
    id: Material::WATER,
    name: "water",
};

/// Lava in motion.
pub const FLOWING_LAVA: MaterialEntry = MaterialEntry {
    id: Material::FLOWING_LAVA,
    name: "flowing_lava",
};

/// Lava at rest.
pub const LAVA: MaterialEntry = MaterialEntry {
    id: Material::LAVA,
    name: "lava",
};

/// Every built-in material, in id order.
pub const ALL: [MaterialEntry; 6] = [AIR, STONE, FLOWING_WATER, WATER, FLOWING_LAVA, LAVA];
