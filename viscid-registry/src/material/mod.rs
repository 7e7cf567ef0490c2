//! Block materials and their registry.

/// The material id type.
pub mod material;
/// The material registry and its global instance.
pub mod registry;
pub mod vanilla;

pub use material::*;
pub use registry::*;

#[allow(missing_docs)]
impl Material {
    pub const AIR: Material = Material(0);
    pub const STONE: Material = Material(1);
    pub const FLOWING_WATER: Material = Material(8);
    pub const WATER: Material = Material(9);
    pub const FLOWING_LAVA: Material = Material(10);
    pub const LAVA: Material = Material(11);
}
