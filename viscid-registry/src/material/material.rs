/// Material ID - the raw block type id stored by the grid.
///
/// Liquid ids:
///   8 = Flowing_Water
///   9 = Water (stationary)
///   10 = Flowing_Lava
///   11 = Lava (stationary)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Material(pub u16);

impl Material {
    /// Returns true if this is the air material
    #[must_use]
    pub fn is_air(&self) -> bool {
        *self == Self::AIR
    }
}

/// A registered material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialEntry {
    /// The raw id.
    pub id: Material,
    /// The registry name.
    pub name: &'static str,
}
