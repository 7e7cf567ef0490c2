//! Liquid kinds and the material queries built on them.
//!
//! Air is treated as a wildcard that matches any liquid when comparing, but it
//! never maps to a [`LiquidType`] itself.

use std::fmt::{self, Display};

use crate::{Material, RegistryError};

/// The closed set of simulated liquids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiquidType {
    /// Water, flowing or stationary.
    Water,
    /// Lava, flowing or stationary.
    Lava,
}

impl LiquidType {
    /// Every liquid type.
    pub const ALL: [LiquidType; 2] = [LiquidType::Water, LiquidType::Lava];

    /// The stationary material a settled cell of this liquid is stored as.
    #[must_use]
    pub const fn material(self) -> Material {
        match self {
            Self::Water => Material::WATER,
            Self::Lava => Material::LAVA,
        }
    }

    /// The flowing variant of this liquid's material.
    #[must_use]
    pub const fn flowing_material(self) -> Material {
        match self {
            Self::Water => Material::FLOWING_WATER,
            Self::Lava => Material::FLOWING_LAVA,
        }
    }

    /// Maps a material to its liquid type, if it is one.
    #[must_use]
    pub fn try_from_material(material: Material) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|liquid| liquid.material() == material || liquid.flowing_material() == material)
    }

    /// Maps a material to its liquid type.
    ///
    /// Air is not a liquid type; callers should guard with [`is_liquid`].
    pub fn from_material(material: Material) -> Result<Self, RegistryError> {
        Self::try_from_material(material).ok_or(RegistryError::InvalidMaterial(material))
    }

    /// Returns true if the material is air or any liquid material.
    #[must_use]
    pub fn contains(material: Material) -> bool {
        material.is_air() || Self::try_from_material(material).is_some()
    }
}

impl Display for LiquidType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Water => f.write_str("water"),
            Self::Lava => f.write_str("lava"),
        }
    }
}

/// Checks whether the material is a liquid, optionally counting air as one.
#[must_use]
pub fn is_liquid(material: Material, allow_air: bool) -> bool {
    !(!allow_air && material.is_air()) && LiquidType::contains(material)
}

/// Checks whether two materials are the same liquid. Air matches any liquid.
#[must_use]
pub fn same_liquid(a: Material, b: Material) -> bool {
    if !is_liquid(a, true) || !is_liquid(b, true) {
        return false;
    }
    if a.is_air() || b.is_air() {
        return true;
    }
    LiquidType::try_from_material(a) == LiquidType::try_from_material(b)
}
