//! Material and liquid type registries.

pub mod liquid;
pub mod material;

pub use liquid::{LiquidType, is_liquid, same_liquid};
pub use material::{MATERIALS, Material, MaterialEntry, MaterialRegistry, vanilla};

use thiserror::Error;

/// Errors raised by registry lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The material has no associated liquid type.
    #[error("invalid material {0:?}, it cannot be converted to a liquid")]
    InvalidMaterial(Material),
}

/// Registries that can be frozen once bootstrapping is complete.
pub trait RegistryExt {
    /// Prevents further registrations.
    fn freeze(&mut self);
}
