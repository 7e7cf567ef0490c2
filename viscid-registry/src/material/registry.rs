use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use super::{Material, MaterialEntry, vanilla};
use crate::RegistryExt;

/// The global material registry, built from the vanilla table and frozen.
pub static MATERIALS: LazyLock<MaterialRegistry> = LazyLock::new(|| {
    let mut registry = MaterialRegistry::new();
    for entry in vanilla::ALL {
        registry.register(entry);
    }
    registry.freeze();
    log::debug!("Registered {} materials", registry.len());
    registry
});

/// Lookup table for materials by id and by name.
pub struct MaterialRegistry {
    by_id: FxHashMap<Material, MaterialEntry>,
    by_name: FxHashMap<&'static str, Material>,
    allows_registering: bool,
}

impl MaterialRegistry {
    /// Creates an empty, unfrozen registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_id: FxHashMap::default(),
            by_name: FxHashMap::default(),
            allows_registering: true,
        }
    }

    /// Registers a material.
    ///
    /// # Panics
    /// Panics if the registry has already been frozen.
    pub fn register(&mut self, entry: MaterialEntry) {
        assert!(
            self.allows_registering,
            "Cannot register material after registry is frozen"
        );
        self.by_name.insert(entry.name, entry.id);
        self.by_id.insert(entry.id, entry);
    }

    /// Gets a material entry by id.
    #[must_use]
    pub fn get(&self, id: Material) -> Option<&MaterialEntry> {
        self.by_id.get(&id)
    }

    /// Gets a material id by registry name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<Material> {
        self.by_name.get(name).copied()
    }

    /// Returns the registry name of a material, or `"unknown"`.
    #[must_use]
    pub fn name_of(&self, id: Material) -> &'static str {
        self.get(id).map_or("unknown", |entry| entry.name)
    }

    /// Number of registered materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryExt for MaterialRegistry {
    fn freeze(&mut self) {
        self.allows_registering = false;
    }
}
