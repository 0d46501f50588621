//! Palette registry for named palettes.

use std::collections::HashMap;
use thiserror::Error;

use crate::geometry::GeometryError;
use crate::models::Palette;

/// Error when registering a palette.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// A palette with this name is already registered
    #[error("Palette '{0}' is already registered")]
    DuplicateName(String),
    /// One or more keys have invalid rectangles
    #[error("Palette '{palette}' has invalid key geometry: {}", .errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    InvalidGeometry { palette: String, errors: Vec<GeometryError> },
}

/// Registry for named palettes.
///
/// Owns every palette of a session. Names are unique and remembered in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    palettes: HashMap<String, Palette>,
    order: Vec<String>,
}

impl PaletteRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { palettes: HashMap::new(), order: Vec::new() }
    }

    /// Register a palette.
    ///
    /// Rejects duplicate names and palettes containing invalid key
    /// rectangles. A rejected palette leaves the registry unchanged.
    pub fn add(&mut self, palette: Palette) -> Result<(), RegistryError> {
        if self.palettes.contains_key(&palette.name) {
            tracing::warn!(palette = %palette.name, "duplicate palette name rejected");
            return Err(RegistryError::DuplicateName(palette.name));
        }

        let errors = palette.validate();
        if !errors.is_empty() {
            tracing::warn!(palette = %palette.name, invalid_keys = errors.len(), "palette rejected");
            return Err(RegistryError::InvalidGeometry { palette: palette.name, errors });
        }

        tracing::debug!(palette = %palette.name, keys = palette.len(), "palette registered");
        self.order.push(palette.name.clone());
        self.palettes.insert(palette.name.clone(), palette);
        Ok(())
    }

    /// Register every palette, collecting errors instead of stopping at the
    /// first one.
    pub fn add_all(&mut self, palettes: impl IntoIterator<Item = Palette>) -> Vec<RegistryError> {
        palettes.into_iter().filter_map(|palette| self.add(palette).err()).collect()
    }

    /// Get a palette by name.
    pub fn get(&self, name: &str) -> Option<&Palette> {
        self.palettes.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Palette> {
        self.palettes.get_mut(name)
    }

    /// Check if a palette with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.palettes.contains_key(name)
    }

    /// Palette names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    /// Palettes in registration order.
    pub fn palettes(&self) -> impl Iterator<Item = &Palette> + '_ {
        self.order.iter().filter_map(|name| self.palettes.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
