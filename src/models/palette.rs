//! Palette type: a named grid of keys.

use std::collections::BTreeMap;

use super::key::Key;
use crate::geometry::{self, GeometryError, GridShape};

/// A named palette (on-screen keyboard) made of keys.
///
/// Keys are held in identifier order so iteration and lookups such as
/// [`Palette::back_key`] are deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Palette {
    pub name: String,
    pub keys: BTreeMap<String, Key>,
    /// True if the palette was synthesized at runtime rather than loaded
    pub is_dynamic: bool,
    /// Set once the palette's back key has been bound
    pub(crate) back_configured: bool,
}

impl Palette {
    /// Create an empty, statically defined palette.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Create an empty palette synthesized at runtime.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_dynamic: true, ..Default::default() }
    }

    /// Add a key, replacing any key with the same identifier.
    pub fn with_key(mut self, key: Key) -> Self {
        self.insert_key(key);
        self
    }

    /// Insert a key, returning the key it replaced (if any).
    pub fn insert_key(&mut self, key: Key) -> Option<Key> {
        self.keys.insert(key.id.clone(), key)
    }

    pub fn key(&self, id: &str) -> Option<&Key> {
        self.keys.get(id)
    }

    pub(crate) fn key_mut(&mut self, id: &str) -> Option<&mut Key> {
        self.keys.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The palette's back key: the first key (in identifier order) whose
    /// role is branch-back.
    pub fn back_key(&self) -> Option<&Key> {
        self.keys.values().find(|key| key.role.is_branch_back())
    }

    /// Whether the back key behavior has been attached.
    pub fn is_back_configured(&self) -> bool {
        self.back_configured
    }

    /// Grid dimensions spanned by the keys. Recomputed on every call.
    pub fn shape(&self) -> GridShape {
        geometry::resolve_shape(self)
    }

    /// Check every key rectangle, returning one error per invalid key.
    pub fn validate(&self) -> Vec<GeometryError> {
        self.keys.values().filter_map(|key| geometry::validate_key(key).err()).collect()
    }
}
