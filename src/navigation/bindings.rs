//! Navigation behaviors bound to keys.

use std::collections::HashMap;

/// Navigation performed when a bound key is activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Push `source`, then display `target`
    Forward { source: String, target: String },
    /// Pop the stack and display whatever comes back
    Back { palette: String },
}

/// A key action plus the container the resulting palette is displayed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding<C> {
    pub action: KeyAction,
    pub container: C,
}

/// Table of navigation behaviors, at most one per (palette, key).
///
/// This is the activation capability the host drives: it reports a key
/// activation and the session looks the behavior up here.
#[derive(Debug, Clone)]
pub struct KeyBindings<C> {
    by_palette: HashMap<String, HashMap<String, Binding<C>>>,
}

impl<C> Default for KeyBindings<C> {
    fn default() -> Self {
        Self { by_palette: HashMap::new() }
    }
}

impl<C> KeyBindings<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a behavior to a key.
    ///
    /// Returns false, keeping the existing binding, if the key already has
    /// one.
    pub fn bind(&mut self, palette: &str, key: &str, action: KeyAction, container: C) -> bool {
        let keys = self.by_palette.entry(palette.to_string()).or_default();
        if keys.contains_key(key) {
            tracing::debug!(palette, key, "key already bound");
            return false;
        }
        tracing::debug!(palette, key, ?action, "key bound");
        keys.insert(key.to_string(), Binding { action, container });
        true
    }

    pub fn get(&self, palette: &str, key: &str) -> Option<&Binding<C>> {
        self.by_palette.get(palette)?.get(key)
    }

    pub fn is_bound(&self, palette: &str, key: &str) -> bool {
        self.get(palette, key).is_some()
    }

    /// Total number of bound keys.
    pub fn len(&self) -> usize {
        self.by_palette.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
