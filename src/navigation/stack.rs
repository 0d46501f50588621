//! Bounded branch-back stack of visited palettes.

use thiserror::Error;

use crate::models::Palette;

/// Default maximum number of palettes the stack holds.
pub const DEFAULT_CAPACITY: usize = 50;

/// Error when mutating the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NavigationError {
    /// The stack already holds `capacity` palettes
    #[error("navigation stack is full ({capacity} palettes)")]
    CapacityExceeded { capacity: usize },
}

/// What a push did to the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The palette was added to the top
    Pushed,
    /// No palette was given; nothing changed
    Absent,
    /// Dynamic palette already somewhere on the stack; nothing changed
    AlreadyOnStack,
}

/// LIFO history of visited palettes.
///
/// Entries are palette names: the [`crate::registry::PaletteRegistry`] owns
/// the palettes and stays authoritative for them. The bottom of the stack is
/// the oldest entry.
#[derive(Debug, Clone)]
pub struct NavigationStack {
    entries: Vec<String>,
    push_pop_delta: usize,
    capacity: usize,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStack {
    /// Create an empty stack with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty stack holding at most `capacity` palettes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::new(), push_pop_delta: 0, capacity }
    }

    /// Push a palette onto the top of the stack.
    ///
    /// - `None` is ignored.
    /// - A dynamic palette already anywhere on the stack is ignored. Static
    ///   palettes may appear more than once.
    /// - A full stack rejects the push and is left untouched.
    pub fn push(&mut self, palette: Option<&Palette>) -> Result<PushOutcome, NavigationError> {
        let Some(palette) = palette else {
            return Ok(PushOutcome::Absent);
        };

        if palette.is_dynamic && self.contains(&palette.name) {
            tracing::debug!(palette = %palette.name, "dynamic palette already on stack");
            return Ok(PushOutcome::AlreadyOnStack);
        }

        if self.entries.len() >= self.capacity {
            tracing::warn!(palette = %palette.name, capacity = self.capacity, "navigation stack full");
            return Err(NavigationError::CapacityExceeded { capacity: self.capacity });
        }

        self.entries.push(palette.name.clone());
        self.push_pop_delta += 1;
        tracing::debug!(palette = %palette.name, depth = self.entries.len(), "pushed onto stack");
        Ok(PushOutcome::Pushed)
    }

    /// Remove and return the palette on top of the stack.
    ///
    /// Returns `None` without changing anything when the stack is empty.
    pub fn pop(&mut self) -> Option<String> {
        let name = self.entries.pop()?;
        self.push_pop_delta -= 1;
        tracing::debug!(palette = %name, depth = self.entries.len(), "popped off stack");
        Some(name)
    }

    /// Look at the palette `distance_from_top` entries below the top
    /// (0 is the top) without removing it.
    pub fn peek(&self, distance_from_top: usize) -> Option<&str> {
        self.entries.iter().rev().nth(distance_from_top).map(String::as_str)
    }

    /// Pushes accepted minus pops performed. Always equals [`Self::len`].
    pub fn push_pop_difference(&self) -> usize {
        self.push_pop_delta
    }

    /// Whether a palette with this name is anywhere on the stack.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries from bottom (oldest) to top (newest).
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(String::as_str)
    }
}
