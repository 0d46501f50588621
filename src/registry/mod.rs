//! Palette registry.
//!
//! This module provides:
//! - `PaletteRegistry` for storing a session's palettes by name

mod palette;

pub use palette::{PaletteRegistry, RegistryError};
