//! Data model types for palettes and their keys.

mod key;
mod palette;

pub use key::{ImageRef, Key, KeyRect, KeyRole};
pub use palette::Palette;
