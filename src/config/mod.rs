//! Configuration module for the on-screen keyboard
//!
//! Provides types, discovery and parsing for `osk.toml`.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
