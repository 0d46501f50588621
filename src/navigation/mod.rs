//! Palette-to-palette navigation.
//!
//! This module provides:
//! - `NavigationStack`, the bounded branch-back history
//! - `KeyBindings`, the table of behaviors attached to navigation keys
//! - `wire_all` / `wire_back_key`, which discover branch relationships in a
//!   registry and bind each navigation key exactly once

mod bindings;
mod stack;
mod wiring;

pub use bindings::{Binding, KeyAction, KeyBindings};
pub use stack::{NavigationError, NavigationStack, PushOutcome, DEFAULT_CAPACITY};
pub use wiring::{wire_all, wire_back_key, WiringIssue, WiringReport};
