//! osk - On-screen keyboard palettes and branch navigation
//!
//! This library provides functionality to:
//! - Resolve palette key rectangles into rendering-grid shapes and placements
//! - Keep a session's palettes in a name-keyed registry
//! - Track branch-back history on a bounded navigation stack
//! - Wire branch and branch-back keys to navigation behaviors exactly once
//! - Load palette definitions from JSON/JSON5 files

pub mod cli;
pub mod config;
pub mod definition;
pub mod geometry;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod registry;
pub mod render;
pub mod session;
