//! Palette definition files
//!
//! A definition is a JSON (or JSON5) object:
//!
//! ```json
//! {
//!   "name": "main",
//!   "keys": {
//!     "toMouse": { "left": 0, "top": 0, "right": 2, "bottom": 1,
//!                  "label": "Mouse", "type": "branch", "target": "mouse" },
//!     "back":    { "left": 2, "top": 0, "right": 3, "bottom": 1, "type": "branchBack" }
//!   }
//! }
//! ```
//!
//! The same object may also be wrapped as `{ "keyboard": { ... } }`. A key
//! without `type` is a normal key. Image references are `{ "url": "..." }`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::models::{ImageRef, Key, KeyRect, KeyRole, Palette};

/// Error when reading or interpreting a palette definition.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DefinitionError {
    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, source: std::io::Error },
    /// Not valid JSON/JSON5, or fields of the wrong shape
    #[error("Invalid palette definition: {0}")]
    Parse(String),
    /// Definition without a palette name
    #[error("Palette definition has no name")]
    MissingName,
    /// Branch key with no (or an empty) target
    #[error("Branch key '{key}' of palette '{palette}' has no target")]
    MissingTarget { palette: String, key: String },
    /// Unrecognized `type` value
    #[error("Key '{key}' of palette '{palette}' has unknown type '{value}'")]
    UnknownKeyType { palette: String, key: String, value: String },
    /// Bad glob pattern in a source list
    #[error("Invalid source pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
}

/// How to handle definition files that fail to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Stop on first error
    Strict,
    /// Skip the failing file and record a warning
    #[default]
    Lenient,
}

/// A definition file skipped in lenient mode.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub message: String,
}

/// Palettes loaded from a set of files, in load order.
#[derive(Debug, Clone, Default)]
pub struct LoadResult {
    pub palettes: Vec<Palette>,
    pub warnings: Vec<LoadWarning>,
}

/// Top-level definition object, bare or wrapped in `keyboard`.
#[derive(Debug, Deserialize)]
struct DefinitionFile {
    #[serde(default)]
    keyboard: Option<PaletteDef>,
    #[serde(flatten)]
    bare: PaletteDef,
}

#[derive(Debug, Default, Deserialize)]
struct PaletteDef {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    keys: BTreeMap<String, KeyDef>,
}

#[derive(Debug, Deserialize)]
struct KeyDef {
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    image: Option<ImageRef>,
    #[serde(default, rename = "type")]
    key_type: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

impl KeyDef {
    fn role(&self, palette: &str, key: &str) -> Result<KeyRole, DefinitionError> {
        match self.key_type.as_deref() {
            None => Ok(KeyRole::Normal),
            Some("branch") => match self.target.as_deref() {
                Some(target) if !target.is_empty() => {
                    Ok(KeyRole::Branch { target: target.to_string() })
                }
                _ => Err(DefinitionError::MissingTarget {
                    palette: palette.to_string(),
                    key: key.to_string(),
                }),
            },
            Some("branchBack") => Ok(KeyRole::BranchBack),
            Some(other) => Err(DefinitionError::UnknownKeyType {
                palette: palette.to_string(),
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Parse one palette definition.
///
/// Accepts JSON5 (comments, trailing commas, unquoted keys) as well as plain
/// JSON, with or without the `keyboard` wrapper. Key geometry is not checked
/// here; the registry rejects invalid rectangles on registration.
pub fn parse_palette(source: &str) -> Result<Palette, DefinitionError> {
    let file: DefinitionFile =
        json5::from_str(source).map_err(|e| DefinitionError::Parse(e.to_string()))?;
    let def = file.keyboard.unwrap_or(file.bare);
    let name = def.name.filter(|n| !n.is_empty()).ok_or(DefinitionError::MissingName)?;

    let mut palette = Palette::new(name);
    for (id, key_def) in def.keys {
        let role = key_def.role(&palette.name, &id)?;
        let key = Key {
            rect: KeyRect::new(key_def.left, key_def.top, key_def.right, key_def.bottom),
            role,
            label: key_def.label,
            image: key_def.image,
            ..Key::new(id, KeyRect::default())
        };
        palette.insert_key(key);
    }
    Ok(palette)
}

/// Read and parse a palette definition file.
pub fn load_file(path: &Path) -> Result<Palette, DefinitionError> {
    let contents = fs::read_to_string(path)
        .map_err(|source| DefinitionError::Io { path: path.to_path_buf(), source })?;
    parse_palette(&contents)
}

/// Expand glob patterns (relative ones against `base`) into file paths.
///
/// Paths come back in pattern order, each pattern's matches sorted.
pub fn expand_sources(patterns: &[String], base: &Path) -> Result<Vec<PathBuf>, DefinitionError> {
    let mut paths = Vec::new();
    for pattern in patterns {
        let full = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            base.join(pattern).to_string_lossy().into_owned()
        };
        let entries = glob::glob(&full).map_err(|e| DefinitionError::Pattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
        let mut matched: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
        matched.sort();
        paths.extend(matched);
    }
    Ok(paths)
}

/// Load every file, in order.
///
/// In strict mode the first failure is returned. In lenient mode failing
/// files are skipped and reported as warnings.
pub fn load_files(paths: &[PathBuf], mode: ParseMode) -> Result<LoadResult, DefinitionError> {
    let mut result = LoadResult::default();
    for path in paths {
        match load_file(path) {
            Ok(palette) => {
                tracing::debug!(path = %path.display(), palette = %palette.name, "palette loaded");
                result.palettes.push(palette);
            }
            Err(e) if mode == ParseMode::Lenient => {
                tracing::warn!(path = %path.display(), error = %e, "skipping palette definition");
                result.warnings.push(LoadWarning { path: path.clone(), message: e.to_string() });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(result)
}
