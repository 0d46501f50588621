//! Key types: roles, rectangles and image references.

use serde::{Deserialize, Serialize};

/// Navigation role of a key.
///
/// Roles are a closed set: a key either does nothing navigational, branches
/// forward to a named palette, or returns to the previously shown palette.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum KeyRole {
    /// No navigation behavior (the key's output is someone else's concern)
    #[default]
    Normal,
    /// Navigates forward to the palette named by `target`
    Branch { target: String },
    /// Returns to the previously shown palette
    BranchBack,
}

impl KeyRole {
    /// Returns the branch target, if this is a branch key
    pub fn target(&self) -> Option<&str> {
        match self {
            KeyRole::Branch { target } => Some(target),
            _ => None,
        }
    }

    /// Returns true for branch-back keys
    pub fn is_branch_back(&self) -> bool {
        matches!(self, KeyRole::BranchBack)
    }
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyRole::Normal => write!(f, "normal"),
            KeyRole::Branch { target } => write!(f, "branch -> {}", target),
            KeyRole::BranchBack => write!(f, "branchBack"),
        }
    }
}

/// A zero-based, end-exclusive rectangle describing where a key sits.
///
/// A valid rectangle has `right > left` and `bottom > top`. Validation is
/// done by [`crate::geometry::validate_rect`]; this type never clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl KeyRect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Number of columns spanned (zero for a degenerate rectangle)
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Number of rows spanned (zero for a degenerate rectangle)
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// Opaque reference to an image asset shown on a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// One activatable cell within a palette.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Key {
    pub id: String,
    pub role: KeyRole,
    pub rect: KeyRect,
    pub label: Option<String>,
    pub image: Option<ImageRef>,
    /// Set once a forward navigation behavior has been bound to this key
    pub(crate) wired: bool,
}

impl Key {
    /// Create a normal key with the given rectangle.
    pub fn new(id: impl Into<String>, rect: KeyRect) -> Self {
        Self { id: id.into(), rect, ..Default::default() }
    }

    /// Create a key that branches to `target`.
    pub fn branch(id: impl Into<String>, rect: KeyRect, target: impl Into<String>) -> Self {
        Self::new(id, rect).with_role(KeyRole::Branch { target: target.into() })
    }

    /// Create a key that returns to the previous palette.
    pub fn branch_back(id: impl Into<String>, rect: KeyRect) -> Self {
        Self::new(id, rect).with_role(KeyRole::BranchBack)
    }

    pub fn with_role(mut self, role: KeyRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(ImageRef { url: url.into() });
        self
    }

    /// Whether a forward navigation behavior has been bound to this key.
    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Text shown on the key: its label, falling back to its identifier.
    pub fn display_text(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}
