//! Grid geometry for palettes
//!
//! Key rectangles are zero-based and end-exclusive. Rendering grids are
//! one-based (CSS grid lines), so placements shift every edge by one.

use thiserror::Error;

use crate::models::{Key, KeyRect, Palette};

/// Number of rows and columns a palette's keys span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

impl GridShape {
    /// CSS `grid-template-columns` value for this shape.
    pub fn template_columns(&self) -> String {
        format!("repeat({}, auto)", self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// One-based, end-exclusive grid lines for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPlacement {
    pub col_start: u32,
    pub col_end: u32,
    pub row_start: u32,
    pub row_end: u32,
}

impl GridPlacement {
    /// Inline CSS for placing the key in a grid container.
    pub fn css(&self) -> String {
        format!(
            "grid-column: {} / {}; grid-row: {} / {}",
            self.col_start, self.col_end, self.row_start, self.row_end
        )
    }
}

/// Invalid key geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum GeometryError {
    /// Rectangle with `right <= left` or `bottom <= top`
    #[error("key '{key}' has an empty or inverted rectangle (left {}, top {}, right {}, bottom {})", .rect.left, .rect.top, .rect.right, .rect.bottom)]
    InvalidRect { key: String, rect: KeyRect },
    /// Edge with no one-based grid line (`right` or `bottom` at `u32::MAX`)
    #[error("key '{key}' extends past the largest grid line (right {}, bottom {})", .rect.right, .rect.bottom)]
    OutOfRange { key: String, rect: KeyRect },
}

/// Check that a rectangle spans at least one row and one column and that
/// every edge has a one-based grid line.
pub fn validate_rect(key_id: &str, rect: &KeyRect) -> Result<(), GeometryError> {
    if rect.right <= rect.left || rect.bottom <= rect.top {
        return Err(GeometryError::InvalidRect { key: key_id.to_string(), rect: *rect });
    }
    if rect.right == u32::MAX || rect.bottom == u32::MAX {
        return Err(GeometryError::OutOfRange { key: key_id.to_string(), rect: *rect });
    }
    Ok(())
}

/// Check a key's rectangle.
pub fn validate_key(key: &Key) -> Result<(), GeometryError> {
    validate_rect(&key.id, &key.rect)
}

/// Resolve a palette's grid shape: the maximum `bottom` is the row count and
/// the maximum `right` the column count. A palette with no keys is 0x0.
pub fn resolve_shape(palette: &Palette) -> GridShape {
    palette.keys.values().fold(GridShape::default(), |shape, key| GridShape {
        rows: shape.rows.max(key.rect.bottom),
        cols: shape.cols.max(key.rect.right),
    })
}

/// Convert a key's rectangle into one-based grid lines.
///
/// Fails for invalid or out-of-range rectangles instead of clamping them.
pub fn placement_of(key: &Key) -> Result<GridPlacement, GeometryError> {
    validate_key(key)?;
    let rect = key.rect;
    let line = |edge: u32| {
        edge.checked_add(1).ok_or_else(|| GeometryError::OutOfRange { key: key.id.clone(), rect })
    };
    Ok(GridPlacement {
        col_start: line(rect.left)?,
        col_end: line(rect.right)?,
        row_start: line(rect.top)?,
        row_end: line(rect.bottom)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_key_palette() -> Palette {
        Palette::new("row")
            .with_key(Key::new("A", KeyRect::new(0, 0, 2, 1)))
            .with_key(Key::new("B", KeyRect::new(2, 0, 4, 1)))
    }

    #[test]
    fn test_resolve_shape_two_keys() {
        assert_eq!(resolve_shape(&two_key_palette()), GridShape { rows: 1, cols: 4 });
    }

    #[test]
    fn test_resolve_shape_empty_palette() {
        assert_eq!(resolve_shape(&Palette::new("empty")), GridShape { rows: 0, cols: 0 });
        assert!(GridShape::default().is_empty());
    }

    #[test]
    fn test_resolve_shape_is_idempotent() {
        let palette = two_key_palette();
        assert_eq!(resolve_shape(&palette), resolve_shape(&palette));
    }

    #[test]
    fn test_resolve_shape_uses_max_edges_not_last_key() {
        let palette = Palette::new("tall")
            .with_key(Key::new("a", KeyRect::new(0, 0, 1, 5)))
            .with_key(Key::new("b", KeyRect::new(0, 0, 7, 1)));
        assert_eq!(resolve_shape(&palette), GridShape { rows: 5, cols: 7 });
    }

    #[test]
    fn test_placement_shifts_to_one_based() {
        let palette = two_key_palette();
        let placement = placement_of(palette.key("A").unwrap()).unwrap();
        assert_eq!(
            placement,
            GridPlacement { col_start: 1, col_end: 3, row_start: 1, row_end: 2 }
        );
    }

    #[test]
    fn test_placement_css() {
        let key = Key::new("B", KeyRect::new(2, 0, 4, 1));
        assert_eq!(placement_of(&key).unwrap().css(), "grid-column: 3 / 5; grid-row: 1 / 2");
    }

    #[test]
    fn test_placement_rejects_inverted_rect() {
        let key = Key::new("bad", KeyRect::new(3, 0, 1, 1));
        let err = placement_of(&key).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidRect { key: "bad".to_string(), rect: KeyRect::new(3, 0, 1, 1) }
        );
        assert!(err.to_string().contains("'bad'"));
    }

    #[test]
    fn test_validate_rect_rejects_zero_height() {
        assert!(validate_rect("flat", &KeyRect::new(0, 2, 1, 2)).is_err());
        assert!(validate_rect("ok", &KeyRect::new(0, 2, 1, 3)).is_ok());
    }

    #[test]
    fn test_placement_rejects_edge_at_u32_max() {
        let rect = KeyRect::new(0, 0, u32::MAX, 1);
        let key = Key::new("wide", rect);
        assert_eq!(
            placement_of(&key),
            Err(GeometryError::OutOfRange { key: "wide".to_string(), rect })
        );
        assert!(validate_rect("tall", &KeyRect::new(0, 0, 1, u32::MAX)).is_err());

        let largest = Key::new("edge", KeyRect::new(u32::MAX - 2, 0, u32::MAX - 1, 1));
        assert_eq!(placement_of(&largest).unwrap().col_end, u32::MAX);
    }

    #[test]
    fn test_template_columns() {
        assert_eq!(GridShape { rows: 3, cols: 12 }.template_columns(), "repeat(12, auto)");
        assert_eq!(GridShape { rows: 3, cols: 12 }.to_string(), "3x12");
    }
}
