//! Renderer capability and the renderers shipped with the crate
//!
//! Navigation never draws anything itself: it asks a [`Renderer`] to show a
//! palette inside a container. Hosts supply their own renderer; this module
//! provides a plain-text one for the CLI and a recording one for tests.

use std::collections::HashMap;

use crate::geometry::{validate_key, GridShape};
use crate::models::Palette;

/// Displays palettes inside containers.
///
/// `render` must replace whatever the container showed before, and calling
/// it repeatedly with the same palette must not accumulate anything.
pub trait Renderer {
    /// Handle identifying where a palette is displayed
    type Container: Clone;

    fn render(&mut self, palette: &Palette, container: &Self::Container);
}

/// Renderer that records every call, in order.
#[derive(Debug, Clone)]
pub struct RecordingRenderer<C = String> {
    pub calls: Vec<(String, C)>,
}

impl<C> Default for RecordingRenderer<C> {
    fn default() -> Self {
        Self { calls: Vec::new() }
    }
}

impl<C> RecordingRenderer<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the rendered palettes, oldest first.
    pub fn rendered(&self) -> Vec<&str> {
        self.calls.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Most recent render call.
    pub fn last(&self) -> Option<&(String, C)> {
        self.calls.last()
    }
}

impl<C: Clone> Renderer for RecordingRenderer<C> {
    type Container = C;

    fn render(&mut self, palette: &Palette, container: &C) {
        self.calls.push((palette.name.clone(), container.clone()));
    }
}

/// Width in characters of one grid column in [`TextRenderer`] output.
pub const DEFAULT_CELL_WIDTH: usize = 8;

/// Largest grid, in rows and columns, [`TextRenderer`] draws. Bigger palettes
/// get a header and a note instead of a grid.
pub const MAX_DRAW_ROWS: u32 = 256;
pub const MAX_DRAW_COLUMNS: u32 = 256;

/// Widest cell [`TextRenderer::new`] accepts; narrower than 3 is raised to 3.
pub const MAX_CELL_WIDTH: usize = 32;

/// Draws palettes as character grids, one screen per named container.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    cell_width: usize,
    screens: HashMap<String, String>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_WIDTH)
    }
}

impl TextRenderer {
    pub fn new(cell_width: usize) -> Self {
        Self { cell_width: cell_width.clamp(3, MAX_CELL_WIDTH), screens: HashMap::new() }
    }

    /// What the container currently shows.
    pub fn screen(&self, container: &str) -> Option<&str> {
        self.screens.get(container).map(String::as_str)
    }

    /// Draw a palette to text.
    ///
    /// Every key becomes a `[label]` box spanning its columns; labels are
    /// clipped to the box. Keys with invalid rectangles are skipped. Grids
    /// beyond [`MAX_DRAW_ROWS`] x [`MAX_DRAW_COLUMNS`] are not drawn.
    pub fn draw(&self, palette: &Palette) -> String {
        let shape = palette.shape();
        let mut out = format!("== {} ({}) ==\n", palette.name, shape);
        if shape.is_empty() {
            return out;
        }
        if shape.rows > MAX_DRAW_ROWS || shape.cols > MAX_DRAW_COLUMNS {
            tracing::warn!(palette = %palette.name, %shape, "palette too large to draw as text");
            out.push_str(&format!(
                "(too large to draw; limit {}x{})\n",
                MAX_DRAW_ROWS, MAX_DRAW_COLUMNS
            ));
            return out;
        }

        let mut grid = blank_grid(shape, self.cell_width);
        for key in palette.keys.values() {
            if validate_key(key).is_err() {
                continue;
            }
            let x0 = key.rect.left as usize * self.cell_width;
            let x1 = key.rect.right as usize * self.cell_width;
            for y in key.rect.top as usize..key.rect.bottom as usize {
                let row = &mut grid[y];
                row[x0] = '[';
                row[x1 - 1] = ']';
                for cell in &mut row[x0 + 1..x1 - 1] {
                    *cell = ' ';
                }
            }
            let top = &mut grid[key.rect.top as usize];
            for (cell, ch) in top[x0 + 1..x1 - 1].iter_mut().zip(key.display_text().chars()) {
                *cell = ch;
            }
        }

        for row in grid {
            let line: String = row.into_iter().collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

fn blank_grid(shape: GridShape, cell_width: usize) -> Vec<Vec<char>> {
    vec![vec![' '; shape.cols as usize * cell_width]; shape.rows as usize]
}

impl Renderer for TextRenderer {
    type Container = String;

    fn render(&mut self, palette: &Palette, container: &String) {
        let screen = self.draw(palette);
        self.screens.insert(container.clone(), screen);
    }
}
