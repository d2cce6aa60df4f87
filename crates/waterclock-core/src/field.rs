//! The cell grid and its geometry.
//!
//! Glyphs are 3×5 units, one unit being `ZOOM × ZOOM` cells. Four digit slots
//! of three units each sit between one-unit separators, so the field is
//! `(1 + 4 * 4)` units wide. Vertically there is a one-unit open header band,
//! five glyph rows and a one-unit floor. One extra drain row below the visible
//! area acts as a sink.

use crate::cell::{Cell, Species};

/// Cells per glyph unit.
pub const ZOOM: usize = 3;

/// Number of digit slots (HH:MM).
pub const SLOT_COUNT: usize = 4;

/// Visible width in cells.
pub const WIDTH: usize = (1 + SLOT_COUNT * 4) * ZOOM;

/// Visible height in cells.
pub const HEIGHT: usize = 7 * ZOOM;

/// Index of the drain row beneath the visible area.
pub const DRAIN_ROW: usize = HEIGHT;

/// Stored rows, including the drain row.
pub const ROWS: usize = HEIGHT + 1;

/// A fixed-size grid of cells, `WIDTH × (HEIGHT + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    cells: Vec<Cell>,
}

impl Default for Field {
    fn default() -> Self {
        Self::blank()
    }
}

impl Field {
    /// A field filled with background.
    pub fn blank() -> Self {
        Self {
            cells: vec![Cell::Background; WIDTH * ROWS],
        }
    }

    /// Bare terrain with no digits: an open header band, solid wall down to the
    /// last visible row and an empty drain row.
    pub fn terrain() -> Self {
        let mut field = Self::blank();
        for y in ZOOM..HEIGHT {
            for x in 0..WIDTH {
                field.set(x, y, Cell::Wall);
            }
        }
        field
    }

    /// Whether signed coordinates fall inside the stored grid.
    pub fn in_bounds(x: isize, y: isize) -> bool {
        x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < ROWS
    }

    /// Edge columns and the drain row swallow any liquid that enters them.
    pub fn is_sink(x: usize, y: usize) -> bool {
        x == 0 || x == WIDTH - 1 || y == DRAIN_ROW
    }

    /// Cell at `(x, y)`. Coordinates must be in bounds.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[Self::index(x, y)]
    }

    /// Cell at signed coordinates, `None` outside the grid.
    pub fn cell(&self, x: isize, y: isize) -> Option<Cell> {
        Self::in_bounds(x, y).then(|| self.get(x as usize, y as usize))
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        let index = Self::index(x, y);
        self.cells[index] = cell;
    }

    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) {
        self.cells.swap(Self::index(a.0, a.1), Self::index(b.0, b.1));
    }

    /// Put a droplet at `(x, y)` unless that position is a sink, in which case
    /// the droplet is gone. Returns whether it persisted.
    pub fn place_liquid(&mut self, x: usize, y: usize, species: Species) -> bool {
        if Self::is_sink(x, y) {
            self.set(x, y, Cell::Background);
            false
        } else {
            self.set(x, y, Cell::Liquid(species));
            true
        }
    }

    /// Move the droplet at `from` into `to`, leaving background behind.
    pub fn move_liquid(&mut self, from: (usize, usize), to: (usize, usize)) -> bool {
        let Some(species) = self.get(from.0, from.1).species() else {
            return false;
        };
        self.set(from.0, from.1, Cell::Background);
        self.place_liquid(to.0, to.1, species)
    }

    /// Visible rows, top to bottom, without the drain row.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH).take(HEIGHT)
    }

    /// Every stored cell with its coordinates, drain row included.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &cell)| (i % WIDTH, i / WIDTH, cell))
    }

    pub fn liquid_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_liquid()).count()
    }

    fn index(x: usize, y: usize) -> usize {
        debug_assert!(x < WIDTH && y < ROWS, "cell ({x}, {y}) out of bounds");
        y * WIDTH + x
    }
}
