//! Game board representation
//!
//! Coordinates are (x, y) with x growing rightward and y growing downward;
//! row 0 is the top of the board.

use ratatui::style::Color;

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    /// Rows stored top to bottom, each exactly `width` cells long
    rows: Vec<Vec<Cell>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be non-zero");
        Self {
            width,
            rows: vec![vec![Cell::Empty; width]; height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Get the cell at (x, y). The caller guarantees the position is on the board.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Set the cell at (x, y). The caller guarantees the position is on the board.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| cell.is_filled())
    }

    /// Remove a row and insert an empty one at the top, shifting
    /// everything above the removed row down by one
    pub fn remove_row(&mut self, y: usize) {
        self.rows.remove(y);
        self.rows.insert(0, vec![Cell::Empty; self.width]);
    }

    /// Lock a set of block positions onto the board.
    /// Positions above the top edge are dropped.
    pub fn lock_cells(&mut self, positions: &[(i32, i32)], color: Color) {
        for &(x, y) in positions {
            if y < 0 {
                continue;
            }
            self.set(x as usize, y as usize, Cell::Filled(color));
        }
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.rows
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|row| row.as_slice())
    }

    /// All filled cells as (x, y, color)
    pub fn filled_cells(&self) -> Vec<(usize, usize, Color)> {
        let mut cells = Vec::new();
        for (y, row) in self.rows.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Cell::Filled(color) = cell {
                    cells.push((x, y, *color));
                }
            }
        }
        cells
    }

    /// Fill every cell of a row except the listed columns
    #[cfg(test)]
    pub(crate) fn fill_row_except(&mut self, y: usize, holes: &[usize], color: Color) {
        for x in 0..self.width {
            if !holes.contains(&x) {
                self.set(x, y, Cell::Filled(color));
            }
        }
    }
}
