//! Active falling piece

use crate::shape::Shape;
use crate::tetromino::TetrominoType;
use ratatui::style::Color;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Top-left corner of the shape's bounding box on the board
    pub x: i32,
    pub y: i32,
    /// Current orientation; replaced wholesale on rotation
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// Create a new piece at the spawn position for a board of `board_width` columns
    pub fn spawn(piece_type: TetrominoType, board_width: usize) -> Self {
        Self::with_shape(piece_type, piece_type.shape(), spawn_column(board_width), 0)
    }

    /// Create a piece with an explicit shape and origin
    pub fn with_shape(piece_type: TetrominoType, shape: Shape, x: i32, y: i32) -> Self {
        Self {
            piece_type,
            x,
            y,
            shape,
            color: piece_type.color(),
        }
    }

    /// Get the absolute (x, y) positions of all occupied cells
    pub fn block_positions(&self) -> Vec<(i32, i32)> {
        self.shape
            .cells()
            .map(|(dx, dy)| (self.x + dx as i32, self.y + dy as i32))
            .collect()
    }
}

/// Column where new pieces spawn: centered, biased left
pub fn spawn_column(board_width: usize) -> i32 {
    (board_width / 2) as i32 - 1
}
