//! Tetromino definitions and shapes
//!
//! The 7 standard tetrominoes, each with its spawn shape matrix and color.

use crate::shape::Shape;
use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    J, // Blue
    L, // Orange
    O, // Yellow - square
    S, // Green
    T, // Purple
    Z, // Red
}

impl TetrominoType {
    /// Every kind, in catalog order
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::I,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::O,
        TetrominoType::S,
        TetrominoType::T,
        TetrominoType::Z,
    ];

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Rgb(0x00, 0xf0, 0xf0),
            TetrominoType::J => Color::Rgb(0x00, 0x00, 0xf0),
            TetrominoType::L => Color::Rgb(0xf0, 0xa0, 0x00),
            TetrominoType::O => Color::Rgb(0xf0, 0xf0, 0x00),
            TetrominoType::S => Color::Rgb(0x00, 0xf0, 0x00),
            TetrominoType::T => Color::Rgb(0xa0, 0x00, 0xf0),
            TetrominoType::Z => Color::Rgb(0xf0, 0x00, 0x00),
        }
    }

    /// Get the spawn shape matrix for this tetromino
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::J => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            TetrominoType::L => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::S => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            TetrominoType::Z => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
        }
    }

    #[cfg(test)]
    pub(crate) fn name(&self) -> char {
        match self {
            TetrominoType::I => 'I',
            TetrominoType::J => 'J',
            TetrominoType::L => 'L',
            TetrominoType::O => 'O',
            TetrominoType::S => 'S',
            TetrominoType::T => 'T',
            TetrominoType::Z => 'Z',
        }
    }
}

impl TryFrom<char> for TetrominoType {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'I' => Ok(TetrominoType::I),
            'J' => Ok(TetrominoType::J),
            'L' => Ok(TetrominoType::L),
            'O' => Ok(TetrominoType::O),
            'S' => Ok(TetrominoType::S),
            'T' => Ok(TetrominoType::T),
            'Z' => Ok(TetrominoType::Z),
            other => Err(format!("unknown piece kind '{}'", other)),
        }
    }
}
