//! Placement legality checks

use crate::board::Board;
use crate::piece::Piece;
use crate::shape::Shape;

/// Returns true if `candidate` (or the piece's own shape) would collide when
/// the piece is offset by (dx, dy).
///
/// A cell collides when it is left/right of the board, below the bottom
/// row, or on a filled cell. Cells above the top row never collide.
pub fn check_collision(
    piece: &Piece,
    board: &Board,
    dx: i32,
    dy: i32,
    candidate: Option<&Shape>,
) -> bool {
    let shape = candidate.unwrap_or(&piece.shape);
    let width = board.width() as i32;
    let height = board.height() as i32;

    shape.cells().any(|(sx, sy)| {
        let x = piece.x + sx as i32 + dx;
        let y = piece.y + sy as i32 + dy;

        if x < 0 || x >= width || y >= height {
            return true;
        }
        y >= 0 && board.get(x as usize, y as usize).is_filled()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
    use crate::tetromino::TetrominoType;
    use ratatui::style::Color;

    #[test]
    fn test_fresh_spawn_never_collides() {
        let board = Board::default();
        for kind in TetrominoType::ALL {
            let piece = Piece::spawn(kind, BOARD_WIDTH);
            assert!(!check_collision(&piece, &board, 0, 0, None), "{:?}", kind);
        }
    }

    #[test]
    fn test_walls_and_floor() {
        let board = Board::default();
        let mut piece = Piece::spawn(TetrominoType::O, BOARD_WIDTH);

        piece.x = 0;
        assert!(check_collision(&piece, &board, -1, 0, None));
        assert!(!check_collision(&piece, &board, 1, 0, None));

        piece.x = BOARD_WIDTH as i32 - 2;
        assert!(check_collision(&piece, &board, 1, 0, None));

        piece.y = BOARD_HEIGHT as i32 - 2;
        assert!(check_collision(&piece, &board, 0, 1, None));
    }

    #[test]
    fn test_above_top_is_not_a_collision() {
        let board = Board::default();
        let piece = Piece::spawn(TetrominoType::I, BOARD_WIDTH);
        assert!(!check_collision(&piece, &board, 0, -3, None));
    }

    #[test]
    fn test_filled_cell_collides() {
        let mut board = Board::default();
        board.set(4, 2, Cell::Filled(Color::Red));
        let piece = Piece::spawn(TetrominoType::O, BOARD_WIDTH);

        assert!(!check_collision(&piece, &board, 0, 0, None));
        assert!(check_collision(&piece, &board, 0, 1, None));
    }

    #[test]
    fn test_candidate_shape_is_checked() {
        let board = Board::default();
        let mut piece = Piece::spawn(TetrominoType::I, BOARD_WIDTH);
        // Vertical I at the bottom would poke through the floor
        piece.y = BOARD_HEIGHT as i32 - 1;
        let vertical = piece.shape.rotated_cw();

        assert!(!check_collision(&piece, &board, 0, 0, None));
        assert!(check_collision(&piece, &board, 0, 0, Some(&vertical)));
    }
}
