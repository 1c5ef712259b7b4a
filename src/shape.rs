//! Shape matrices for pieces
//!
//! A shape is a rectangular grid of occupied/empty flags. Shapes are values:
//! rotating one builds a new matrix and leaves the original untouched.

/// Immutable occupancy matrix, stored as rows (top to bottom)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    /// Build a shape from 0/1 rows.
    ///
    /// Panics if the matrix is empty or ragged.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        assert!(!rows.is_empty(), "shape must have at least one row");
        let width = rows[0].len();
        assert!(width > 0, "shape must have at least one column");

        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| {
                assert_eq!(row.len(), width, "shape rows must all have the same length");
                row.iter().map(|&v| v != 0).collect()
            })
            .collect();

        Self { rows }
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Occupied cells as (x, y) offsets from the top-left corner
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(x, _)| (x, y))
        })
    }

    /// Rotate 90° clockwise: `new[y][x] = old[rows - 1 - x][y]`.
    /// Width and height swap for non-square shapes.
    pub fn rotated_cw(&self) -> Shape {
        let old_rows = self.height();
        let old_cols = self.width();

        let rows = (0..old_cols)
            .map(|y| (0..old_rows).map(|x| self.rows[old_rows - 1 - x][y]).collect())
            .collect();

        Shape { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_of_t_shape() {
        let shape = Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]);
        let cells: Vec<_> = shape.cells().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let shape = Shape::from_rows(&[&[1, 1, 1, 1]]);
        let rotated = shape.rotated_cw();
        assert_eq!(rotated.width(), 1);
        assert_eq!(rotated.height(), 4);
        assert_eq!(rotated.cells().count(), 4);
    }

    #[test]
    fn test_rotate_is_clockwise() {
        // J: X..    rotated:  XX
        //    XXX              X.
        //                     X.
        let shape = Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]);
        let expected = Shape::from_rows(&[&[1, 1], &[1, 0], &[1, 0]]);
        assert_eq!(shape.rotated_cw(), expected);
    }

    #[test]
    fn test_rotate_leaves_original_untouched() {
        let shape = Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]);
        let copy = shape.clone();
        let _ = shape.rotated_cw();
        assert_eq!(shape, copy);
    }

    #[test]
    #[should_panic]
    fn test_ragged_shape_panics() {
        let _ = Shape::from_rows(&[&[1, 1], &[1]]);
    }
}
