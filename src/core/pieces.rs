//! Piece geometry catalog and the active piece instance.
//!
//! Geometry lives in a constant table keyed by `Shape`, so the tag's
//! declaration order carries no meaning. Each rotation state is exactly four
//! (col, row) offsets from the piece anchor, rows counted bottom-up like the
//! playfield. State counts differ per shape: O has one, I/S/Z two, J/L/T four.

use serde::{Deserialize, Serialize};

use crate::types::{Shape, SPAWN_COL, SPAWN_ROW};

/// Offset of a single cell relative to the piece anchor.
pub type CellOffset = (i8, i8);

/// One rotation state - four cell offsets.
pub type RotationState = [CellOffset; 4];

const I_STATES: [RotationState; 2] = [
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(2, 3), (2, 2), (2, 1), (2, 0)],
];

const J_STATES: [RotationState; 4] = [
    [(0, 2), (1, 2), (2, 2), (2, 1)],
    [(1, 3), (1, 2), (1, 1), (0, 1)],
    [(0, 2), (0, 1), (1, 1), (2, 1)],
    [(1, 3), (2, 3), (1, 2), (1, 1)],
];

const L_STATES: [RotationState; 4] = [
    [(0, 2), (1, 2), (2, 2), (0, 1)],
    [(1, 3), (0, 3), (1, 2), (1, 1)],
    [(2, 2), (0, 1), (1, 1), (2, 1)],
    [(1, 3), (1, 2), (1, 1), (2, 1)],
];

const O_STATES: [RotationState; 1] = [[(1, 2), (2, 2), (1, 1), (2, 1)]];

const S_STATES: [RotationState; 2] = [
    [(1, 2), (2, 2), (1, 1), (0, 1)],
    [(0, 3), (0, 2), (1, 2), (1, 1)],
];

const T_STATES: [RotationState; 4] = [
    [(0, 2), (1, 2), (2, 2), (1, 1)],
    [(1, 3), (1, 2), (0, 2), (1, 1)],
    [(1, 2), (0, 1), (1, 1), (2, 1)],
    [(1, 3), (1, 2), (2, 2), (1, 1)],
];

const Z_STATES: [RotationState; 2] = [
    [(0, 2), (1, 2), (1, 1), (2, 1)],
    [(2, 3), (1, 2), (2, 2), (1, 1)],
];

/// Ordered rotation states for a shape.
pub fn rotation_states(shape: Shape) -> &'static [RotationState] {
    match shape {
        Shape::I => &I_STATES,
        Shape::J => &J_STATES,
        Shape::L => &L_STATES,
        Shape::O => &O_STATES,
        Shape::S => &S_STATES,
        Shape::T => &T_STATES,
        Shape::Z => &Z_STATES,
    }
}

/// Number of rotation states a shape has.
pub fn state_count(shape: Shape) -> usize {
    rotation_states(shape).len()
}

/// A falling piece: a shape tag, a rotation index and an anchor position.
///
/// `Piece` is a plain value; movement and rotation produce transformed
/// copies, and the engine commits a copy only after the playfield has
/// accepted it. Invariant: `rotation < state_count(shape)`, maintained by
/// the rotation operators and re-checked when a snapshot is restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    shape: Shape,
    rotation: u8,
    col: i8,
    row: i8,
}

impl Piece {
    /// A piece of the given shape at the spawn anchor.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            rotation: 0,
            col: SPAWN_COL,
            row: SPAWN_ROW,
        }
    }

    /// A piece at an arbitrary rotation and anchor.
    pub fn at(shape: Shape, rotation: u8, col: i8, row: i8) -> Self {
        Self {
            shape,
            rotation,
            col,
            row,
        }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    /// Absolute cells: anchor plus each offset of the current state.
    pub fn cells(&self) -> [(i8, i8); 4] {
        let state = rotation_states(self.shape)[self.rotation as usize];
        state.map(|(dc, dr)| (self.col + dc, self.row + dr))
    }

    /// Copy shifted by (dc, dr). Positive dr is up.
    #[must_use]
    pub fn moved(&self, dc: i8, dr: i8) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
            ..*self
        }
    }

    /// Copy rotated one state clockwise, wrapping cyclically.
    #[must_use]
    pub fn rotated_right(&self) -> Self {
        let count = state_count(self.shape) as u8;
        Self {
            rotation: (self.rotation + 1) % count,
            ..*self
        }
    }

    /// Copy rotated one state counterclockwise, wrapping cyclically.
    #[must_use]
    pub fn rotated_left(&self) -> Self {
        let count = state_count(self.shape) as u8;
        Self {
            rotation: (self.rotation + count - 1) % count,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_counts() {
        assert_eq!(state_count(Shape::I), 2);
        assert_eq!(state_count(Shape::J), 4);
        assert_eq!(state_count(Shape::L), 4);
        assert_eq!(state_count(Shape::O), 1);
        assert_eq!(state_count(Shape::S), 2);
        assert_eq!(state_count(Shape::T), 4);
        assert_eq!(state_count(Shape::Z), 2);
    }

    #[test]
    fn test_rotation_wraps_both_directions() {
        for shape in Shape::ALL {
            let count = state_count(shape) as u8;
            let piece = Piece::new(shape);

            // A full clockwise cycle returns to the spawn state.
            let mut cw = piece;
            for _ in 0..count {
                cw = cw.rotated_right();
                assert!((cw.rotation() as usize) < state_count(shape));
            }
            assert_eq!(cw, piece);

            // One step counterclockwise from spawn lands on the last state.
            let ccw = piece.rotated_left();
            assert_eq!(ccw.rotation(), count - 1);
            assert_eq!(ccw.rotated_right(), piece);
        }
    }

    #[test]
    fn test_rotation_index_stays_valid_under_mixed_sequences() {
        for shape in Shape::ALL {
            let mut piece = Piece::new(shape);
            for i in 0..100 {
                piece = if i % 3 == 0 {
                    piece.rotated_left()
                } else {
                    piece.rotated_right()
                };
                assert!((piece.rotation() as usize) < state_count(shape));
            }
        }
    }

    #[test]
    fn test_cells_are_anchor_plus_offsets() {
        let piece = Piece::new(Shape::O);
        assert_eq!(piece.cells(), [(4, 19), (5, 19), (4, 18), (5, 18)]);

        let flat_i = Piece::at(Shape::I, 0, 0, -2);
        assert_eq!(flat_i.cells(), [(0, 0), (1, 0), (2, 0), (3, 0)]);
    }

    #[test]
    fn test_moved_is_pure() {
        let piece = Piece::new(Shape::T);
        let shifted = piece.moved(-1, -3);
        assert_eq!(shifted.col(), piece.col() - 1);
        assert_eq!(shifted.row(), piece.row() - 3);
        assert_eq!(piece, Piece::new(Shape::T));
    }

    #[test]
    fn test_o_piece_rotation_is_identity() {
        let piece = Piece::new(Shape::O);
        assert_eq!(piece.rotated_right(), piece);
        assert_eq!(piece.rotated_left(), piece);
    }

    #[test]
    fn test_every_state_has_four_cells() {
        for shape in Shape::ALL {
            for state in rotation_states(shape) {
                assert_eq!(state.len(), 4);
            }
        }
    }
}
