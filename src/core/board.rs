//! Playfield module - the fixed 10x22 grid.
//!
//! Row 0 is the floor and rows grow upward; rows 20-21 form the spawn buffer.
//! All movement and rotation legality questions are answered here as pure
//! queries over a hypothetical transformed copy of the piece - the live piece
//! is never touched. Mutation happens only through `lock` and `clear_row`.

use serde::{Deserialize, Serialize};

use crate::core::pieces::Piece;
use crate::types::{Cell, FIELD_COLS, FIELD_ROWS};

/// The playfield grid, indexed `[row][col]` bottom-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; FIELD_COLS]; FIELD_ROWS],
}

impl Board {
    /// A new, empty playfield.
    pub fn new() -> Self {
        Self {
            cells: [[None; FIELD_COLS]; FIELD_ROWS],
        }
    }

    /// Cell at (col, row), or None if the position is outside the grid.
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        if col < 0 || col as usize >= FIELD_COLS || row < 0 || row as usize >= FIELD_ROWS {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    /// Write a cell. Returns false if the position is outside the grid.
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        if col < 0 || col as usize >= FIELD_COLS || row < 0 || row as usize >= FIELD_ROWS {
            return false;
        }
        self.cells[row as usize][col as usize] = cell;
        true
    }

    /// All rows, bottom-up, for renderers to read.
    pub fn rows(&self) -> &[[Cell; FIELD_COLS]; FIELD_ROWS] {
        &self.cells
    }

    /// Whether every cell of the piece sits inside the grid on empty cells.
    ///
    /// The grid's top row is a hard ceiling: the spawn anchor and rotation
    /// states keep live pieces at row 20 or below, so the bound never bites
    /// during play, but it keeps a corrupt piece from escaping the grid.
    pub fn is_legal(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(col, row)| {
            col >= 0
                && (col as usize) < FIELD_COLS
                && row >= 0
                && (row as usize) < FIELD_ROWS
                && self.cells[row as usize][col as usize].is_none()
        })
    }

    /// Would a one-column shift left be legal? Pure; the piece is untouched.
    pub fn can_move_left(&self, piece: &Piece) -> bool {
        self.is_legal(&piece.moved(-1, 0))
    }

    pub fn can_move_right(&self, piece: &Piece) -> bool {
        self.is_legal(&piece.moved(1, 0))
    }

    pub fn can_move_down(&self, piece: &Piece) -> bool {
        self.is_legal(&piece.moved(0, -1))
    }

    /// Would an in-place counterclockwise rotation be legal?
    pub fn can_rotate_left(&self, piece: &Piece) -> bool {
        self.is_legal(&piece.rotated_left())
    }

    pub fn can_rotate_right(&self, piece: &Piece) -> bool {
        self.is_legal(&piece.rotated_right())
    }

    /// Whether every column of the row is occupied.
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= FIELD_ROWS {
            return false;
        }
        self.cells[row].iter().all(|cell| cell.is_some())
    }

    /// Remove a row: every row above shifts down one, the top row empties.
    pub fn clear_row(&mut self, row: usize) {
        if row >= FIELD_ROWS {
            return;
        }
        for r in row..FIELD_ROWS - 1 {
            self.cells[r] = self.cells[r + 1];
        }
        self.cells[FIELD_ROWS - 1] = [None; FIELD_COLS];
    }

    /// Write the piece's shape into each cell it covers.
    pub fn lock(&mut self, piece: &Piece) {
        let shape = piece.shape();
        for (col, row) in piece.cells() {
            self.set(col, row, Some(shape));
        }
    }

    /// Whether the whole field is empty - a perfect clear.
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_none()))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
