//! Serializable full-state snapshot for suspend/resume.
//!
//! Captures every durable field of the engine - board, pieces, generator,
//! timers, progression and checkpoint flags - so a session can cross a host
//! process boundary and continue tick-for-tick identically. One-shot outputs
//! (redraw flags, pending sound) are deliberately absent: restore forces a
//! full repaint and an empty sound slot instead.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::pieces::Piece;
use crate::core::rng::PieceGen;
use crate::types::{InputSet, Outcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<Piece>,
    pub next: Piece,
    pub last_locked: Option<Piece>,
    pub generator: PieceGen,
    pub score: u32,
    pub level: u32,
    pub max_level: u32,
    pub gravity: u32,
    pub super_gravity: u32,
    pub lock_wait: u32,
    pub spawn_wait: u32,
    pub fall_wait: u32,
    pub auto_shift_wait: u32,
    pub line_clear_wait: u32,
    pub elapsed_frames: u64,
    pub dropped_lines: u32,
    pub combo: u32,
    pub last_input: InputSet,
    pub grandmaster_valid: bool,
    pub checkpoint_1_pending: bool,
    pub checkpoint_2_pending: bool,
    pub checkpoint_3_pending: bool,
    pub outcome: Outcome,
}
