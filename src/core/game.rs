//! Game engine module - the per-tick state machine.
//!
//! Owns the playfield, the active and queued pieces, every timer, score and
//! progression state, and the piece generator. `advance_frame` consumes one
//! held-input set and performs exactly one tick's worth of work; all timing
//! is counted in ticks, never wall-clock. The driving loop, rendering and
//! audio live outside this module and only read the accessors.

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::core::board::Board;
use crate::core::pieces::{state_count, Piece};
use crate::core::rng::PieceGen;
use crate::core::scoring::{
    clear_score, grade, speed_for_level, CHECKPOINT_1, CHECKPOINT_2, CHECKPOINT_3,
};
use crate::core::snapshot::GameSnapshot;
use crate::types::{
    Input, InputSet, Outcome, Shape, SoundEffect, AUTO_SHIFT_DELAY, FRAME_MS, FULL_GAME_MAX_LEVEL,
    LINE_CLEAR_DELAY, LOCK_DELAY, SPAWN_DELAY,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error(
        "invalid session config: start level {start_level} must be below \
         max level {max_level}, and max level at most 999"
    )]
    InvalidConfig { start_level: u32, max_level: u32 },
    #[error("snapshot rejected: {reason}")]
    InvalidSnapshot { reason: &'static str },
}

/// A running session. Constructing one starts it: there is no unstarted
/// engine to misuse. Once `outcome` leaves `InProgress` further ticks are
/// ignored; callers should simply stop advancing.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<Piece>,
    next: Piece,
    last_locked: Option<Piece>,
    generator: PieceGen,
    score: u32,
    level: u32,
    max_level: u32,
    // Frames per row while nonzero; rows per frame otherwise.
    gravity: u32,
    super_gravity: u32,
    lock_wait: u32,
    spawn_wait: u32,
    fall_wait: u32,
    auto_shift_wait: u32,
    line_clear_wait: u32,
    elapsed_frames: u64,
    dropped_lines: u32,
    combo: u32,
    last_input: InputSet,
    grandmaster_valid: bool,
    check1: bool,
    check2: bool,
    check3: bool,
    outcome: Outcome,
    piece_redraw: bool,
    board_redraw: bool,
    pending_sound: Option<SoundEffect>,
}

impl Game {
    /// Begin a session.
    ///
    /// Grandmaster eligibility requires `start_level == 0` and
    /// `max_level == 999`; any other in-range combination plays a normal,
    /// ineligible session.
    pub fn new(start_level: u32, max_level: u32, seed: u32) -> Result<Self, GameError> {
        if start_level >= max_level || max_level > FULL_GAME_MAX_LEVEL {
            return Err(GameError::InvalidConfig {
                start_level,
                max_level,
            });
        }

        let mut generator = PieceGen::new(seed);
        let first = Piece::new(generator.first_draw());
        let next = Piece::new(generator.draw());
        let grandmaster_valid = start_level == 0 && max_level == FULL_GAME_MAX_LEVEL;

        let mut game = Self {
            board: Board::new(),
            active: Some(first),
            next,
            last_locked: None,
            generator,
            score: 0,
            level: 0,
            max_level,
            gravity: 0,
            super_gravity: 0,
            lock_wait: 0,
            spawn_wait: 0,
            fall_wait: 0,
            auto_shift_wait: 0,
            // Not frozen: the freeze window only engages after a clear.
            line_clear_wait: LINE_CLEAR_DELAY,
            elapsed_frames: 0,
            // The opening piece follows the same spawn rule as every other.
            dropped_lines: 1,
            combo: 1,
            last_input: InputSet::empty(),
            grandmaster_valid,
            check1: grandmaster_valid,
            check2: grandmaster_valid,
            check3: grandmaster_valid,
            outcome: Outcome::InProgress,
            piece_redraw: true,
            board_redraw: false,
            pending_sound: None,
        };
        game.add_level(start_level);
        Ok(game)
    }

    /// Advance the session by exactly one tick.
    ///
    /// `input` is the set of controls held right now; the engine compares it
    /// against last tick's raw set to keep rotation from auto-repeating and
    /// to delay directional auto-shift.
    pub fn advance_frame(&mut self, input: InputSet) {
        if self.outcome != Outcome::InProgress {
            return;
        }
        self.elapsed_frames += 1;

        // Freeze window after a clear: nothing but the timer moves.
        if self.line_clear_wait < LINE_CLEAR_DELAY {
            self.line_clear_wait += 1;
            return;
        }

        let mut working = input;
        if self.last_input.contains(Input::RotateLeft)
            || self.last_input.contains(Input::RotateRight)
        {
            // Rotation never repeats while held.
            working.remove(Input::RotateLeft);
            working.remove(Input::RotateRight);
        }
        if working.intersects(self.last_input) {
            // Held directions wait out the auto-shift delay. The timer keeps
            // charging even with no piece on the field.
            if self.auto_shift_wait < AUTO_SHIFT_DELAY && !working.is_empty() {
                working.remove(Input::Left);
                working.remove(Input::Right);
                working.remove(Input::Down);
                self.auto_shift_wait += 1;
            }
        } else {
            self.auto_shift_wait = 0;
        }
        // Next tick compares against the raw set, not the filtered one.
        self.last_input = input;

        let mut just_spawned = false;
        if self.active.is_none() {
            self.spawn_wait += 1;
            if self.spawn_wait >= SPAWN_DELAY {
                self.active = Some(self.next);
                self.next = Piece::new(self.generator.draw());
                self.piece_redraw = true;
                just_spawned = true;
                self.spawn_wait = 0;
                self.fall_wait = 0;
                self.dropped_lines = 1;
                // Spawning raises the level, except at century boundaries and
                // one short of the end.
                if (self.level + 1) % 100 != 0 && self.level != self.max_level - 1 {
                    self.add_level(1);
                }
            }
        }

        if self.active.is_none() {
            return;
        }

        if just_spawned {
            // Spawn tick takes rotations only, read from the raw input so a
            // rotation held through the spawn still pre-rotates the piece.
            if input.contains(Input::RotateLeft) {
                self.rotate_left();
            }
            if input.contains(Input::RotateRight) {
                self.rotate_right();
            }
            if let Some(piece) = self.active {
                if !self.board.is_legal(&piece) {
                    self.outcome = Outcome::Lost;
                    return;
                }
            }
        } else {
            if working.contains(Input::Left) {
                self.move_left();
            }
            if working.contains(Input::Right) {
                self.move_right();
            }
            if working.contains(Input::RotateLeft) {
                self.rotate_left();
            }
            if working.contains(Input::RotateRight) {
                self.rotate_right();
            }
            if working.contains(Input::Down) {
                self.soft_drop();
            }
        }

        let Some(piece) = self.active else { return };
        if self.board.can_move_down(&piece) {
            self.lock_wait = 0;
            if self.gravity > 0 {
                self.fall_wait += 1;
                if self.fall_wait >= self.gravity {
                    self.fall_wait = 0;
                    self.active = Some(piece.moved(0, -1));
                    self.piece_redraw = true;
                }
            } else {
                let mut fallen = piece;
                for _ in 0..self.super_gravity {
                    if !self.board.can_move_down(&fallen) {
                        break;
                    }
                    fallen = fallen.moved(0, -1);
                    self.piece_redraw = true;
                }
                self.active = Some(fallen);
            }
        } else {
            self.lock_wait += 1;
            if self.lock_wait >= LOCK_DELAY {
                self.board.lock(&piece);
                self.lock_wait = 0;
                self.pending_sound = Some(SoundEffect::Lock);
                self.resolve_clears(&piece);
                self.last_locked = Some(piece);
                self.active = None;
            }
        }
    }

    // ===== Movement operators ==============================================

    fn move_left(&mut self) {
        let Some(piece) = self.active else { return };
        if self.board.can_move_left(&piece) {
            self.active = Some(piece.moved(-1, 0));
            self.piece_redraw = true;
        }
    }

    fn move_right(&mut self) {
        let Some(piece) = self.active else { return };
        if self.board.can_move_right(&piece) {
            self.active = Some(piece.moved(1, 0));
            self.piece_redraw = true;
        }
    }

    fn rotate_left(&mut self) {
        let Some(piece) = self.active else { return };
        if self.board.can_rotate_left(&piece) {
            self.active = Some(piece.rotated_left());
            self.piece_redraw = true;
            return;
        }
        // Wall kick: left rotation taps the piece one column right. The long
        // bar never kicks.
        if piece.shape() == Shape::I {
            return;
        }
        let kicked = piece.moved(1, 0);
        if self.board.can_rotate_left(&kicked) {
            self.active = Some(kicked.rotated_left());
            self.piece_redraw = true;
        }
    }

    fn rotate_right(&mut self) {
        let Some(piece) = self.active else { return };
        if self.board.can_rotate_right(&piece) {
            self.active = Some(piece.rotated_right());
            self.piece_redraw = true;
            return;
        }
        // Right rotation kicks one column left.
        if piece.shape() == Shape::I {
            return;
        }
        let kicked = piece.moved(-1, 0);
        if self.board.can_rotate_right(&kicked) {
            self.active = Some(kicked.rotated_right());
            self.piece_redraw = true;
        }
    }

    /// Soft drop: schedules an immediate fall or lock at this tick's gravity
    /// evaluation rather than moving the piece directly.
    fn soft_drop(&mut self) {
        self.lock_wait = LOCK_DELAY;
        self.fall_wait = self.gravity;
        self.dropped_lines += 1;
    }

    // ===== Lock resolution =================================================

    /// Clear any full rows the locked piece touched, then score, advance the
    /// level, and settle the win/checkpoint state.
    fn resolve_clears(&mut self, piece: &Piece) {
        let mut rows: ArrayVec<i8, 4> = ArrayVec::new();
        for (_, row) in piece.cells() {
            if !rows.contains(&row) {
                rows.push(row);
            }
        }
        // Top row first, so compaction cannot shift a row still unchecked.
        rows.sort_unstable_by(|a, b| b.cmp(a));

        let mut cleared: u32 = 0;
        for &row in &rows {
            if row >= 0 && self.board.is_row_full(row as usize) {
                self.board.clear_row(row as usize);
                cleared += 1;
            }
        }

        if cleared == 0 {
            self.combo = 1;
            return;
        }

        // Emptying the whole field quadruples the clear.
        let bravo = if self.board.is_empty() { 4 } else { 1 };
        self.score += clear_score(self.level, cleared, self.dropped_lines, self.combo, bravo);
        self.combo += cleared * 2 - 2;

        self.add_level(cleared);
        if self.level >= self.max_level {
            self.level = self.max_level;
            if self.check3 {
                if !CHECKPOINT_3.passed(self.score, self.elapsed_ms()) {
                    self.grandmaster_valid = false;
                }
                self.check3 = false;
            }
            self.outcome = Outcome::Won;
        }

        self.board_redraw = true;
        self.pending_sound = Some(SoundEffect::LineClear);
        self.line_clear_wait = 0;
    }

    /// Raise the level and re-derive fall speed; fire any grandmaster
    /// checkpoint whose band this transition enters. A failed checkpoint
    /// disqualifies the grade and pre-fails the later checkpoints.
    fn add_level(&mut self, levels: u32) {
        self.level += levels;
        let (gravity, super_gravity) = speed_for_level(self.level);
        self.gravity = gravity;
        self.super_gravity = super_gravity;

        if (251..=299).contains(&self.level) && self.check1 {
            if !CHECKPOINT_1.passed(self.score, self.elapsed_ms()) {
                self.grandmaster_valid = false;
                self.check2 = false;
                self.check3 = false;
            }
            self.check1 = false;
        }
        if (500..=998).contains(&self.level) && self.check2 {
            if !CHECKPOINT_2.passed(self.score, self.elapsed_ms()) {
                self.grandmaster_valid = false;
                self.check3 = false;
            }
            self.check2 = false;
        }
    }

    // ===== Read accessors ==================================================

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    pub fn elapsed_frames(&self) -> u64 {
        self.elapsed_frames
    }

    /// Elapsed play time under the fixed frame-to-milliseconds conversion.
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_frames * FRAME_MS
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next_shape(&self) -> Shape {
        self.next.shape()
    }

    /// The most recently locked piece, kept for incremental redraw hinting.
    pub fn last_locked(&self) -> Option<Piece> {
        self.last_locked
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn grandmaster_eligible(&self) -> bool {
        self.grandmaster_valid
    }

    /// Current grade for the session's score and eligibility.
    pub fn grade(&self) -> &'static str {
        grade(self.score, self.grandmaster_valid)
    }

    pub fn piece_redraw(&self) -> bool {
        self.piece_redraw
    }

    pub fn board_redraw(&self) -> bool {
        self.board_redraw
    }

    pub fn pending_sound(&self) -> Option<SoundEffect> {
        self.pending_sound
    }

    // ===== One-shot flag drainage ==========================================

    pub fn clear_redraw_flags(&mut self) {
        self.piece_redraw = false;
        self.board_redraw = false;
    }

    pub fn clear_pending_sound(&mut self) {
        self.pending_sound = None;
    }

    pub fn clear_last_locked(&mut self) {
        self.last_locked = None;
    }

    // ===== Snapshot / restore ==============================================

    /// Export the full durable state for suspend/resume.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            active: self.active,
            next: self.next,
            last_locked: self.last_locked,
            generator: self.generator.clone(),
            score: self.score,
            level: self.level,
            max_level: self.max_level,
            gravity: self.gravity,
            super_gravity: self.super_gravity,
            lock_wait: self.lock_wait,
            spawn_wait: self.spawn_wait,
            fall_wait: self.fall_wait,
            auto_shift_wait: self.auto_shift_wait,
            line_clear_wait: self.line_clear_wait,
            elapsed_frames: self.elapsed_frames,
            dropped_lines: self.dropped_lines,
            combo: self.combo,
            last_input: self.last_input,
            grandmaster_valid: self.grandmaster_valid,
            checkpoint_1_pending: self.check1,
            checkpoint_2_pending: self.check2,
            checkpoint_3_pending: self.check3,
            outcome: self.outcome,
        }
    }

    /// Rebuild a session from a snapshot.
    ///
    /// Both redraw flags come back forced so the consumer repaints fully,
    /// and the pending sound slot comes back empty. Structural invariants
    /// the serialized form cannot express are re-checked here.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self, GameError> {
        fn rotation_ok(piece: &Piece) -> bool {
            (piece.rotation() as usize) < state_count(piece.shape())
        }

        if snapshot.max_level > FULL_GAME_MAX_LEVEL {
            return Err(GameError::InvalidSnapshot {
                reason: "max level above 999",
            });
        }
        if snapshot.level > snapshot.max_level {
            return Err(GameError::InvalidSnapshot {
                reason: "level above max level",
            });
        }
        if snapshot.combo == 0 {
            return Err(GameError::InvalidSnapshot {
                reason: "combo below 1",
            });
        }
        if let Some(piece) = &snapshot.active {
            if !rotation_ok(piece) {
                return Err(GameError::InvalidSnapshot {
                    reason: "active piece rotation out of range",
                });
            }
        }
        if !rotation_ok(&snapshot.next) {
            return Err(GameError::InvalidSnapshot {
                reason: "next piece rotation out of range",
            });
        }
        if let Some(piece) = &snapshot.last_locked {
            if !rotation_ok(piece) {
                return Err(GameError::InvalidSnapshot {
                    reason: "last locked piece rotation out of range",
                });
            }
        }

        Ok(Self {
            board: snapshot.board,
            active: snapshot.active,
            next: snapshot.next,
            last_locked: snapshot.last_locked,
            generator: snapshot.generator,
            score: snapshot.score,
            level: snapshot.level,
            max_level: snapshot.max_level,
            gravity: snapshot.gravity,
            super_gravity: snapshot.super_gravity,
            lock_wait: snapshot.lock_wait,
            spawn_wait: snapshot.spawn_wait,
            fall_wait: snapshot.fall_wait,
            auto_shift_wait: snapshot.auto_shift_wait,
            line_clear_wait: snapshot.line_clear_wait,
            elapsed_frames: snapshot.elapsed_frames,
            dropped_lines: snapshot.dropped_lines,
            combo: snapshot.combo,
            last_input: snapshot.last_input,
            grandmaster_valid: snapshot.grandmaster_valid,
            check1: snapshot.checkpoint_1_pending,
            check2: snapshot.checkpoint_2_pending,
            check3: snapshot.checkpoint_3_pending,
            outcome: snapshot.outcome,
            piece_redraw: true,
            board_redraw: true,
            pending_sound: None,
        })
    }
}
