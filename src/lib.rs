//! Deterministic grandmaster-rules falling-block engine.
//!
//! A pure, frame-stepped simulation core with no UI, timing, or I/O of its
//! own: the host calls [`core::Game::advance_frame`] once per 34ms tick with
//! the currently held inputs and renders from the read accessors. Everything
//! is deterministic per seed, making sessions replayable and snapshotable.
//!
//! # Module Structure
//!
//! - [`core::board`]: 10x22 playfield with collision queries and row clearing
//! - [`core::game`]: the per-tick state machine - timers, input filtering,
//!   gravity, locking, win/loss
//! - [`core::pieces`]: tetromino geometry tables and the immutable piece value
//! - [`core::rng`]: seedable LCG and the history-biased anti-repeat generator
//! - [`core::scoring`]: score formula, speed table, grandmaster checkpoints,
//!   grading
//! - [`core::snapshot`]: serializable full-state capture for suspend/resume
//!
//! # Game Rules
//!
//! This engine follows the classic grandmaster ruleset rather than modern
//! guidelines:
//!
//! - **Anti-repeat generator**: uniform draws redrawn against a 4-piece
//!   history window, not a strict bag
//! - **Simple wall kicks**: one column opposite the rotation, never for I
//! - **Frame-counted timing**: lock delay 15 ticks, spawn delay 15 ticks,
//!   line-clear freeze 21 ticks, auto-shift delay 7 ticks
//! - **Level-per-spawn progression** with century gates at x99 and the level
//!   cap, and hidden speed shifts up to 20 rows per tick
//! - **Grandmaster grading**: score/time checkpoints at levels 251, 500 and
//!   999 decide eligibility for the top grade
//!
//! # Example
//!
//! ```
//! use tetra_core::core::Game;
//! use tetra_core::types::{Input, InputSet, Outcome};
//!
//! let mut game = Game::new(0, 999, 12345)?;
//! while game.outcome() == Outcome::InProgress && game.elapsed_frames() < 600 {
//!     let held = InputSet::from_iter([Input::Down]);
//!     game.advance_frame(held);
//! }
//! println!("score {} grade {}", game.score(), game.grade());
//! # Ok::<(), tetra_core::core::GameError>(())
//! ```

pub mod core;
pub mod types;

pub use crate::core::{Board, Game, GameError, GameSnapshot, Piece, PieceGen};
pub use crate::types::{Input, InputSet, Outcome, Shape, SoundEffect};
