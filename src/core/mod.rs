//! Core game logic, platform-independent and deterministic.

pub mod board;
pub mod game;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use game::{Game, GameError};
pub use pieces::{rotation_states, state_count, Piece};
pub use rng::{PieceGen, SimpleRng};
pub use snapshot::GameSnapshot;
