//! Core types shared across the engine
//! This module contains pure data types and tick-counted constants with no
//! external dependencies beyond serde derives.

use serde::{Deserialize, Serialize};

/// Playfield dimensions. Rows are counted bottom-up: row 0 is the floor,
/// rows 20-21 are the spawn buffer that settled gameplay never fills.
pub const FIELD_COLS: usize = 10;
pub const FIELD_ROWS: usize = 22;

/// Spawn anchor for every new piece.
pub const SPAWN_COL: i8 = 3;
pub const SPAWN_ROW: i8 = 17;

/// Timing constants, expressed in ticks of the external driving cadence
/// (nominally 30 Hz; the engine itself never touches a clock).
///
/// A grounded piece locks after LOCK_DELAY ticks, giving time to slide and
/// rotate even at the fastest fall speeds.
pub const LOCK_DELAY: u32 = 15;
/// Ticks between a lock and the next piece entering the field.
pub const SPAWN_DELAY: u32 = 15;
/// Ticks a held direction is suppressed before it auto-repeats.
pub const AUTO_SHIFT_DELAY: u32 = 7;
/// Ticks the whole engine stands still after a line clear.
pub const LINE_CLEAR_DELAY: u32 = 21;

/// Wall-clock milliseconds one tick represents for checkpoint timing.
pub const FRAME_MS: u64 = 34;

/// Redraw attempts when the generator picks a shape already in history.
pub const GENERATION_TRIES: u32 = 4;
/// Sliding window of recently generated shapes.
pub const HISTORY_LEN: usize = 4;

/// Level cap of a full session; grandmaster grading requires it.
pub const FULL_GAME_MAX_LEVEL: u32 = 999;

/// The seven block shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl Shape {
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::J,
        Shape::L,
        Shape::O,
        Shape::S,
        Shape::T,
        Shape::Z,
    ];
}

/// Cell on the playfield (None = empty, Some = the shape that locked there).
pub type Cell = Option<Shape>;

/// A single held control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Left,
    Right,
    Down,
    RotateLeft,
    RotateRight,
}

impl Input {
    const fn bit(self) -> u8 {
        match self {
            Input::Left => 1 << 0,
            Input::Right => 1 << 1,
            Input::Down => 1 << 2,
            Input::RotateLeft => 1 << 3,
            Input::RotateRight => 1 << 4,
        }
    }
}

/// The set of controls held during one tick, sampled by the driving loop.
///
/// Level-triggered: membership means "currently held", not "just pressed".
/// The engine derives edge behavior (auto-shift, rotation non-repeat) by
/// comparing against the previous tick's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InputSet(u8);

impl InputSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn with(mut self, input: Input) -> Self {
        self.insert(input);
        self
    }

    pub fn insert(&mut self, input: Input) {
        self.0 |= input.bit();
    }

    pub fn remove(&mut self, input: Input) {
        self.0 &= !input.bit();
    }

    pub fn contains(&self, input: Input) -> bool {
        self.0 & input.bit() != 0
    }

    pub fn intersects(&self, other: InputSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Input> for InputSet {
    fn from_iter<T: IntoIterator<Item = Input>>(iter: T) -> Self {
        let mut set = InputSet::empty();
        for input in iter {
            set.insert(input);
        }
        set
    }
}

/// Session outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

/// Sound effect requested for the consumer to play. At most one is pending;
/// a later request overwrites an undrained earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Lock,
    LineClear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_set_insert_remove_contains() {
        let mut set = InputSet::empty();
        assert!(set.is_empty());

        set.insert(Input::Left);
        set.insert(Input::RotateRight);
        assert!(set.contains(Input::Left));
        assert!(set.contains(Input::RotateRight));
        assert!(!set.contains(Input::Down));

        set.remove(Input::Left);
        assert!(!set.contains(Input::Left));
        assert!(!set.is_empty());
    }

    #[test]
    fn test_input_set_intersects() {
        let held = InputSet::empty().with(Input::Left).with(Input::Down);
        let previous = InputSet::empty().with(Input::Down);

        assert!(held.intersects(previous));
        assert!(!held.intersects(InputSet::empty().with(Input::Right)));
        assert!(!held.intersects(InputSet::empty()));
    }

    #[test]
    fn test_input_set_from_iter() {
        let set: InputSet = [Input::Left, Input::RotateLeft].into_iter().collect();
        assert!(set.contains(Input::Left));
        assert!(set.contains(Input::RotateLeft));
        assert!(!set.contains(Input::Right));
    }

    #[test]
    fn test_shape_all_has_seven_distinct_kinds() {
        for (i, a) in Shape::ALL.iter().enumerate() {
            for b in &Shape::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
