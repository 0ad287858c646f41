//! Scoring module - grandmaster-rules score formula, speed table, grading.
//!
//! All pure functions of engine state; the state machine in `game` owns the
//! mutation. The speed table and grade thresholds are exact reproductions of
//! the classic rules and must not be "tuned".

/// Score awarded for a clear, integer arithmetic throughout:
///
/// `floor((level + cleared) / 4 + dropped_lines)
///     * cleared * (2 * cleared - 1) * combo * bravo`
pub fn clear_score(level: u32, cleared: u32, dropped_lines: u32, combo: u32, bravo: u32) -> u32 {
    ((level + cleared) / 4 + dropped_lines) * cleared * (2 * cleared - 1) * combo * bravo
}

/// Fall speed for a level as `(gravity, super_gravity)`.
///
/// Exactly one of the pair is nonzero: `gravity` is frames-per-row while the
/// game is slow enough, `super_gravity` is rows-per-frame once pieces fall
/// faster than one row per tick. Note the deliberate slowdowns at 170 and 420
/// before the final 20-rows-per-tick regime.
pub fn speed_for_level(level: u32) -> (u32, u32) {
    match level {
        0..=29 => (32, 0),
        30..=34 => (21, 0),
        35..=39 => (16, 0),
        40..=49 => (13, 0),
        50..=59 => (10, 0),
        60..=69 => (8, 0),
        70..=79 => (4, 0),
        80..=139 => (3, 0),
        140..=169 => (2, 0),
        170..=199 => (32, 0),
        200..=219 => (4, 0),
        220..=229 => (2, 0),
        230..=250 => (1, 0),
        251..=299 => (0, 1),
        300..=329 => (0, 2),
        330..=359 => (0, 3),
        360..=399 => (0, 4),
        400..=419 => (0, 5),
        420..=449 => (0, 4),
        450..=499 => (0, 3),
        _ => (0, 20),
    }
}

/// One grandmaster checkpoint: a score floor and a time ceiling, both of
/// which must hold when the checkpoint fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub min_score: u32,
    pub max_elapsed_ms: u64,
}

impl Checkpoint {
    pub fn passed(&self, score: u32, elapsed_ms: u64) -> bool {
        score >= self.min_score && elapsed_ms <= self.max_elapsed_ms
    }
}

/// Fires on entry to the 251-299 speed band: 12000 points inside 4m15s.
pub const CHECKPOINT_1: Checkpoint = Checkpoint {
    min_score: 12_000,
    max_elapsed_ms: 255_000,
};

/// Fires on entry to the 500-998 speed band: 40000 points inside 7m30s.
pub const CHECKPOINT_2: Checkpoint = Checkpoint {
    min_score: 40_000,
    max_elapsed_ms: 450_000,
};

/// Fires when the final level is reached: 126000 points inside 13m30s.
pub const CHECKPOINT_3: Checkpoint = Checkpoint {
    min_score: 126_000,
    max_elapsed_ms: 810_000,
};

/// Grade for a score. The top grade also requires the session to have kept
/// grandmaster eligibility through every checkpoint.
pub fn grade(score: u32, grandmaster_valid: bool) -> &'static str {
    match score {
        0..=399 => "9",
        400..=799 => "8",
        800..=1399 => "7",
        1400..=1999 => "6",
        2000..=3499 => "5",
        3500..=5499 => "4",
        5500..=7999 => "3",
        8000..=11999 => "2",
        12000..=15999 => "1",
        16000..=21999 => "S1",
        22000..=29999 => "S2",
        30000..=39999 => "S3",
        40000..=51999 => "S4",
        52000..=65999 => "S5",
        66000..=81999 => "S6",
        82000..=99999 => "S7",
        100000..=119999 => "S8",
        _ if grandmaster_valid && score >= 126_000 => "GM",
        _ => "S9",
    }
}
