//! Suspend/resume: snapshot, serialize, restore, and keep ticking in lockstep.

use tetra_core::core::{Game, GameError, GameSnapshot, Piece};
use tetra_core::types::{Input, InputSet, Shape};

fn scripted_input(tick: u64) -> InputSet {
    match tick % 9 {
        0 => InputSet::empty().with(Input::Left),
        1 | 2 => InputSet::empty(),
        3 => InputSet::empty().with(Input::RotateLeft),
        4 => InputSet::empty().with(Input::Down),
        5 | 6 => InputSet::empty().with(Input::Right),
        7 => InputSet::empty().with(Input::RotateRight),
        _ => InputSet::empty().with(Input::Down),
    }
}

#[test]
fn test_snapshot_survives_json_round_trip() {
    let mut game = Game::new(0, 999, 777).unwrap();
    for tick in 0..600 {
        game.advance_frame(scripted_input(tick));
    }

    let snapshot = game.snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_restored_session_continues_tick_for_tick() {
    let mut original = Game::new(0, 999, 31337).unwrap();
    for tick in 0..600 {
        original.advance_frame(scripted_input(tick));
    }

    let json = serde_json::to_string(&original.snapshot()).unwrap();
    let decoded: GameSnapshot = serde_json::from_str(&json).unwrap();
    let mut restored = Game::restore(decoded).unwrap();

    // Restore forces a full repaint and drops any staged sound.
    assert!(restored.piece_redraw());
    assert!(restored.board_redraw());
    assert_eq!(restored.pending_sound(), None);

    assert_eq!(restored.score(), original.score());
    assert_eq!(restored.level(), original.level());
    assert_eq!(restored.elapsed_frames(), original.elapsed_frames());
    assert_eq!(restored.active(), original.active());
    assert_eq!(restored.board(), original.board());

    // Both halves of the split session see the same future.
    for tick in 600..1200 {
        let held = scripted_input(tick);
        original.advance_frame(held);
        restored.advance_frame(held);
    }

    assert_eq!(restored.snapshot(), original.snapshot());
    assert_eq!(restored.outcome(), original.outcome());
    assert_eq!(restored.score(), original.score());
    assert_eq!(restored.grade(), original.grade());
}

#[test]
fn test_restore_rejects_corrupt_snapshots() {
    let game = Game::new(0, 999, 1).unwrap();

    let mut bad = game.snapshot();
    bad.combo = 0;
    assert_eq!(
        Game::restore(bad).unwrap_err(),
        GameError::InvalidSnapshot {
            reason: "combo below 1"
        }
    );

    let mut bad = game.snapshot();
    // O has a single rotation state; 3 is out of range.
    bad.next = Piece::at(Shape::O, 3, 3, 17);
    assert!(Game::restore(bad).is_err());

    let mut bad = game.snapshot();
    bad.max_level = 1_000;
    assert!(Game::restore(bad).is_err());
}
