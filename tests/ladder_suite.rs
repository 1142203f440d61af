//! Ladder reading suite
//!
//! Positions are set up with stones placed directly (no history), then the
//! search functions and classifiers are asked about candidate moves.
//! Coordinates are `(x, y)` on a 19x19 board with `y = 0` at the top.

use goban_rust::board::{Coord, Stone, StoneColor};
use goban_rust::constants::MAX_LADDER_ATTEMPT;
use goban_rust::ladder::{
    capture_succeeds, escape_succeeds, is_ladder_capture_fail, is_ladder_escape_fail,
};
use goban_rust::position::Position;

const B: StoneColor = StoneColor::Black;
const W: StoneColor = StoneColor::White;

// =============================================================================
// Helpers
// =============================================================================

fn setpos(black: &[(usize, usize)], white: &[(usize, usize)]) -> Position {
    let mut pos = Position::new(19);
    for &(x, y) in black {
        assert!(pos.force_place(Stone::new(x, y, B)));
    }
    for &(x, y) in white {
        assert!(pos.force_place(Stone::new(x, y, W)));
    }
    pos
}

fn white_captures(pos: &Position, at: (usize, usize), prey: (usize, usize)) -> bool {
    capture_succeeds(
        pos,
        Stone::new(at.0, at.1, W),
        Coord::new(prey.0, prey.1),
        MAX_LADDER_ATTEMPT,
    )
}

/// A black stone at (9,9) hemmed in on two sides, with a white stone on the
/// diagonal that makes the ladder run towards the lower right.
fn ladder_start() -> Position {
    setpos(&[(9, 9)], &[(8, 9), (9, 8), (10, 10)])
}

/// Same, with a black ladder breaker in the ladder's path.
fn ladder_start_with_breaker() -> Position {
    setpos(&[(9, 9), (15, 5)], &[(8, 9), (9, 8), (10, 10)])
}

/// Both starts after White's atari at (9,10) and Black's extension at (10,9).
fn ladder_running(breaker: bool) -> Position {
    let mut pos = if breaker {
        ladder_start_with_breaker()
    } else {
        ladder_start()
    };
    assert!(pos.add_stone(Stone::new(9, 10, W)));
    assert!(pos.add_stone(Stone::new(10, 9, B)));
    let prey = pos.chain_at(Coord::new(9, 9)).unwrap();
    assert_eq!(prey.liberty_count(), 2);
    assert!(prey.liberties().contains(&Coord::new(11, 9)));
    assert!(prey.liberties().contains(&Coord::new(10, 8)));
    pos
}

// =============================================================================
// Capture search
// =============================================================================

#[test]
fn test_ladder_works_without_breaker() {
    let pos = ladder_start();
    assert!(white_captures(&pos, (9, 10), (9, 9)));
    assert!(white_captures(&pos, (10, 9), (9, 9)));
}

#[test]
fn test_breaker_saves_prey() {
    let pos = ladder_start_with_breaker();
    assert!(!white_captures(&pos, (9, 10), (9, 9)));
    // Chasing the other way runs away from the breaker.
    assert!(white_captures(&pos, (10, 9), (9, 9)));
}

#[test]
fn test_open_position_has_no_ladder() {
    let pos = setpos(&[(9, 9)], &[(8, 9), (9, 8)]);
    assert!(!white_captures(&pos, (10, 9), (9, 9)));
    assert!(!white_captures(&pos, (9, 10), (9, 9)));
}

#[test]
fn test_edge_ladder() {
    let pos = setpos(&[(0, 2), (0, 3)], &[(1, 1), (1, 2), (1, 3), (1, 4)]);
    assert!(white_captures(&pos, (0, 4), (0, 2)));
    assert!(white_captures(&pos, (0, 1), (0, 2)));
}

#[test]
fn test_corner_ladder() {
    let pos = setpos(&[(0, 0), (0, 1)], &[(1, 0)]);
    let prey = pos.chain_at(Coord::new(0, 0)).unwrap();
    assert_eq!(prey.liberty_count(), 2);
    assert!(!white_captures(&pos, (0, 2), (0, 0)));
    assert!(white_captures(&pos, (1, 1), (0, 0)));
}

// =============================================================================
// Escape search
// =============================================================================

#[test]
fn test_escape_into_ladder() {
    let mut pos = ladder_start();
    assert!(pos.add_stone(Stone::new(9, 10, W)));
    let prey = Coord::new(9, 9);
    assert!(!escape_succeeds(&pos, Stone::new(10, 9, B), prey, MAX_LADDER_ATTEMPT));

    let mut pos = ladder_start_with_breaker();
    assert!(pos.add_stone(Stone::new(9, 10, W)));
    assert!(escape_succeeds(&pos, Stone::new(10, 9, B), prey, MAX_LADDER_ATTEMPT));
}

// =============================================================================
// Classifiers
// =============================================================================

#[test]
fn test_escape_fail_classifier() {
    let mut pos = ladder_start();
    assert!(pos.add_stone(Stone::new(9, 10, W)));
    assert!(is_ladder_escape_fail(&pos, Stone::new(10, 9, B)));

    let mut pos = ladder_start_with_breaker();
    assert!(pos.add_stone(Stone::new(9, 10, W)));
    assert!(!is_ladder_escape_fail(&pos, Stone::new(10, 9, B)));
}

#[test]
fn test_capture_fail_ignores_single_stones() {
    let pos = ladder_start_with_breaker();
    assert!(!is_ladder_capture_fail(&pos, Stone::new(9, 10, W)));
}

#[test]
fn test_capture_fail_classifier_without_breaker() {
    let pos = ladder_running(false);
    assert!(white_captures(&pos, (11, 9), (9, 9)));
    assert!(!is_ladder_capture_fail(&pos, Stone::new(11, 9, W)));
    assert!(!white_captures(&pos, (10, 8), (9, 9)));
    assert!(!is_ladder_capture_fail(&pos, Stone::new(10, 8, W)));
}

#[test]
fn test_capture_fail_classifier_with_breaker() {
    let pos = ladder_running(true);
    assert!(!white_captures(&pos, (11, 9), (9, 9)));
    assert!(is_ladder_capture_fail(&pos, Stone::new(11, 9, W)));
    assert!(!white_captures(&pos, (10, 8), (9, 9)));
    assert!(!is_ladder_capture_fail(&pos, Stone::new(10, 8, W)));
}

#[test]
fn test_search_leaves_position_untouched() {
    let pos = ladder_running(true);
    let before = pos.snapshot();
    let moves = pos.move_number();
    is_ladder_capture_fail(&pos, Stone::new(11, 9, W));
    is_ladder_escape_fail(&pos, Stone::new(11, 9, B));
    assert_eq!(pos.snapshot(), before);
    assert_eq!(pos.move_number(), moves);
}
