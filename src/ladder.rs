//! Ladder reading.
//!
//! A ladder is a sequence of ataris where the defender keeps extending to two
//! liberties and the attacker keeps reducing them to one. The search here is a
//! plain alternating recursion with a move budget:
//!
//! - [`capture_succeeds`] asks whether an attacking move wins against every
//!   escape
//! - [`escape_succeeds`] asks whether a defending move survives every attack
//!
//! Both work on clones, so the position passed in is never modified. The prey
//! is named by one of its stones, which stays valid across clones as long as
//! the chain is on the board.
//!
//! The classifiers [`is_ladder_capture_fail`] and [`is_ladder_escape_fail`]
//! label a candidate move as a broken ladder attack or a hopeless escape.

use tracing::trace;

use crate::board::{Coord, Stone};
use crate::chain::Chain;
use crate::constants::MAX_LADDER_ATTEMPT;
use crate::position::Position;

/// Points the prey may play to escape: its liberties, then the liberty of
/// every adjacent attacker chain in atari (escape by capturing).
fn escape_points(pos: &Position, prey: &Chain) -> Vec<Coord> {
    let mut points: Vec<Coord> = prey.liberties().iter().copied().collect();
    for hunter in pos.chain_neighbors(prey, prey.color().opposite(), 1) {
        for &lib in hunter.liberties() {
            if !points.contains(&lib) {
                points.push(lib);
            }
        }
    }
    points
}

fn hunter_in_atari(pos: &Position, attack: Stone) -> bool {
    pos.chain_at(attack.coord).is_some_and(Chain::is_atari)
}

/// Does playing `attack` capture the chain at `prey` whatever it does?
///
/// An exhausted budget counts as success for the attacker. An illegal attack,
/// or one that leaves the attacking chain in atari, fails.
pub fn capture_succeeds(pos: &Position, attack: Stone, prey: Coord, budget: i32) -> bool {
    if budget <= 0 {
        return true;
    }

    let mut board = pos.clone();
    if !board.add_stone(attack) {
        return false;
    }
    if hunter_in_atari(&board, attack) {
        return false;
    }
    let Some(prey_chain) = board.chain_at(prey).filter(|c| c.color() != attack.color) else {
        // Captured outright.
        return true;
    };

    let escaper = attack.color.opposite();
    escape_points(&board, prey_chain)
        .into_iter()
        .filter(|&c| c != attack.coord && !board.is_ko(c))
        .all(|c| {
            let escape = Stone {
                coord: c,
                color: escaper,
            };
            !escape_succeeds(&board, escape, prey, budget - 1)
        })
}

/// Does playing `escape` keep the chain at `prey` alive against every attack?
///
/// An exhausted budget counts as failure for the defender.
pub fn escape_succeeds(pos: &Position, escape: Stone, prey: Coord, budget: i32) -> bool {
    if budget <= 0 {
        return false;
    }

    let mut board = pos.clone();
    if !board.add_stone(escape) {
        return false;
    }
    let Some(prey_chain) = board.chain_at(prey) else {
        return false;
    };

    match prey_chain.liberty_count() {
        0 | 1 => false,
        2 => {
            let attacker = escape.color.opposite();
            let liberties: Vec<Coord> = prey_chain.liberties().iter().copied().collect();
            liberties
                .into_iter()
                .filter(|&c| !board.is_ko(c))
                .all(|c| {
                    let attack = Stone {
                        coord: c,
                        color: attacker,
                    };
                    !capture_succeeds(&board, attack, prey, budget - 1)
                })
        }
        _ => true,
    }
}

/// Is `attack` a ladder that does not work?
///
/// The prey is the first two-liberty enemy chain next to the attack point.
/// Single stones are not considered. The attack is a failed ladder when no
/// escape is stopped by a plain atari, yet some escape runs out the full
/// ladder budget alive.
pub fn is_ladder_capture_fail(pos: &Position, attack: Stone) -> bool {
    let candidates = pos.neighbor_chains_with_liberties(attack.coord, attack.color.opposite(), 2);
    let Some(prey) = candidates.first() else {
        return false;
    };
    if prey.size() <= 1 {
        return false;
    }
    let Some(anchor) = prey.anchor() else {
        return false;
    };

    let mut board = pos.clone();
    if !board.add_stone(attack) {
        return false;
    }
    if hunter_in_atari(&board, attack) {
        return false;
    }
    let Some(prey_chain) = board.chain_at(anchor) else {
        return false;
    };

    let escaper = attack.color.opposite();
    for c in escape_points(&board, prey_chain) {
        if c == attack.coord || board.is_ko(c) {
            continue;
        }
        let escape = Stone {
            coord: c,
            color: escaper,
        };
        if escape_succeeds(&board, escape, anchor, 1) {
            return false;
        }
        if escape_succeeds(&board, escape, anchor, MAX_LADDER_ATTEMPT) {
            trace!(attack = %attack.coord, escape = %c, "ladder attack fails");
            return true;
        }
    }
    false
}

/// Is `escape` an extension out of atari into a ladder that gets captured?
///
/// Applies only when `escape` touches a friendly chain in atari and the
/// extended chain ends up with exactly two liberties.
pub fn is_ladder_escape_fail(pos: &Position, escape: Stone) -> bool {
    if pos
        .neighbor_chains_with_liberties(escape.coord, escape.color, 1)
        .is_empty()
    {
        return false;
    }

    let mut board = pos.clone();
    if !board.add_stone(escape) {
        return false;
    }
    let Some(chain) = board.chain_at(escape.coord) else {
        return false;
    };
    if chain.liberty_count() != 2 {
        return false;
    }

    let attacker = escape.color.opposite();
    let failed = chain
        .liberties()
        .iter()
        .copied()
        .filter(|&c| !board.is_ko(c))
        .any(|c| {
            let attack = Stone {
                coord: c,
                color: attacker,
            };
            capture_succeeds(&board, attack, escape.coord, MAX_LADDER_ATTEMPT)
        });
    if failed {
        trace!(escape = %escape.coord, "ladder escape fails");
    }
    failed
}
