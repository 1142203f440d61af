//! Go position representation and move execution.
//!
//! This module provides the rules engine:
//! - Chains kept in an arena, with a dense coordinate-to-chain index
//! - Incremental liberty maintenance on placement, capture and removal
//! - Suicide rejection and single-point ko
//! - Undo/redo over a recorded move history
//! - Setup placement and removal that bypass the rules
//!
//! Rule violations are reported as `false`/`None` and leave the position
//! untouched. Broken internal invariants panic.

use std::fmt;

use crate::board::{Coord, Stone, StoneColor, write_diagram};
use crate::chain::Chain;
use crate::constants::{DEFAULT_BOARD_SIZE, DEFAULT_KOMI};
use crate::history::History;
use crate::result::GameResult;

/// Index of a chain in the position's arena.
type ChainId = usize;

/// A recorded move: the placed stone (or a pass), what it captured, and the
/// ko point it created.
#[derive(Debug, Clone, PartialEq)]
pub struct Move {
    pub color: StoneColor,
    /// `None` for a pass.
    pub coord: Option<Coord>,
    /// Chains removed by this move, as they were when captured.
    pub captured: Vec<Chain>,
    /// Point the opponent may not retake on the next move.
    pub ko: Option<Coord>,
}

impl Move {
    pub fn is_pass(&self) -> bool {
        self.coord.is_none()
    }

    pub fn stone(&self) -> Option<Stone> {
        self.coord.map(|coord| Stone {
            coord,
            color: self.color,
        })
    }

    pub fn captured_stones(&self) -> impl Iterator<Item = Stone> + '_ {
        self.captured.iter().flat_map(Chain::stones)
    }

    pub fn captured_count(&self) -> usize {
        self.captured.iter().map(Chain::size).sum()
    }
}

/// A Go position (board state plus move history).
#[derive(Clone)]
pub struct Position {
    size: usize,
    komi: f32,
    /// Chain occupying each point, indexed by `x + size * y`.
    points: Vec<Option<ChainId>>,
    /// Chain arena; `None` marks a released slot.
    chains: Vec<Option<Chain>>,
    free: Vec<ChainId>,
    history: History<Move>,
    /// White stones captured by Black.
    black_captures: usize,
    /// Black stones captured by White.
    white_captures: usize,
    result: Option<GameResult>,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}

impl Position {
    pub fn new(size: usize) -> Self {
        Self::with_komi(size, DEFAULT_KOMI)
    }

    pub fn with_komi(size: usize, komi: f32) -> Self {
        assert!(size > 1, "board size must be at least 2, got {size}");
        Self {
            size,
            komi,
            points: vec![None; size * size],
            chains: Vec::new(),
            free: Vec::new(),
            history: History::new(),
            black_captures: 0,
            white_captures: 0,
            result: None,
        }
    }

    pub fn board_size(&self) -> usize {
        self.size
    }

    pub fn komi(&self) -> f32 {
        self.komi
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.komi = komi;
    }

    /// Clear stones, history, capture counts and result.
    pub fn reset(&mut self) {
        self.points.fill(None);
        self.chains.clear();
        self.free.clear();
        self.history.clear();
        self.black_captures = 0;
        self.white_captures = 0;
        self.result = None;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn occupied(&self, c: Coord) -> bool {
        self.chain_id(c).is_some()
    }

    pub fn chain_at(&self, c: Coord) -> Option<&Chain> {
        self.chain_id(c).map(|id| self.chain(id))
    }

    pub fn color_at(&self, c: Coord) -> Option<StoneColor> {
        self.chain_at(c).map(Chain::color)
    }

    /// All chains currently on the board, in arena order.
    pub fn chains(&self) -> impl Iterator<Item = &Chain> + '_ {
        self.chains.iter().flatten()
    }

    /// All chains ordered by their smallest point. Two positions with equal
    /// snapshots have identical stones and liberties.
    pub fn snapshot(&self) -> Vec<Chain> {
        let mut chains: Vec<Chain> = self.chains().cloned().collect();
        chains.sort_by_key(Chain::anchor);
        chains
    }

    /// Number of stones `color` has captured.
    pub fn captures(&self, color: StoneColor) -> usize {
        match color {
            StoneColor::Black => self.black_captures,
            StoneColor::White => self.white_captures,
        }
    }

    /// Empty points orthogonally adjacent to `c`.
    pub fn empty_neighbors(&self, c: Coord) -> impl Iterator<Item = Coord> + '_ {
        c.neighbors(self.size).filter(|&n| !self.occupied(n))
    }

    /// Distinct chains of `color` adjacent to `c`.
    pub fn neighbor_chains(&self, c: Coord, color: StoneColor) -> Vec<&Chain> {
        self.neighbor_ids(c, color)
            .into_iter()
            .map(|id| self.chain(id))
            .collect()
    }

    /// Distinct chains of `color` adjacent to `c` with exactly `liberties` liberties.
    pub fn neighbor_chains_with_liberties(
        &self,
        c: Coord,
        color: StoneColor,
        liberties: usize,
    ) -> Vec<&Chain> {
        self.neighbor_chains(c, color)
            .into_iter()
            .filter(|chain| chain.liberty_count() == liberties)
            .collect()
    }

    /// Distinct chains of `color` adjacent to any stone of `chain` with
    /// exactly `liberties` liberties.
    pub fn chain_neighbors(
        &self,
        chain: &Chain,
        color: StoneColor,
        liberties: usize,
    ) -> Vec<&Chain> {
        let mut ids: Vec<ChainId> = Vec::new();
        for c in chain.coords() {
            for id in self.neighbor_ids(c, color) {
                if !ids.contains(&id) && self.chain(id).liberty_count() == liberties {
                    ids.push(id);
                }
            }
        }
        ids.into_iter().map(|id| self.chain(id)).collect()
    }

    /// True if `c` is the ko point left by the latest move.
    pub fn is_ko(&self, c: Coord) -> bool {
        self.history.latest().and_then(|m| m.ko) == Some(c)
    }

    /// True if placing `stone` would leave its chain without liberties and
    /// capture nothing.
    pub fn is_suicide(&self, stone: Stone) -> bool {
        self.is_like_suicide(stone) && !self.captures_any(stone)
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn current_move(&self) -> Option<&Move> {
        self.history.latest()
    }

    /// Moves played so far, oldest first.
    pub fn moves(&self) -> &[Move] {
        self.history.past()
    }

    /// Number of moves played (passes included).
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    pub fn has_past(&self) -> bool {
        self.history.has_past()
    }

    pub fn has_future(&self) -> bool {
        self.history.has_future()
    }

    /// True if the two latest moves were both passes.
    pub fn has_two_passes(&self) -> bool {
        matches!(
            (self.history.latest(), self.history.previous()),
            (Some(a), Some(b)) if a.is_pass() && b.is_pass()
        )
    }

    // =========================================================================
    // Result
    // =========================================================================

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn set_result(&mut self, result: Option<GameResult>) {
        self.result = result;
    }

    pub fn resign(&mut self, color: StoneColor) {
        self.result = Some(GameResult::resignation(color));
    }

    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    // =========================================================================
    // Moves
    // =========================================================================

    /// Play a stone under the rules.
    ///
    /// Captures are resolved before the suicide check, so filling your own
    /// last liberty is legal exactly when it captures. Returns `false`
    /// without touching the position for an occupied or off-board point, a
    /// ko retake, or suicide.
    pub fn add_stone(&mut self, stone: Stone) -> bool {
        let c = stone.coord;
        if !c.on_board(self.size) || self.occupied(c) || self.is_ko(c) {
            return false;
        }

        let targets: Vec<ChainId> = self
            .neighbor_ids(c, stone.color.opposite())
            .into_iter()
            .filter(|&id| self.chain(id).is_last_liberty(c))
            .collect();
        if targets.is_empty() && self.is_like_suicide(stone) {
            return false;
        }

        let captured: Vec<Chain> = targets
            .into_iter()
            .map(|id| self.capture_chain(id))
            .collect();

        // A lone stone that took a lone stone and has only that point as
        // liberty can be retaken immediately: remember the ko.
        let ko = match captured.as_slice() {
            [single]
                if single.size() == 1
                    && self.neighbor_ids(c, stone.color).is_empty()
                    && self.empty_neighbors(c).count() == 1 =>
            {
                single.anchor()
            }
            _ => None,
        };

        self.incorporate(stone);
        self.history.push(Move {
            color: stone.color,
            coord: Some(c),
            captured,
            ko,
        });
        true
    }

    /// Record a pass. Clears any ko restriction.
    pub fn pass(&mut self, color: StoneColor) {
        self.history.push(Move {
            color,
            coord: None,
            captured: Vec::new(),
            ko: None,
        });
    }

    /// Put a stone on the board without captures, suicide checks or history.
    /// An existing stone on the point is replaced. Returns `false` only for an
    /// off-board point.
    pub fn force_place(&mut self, stone: Stone) -> bool {
        if !stone.coord.on_board(self.size) {
            return false;
        }
        if self.color_at(stone.coord) == Some(stone.color) {
            return true;
        }
        self.force_remove(stone.coord);
        self.incorporate(stone);
        true
    }

    /// Clear a point without counting a capture or touching history.
    /// Returns the color of the removed stone, if any.
    pub fn force_remove(&mut self, c: Coord) -> Option<StoneColor> {
        self.remove_and_rebuild(c).map(|chain| chain.color())
    }

    /// Take back the latest move.
    ///
    /// Returns the move and, for a placement, the chain the placed stone
    /// belonged to before it was lifted.
    pub fn undo(&mut self) -> Option<(Move, Option<Chain>)> {
        let mv = self.history.step_back()?.clone();
        let Some(stone) = mv.stone() else {
            return Some((mv, None));
        };

        let Some(chain) = self.remove_and_rebuild(stone.coord) else {
            panic!("popped stone at {} keyed to no chain", stone.coord);
        };

        for restored in mv.captured_stones() {
            self.incorporate(restored);
        }
        self.revoke_captures(stone.color, mv.captured_count());

        Some((mv, Some(chain)))
    }

    /// Replay the next recorded move. Captures are taken from the record,
    /// not derived again.
    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.history.step_forward()?.clone();
        if let Some(stone) = mv.stone() {
            for captured in &mv.captured {
                if let Some(id) = captured.anchor().and_then(|a| self.chain_id(a)) {
                    self.capture_chain(id);
                }
            }
            self.incorporate(stone);
        }
        Some(mv)
    }

    // =========================================================================
    // Chain bookkeeping
    // =========================================================================

    #[inline]
    fn chain_id(&self, c: Coord) -> Option<ChainId> {
        if c.on_board(self.size) {
            self.points[c.index(self.size)]
        } else {
            None
        }
    }

    fn chain(&self, id: ChainId) -> &Chain {
        self.chains[id].as_ref().expect("chain index points at a live chain")
    }

    fn chain_mut(&mut self, id: ChainId) -> &mut Chain {
        self.chains[id].as_mut().expect("chain index points at a live chain")
    }

    fn alloc(&mut self, chain: Chain) -> ChainId {
        match self.free.pop() {
            Some(id) => {
                self.chains[id] = Some(chain);
                id
            }
            None => {
                self.chains.push(Some(chain));
                self.chains.len() - 1
            }
        }
    }

    fn release(&mut self, id: ChainId) -> Chain {
        let chain = self.chains[id].take().expect("released a live chain");
        self.free.push(id);
        chain
    }

    fn neighbor_ids(&self, c: Coord, color: StoneColor) -> Vec<ChainId> {
        let mut ids = Vec::with_capacity(4);
        for n in c.neighbors(self.size) {
            if let Some(id) = self.chain_id(n) {
                if self.chain(id).color() == color && !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
        ids
    }

    /// Every same-colored neighbor chain would lose its last liberty and the
    /// point itself has no empty neighbor.
    fn is_like_suicide(&self, stone: Stone) -> bool {
        let c = stone.coord;
        self.neighbor_ids(c, stone.color)
            .into_iter()
            .all(|id| self.chain(id).is_last_liberty(c))
            && self.empty_neighbors(c).next().is_none()
    }

    fn captures_any(&self, stone: Stone) -> bool {
        let c = stone.coord;
        self.neighbor_ids(c, stone.color.opposite())
            .into_iter()
            .any(|id| self.chain(id).is_last_liberty(c))
    }

    /// Add a stone to the board: join it to its same-colored neighbors
    /// (merging them), or start a new chain.
    fn incorporate(&mut self, stone: Stone) {
        let friends = self.neighbor_ids(stone.coord, stone.color);
        let id = match friends.split_first() {
            None => self.alloc(Chain::new(stone.color)),
            Some((&first, rest)) => {
                for &other in rest {
                    let absorbed = self.release(other);
                    for c in absorbed.coords() {
                        self.points[c.index(self.size)] = Some(first);
                    }
                    self.chain_mut(first)
                        .merge(&absorbed)
                        .unwrap_or_else(|err| panic!("broken chain invariant: {err}"));
                }
                first
            }
        };

        let liberties: Vec<Coord> = self.empty_neighbors(stone.coord).collect();
        self.chain_mut(id)
            .add(stone, liberties)
            .unwrap_or_else(|err| panic!("broken chain invariant: {err}"));
        self.remove_from_opposing_liberties(stone);
        self.points[stone.coord.index(self.size)] = Some(id);
    }

    /// Remove a captured chain, freeing its points as liberties of the
    /// surrounding enemy chains.
    fn capture_chain(&mut self, id: ChainId) -> Chain {
        let chain = self.release(id);
        self.credit_capture(chain.color(), chain.size());
        for stone in chain.stones() {
            self.points[stone.coord.index(self.size)] = None;
            self.add_to_opposing_liberties(stone);
        }
        chain
    }

    /// Lift the stone at `c` and rebuild what is left of its chain, which may
    /// have split. Returns the chain as it was before.
    fn remove_and_rebuild(&mut self, c: Coord) -> Option<Chain> {
        let id = self.chain_id(c)?;
        let chain = self.release(id);
        for s in chain.coords() {
            self.points[s.index(self.size)] = None;
        }
        self.add_to_opposing_liberties(Stone {
            coord: c,
            color: chain.color(),
        });
        for stone in chain.stones().filter(|s| s.coord != c) {
            self.incorporate(stone);
        }
        Some(chain)
    }

    fn add_to_opposing_liberties(&mut self, stone: Stone) {
        for id in self.neighbor_ids(stone.coord, stone.color.opposite()) {
            self.chain_mut(id).add_liberty(stone.coord);
        }
    }

    fn remove_from_opposing_liberties(&mut self, stone: Stone) {
        for id in self.neighbor_ids(stone.coord, stone.color.opposite()) {
            self.chain_mut(id).remove_liberty(stone.coord);
        }
    }

    /// Credit the opponent of `captured` with `count` prisoners.
    fn credit_capture(&mut self, captured: StoneColor, count: usize) {
        match captured {
            StoneColor::Black => self.white_captures += count,
            StoneColor::White => self.black_captures += count,
        }
    }

    /// Take back `count` prisoners from `mover` on undo.
    fn revoke_captures(&mut self, mover: StoneColor, count: usize) {
        match mover {
            StoneColor::Black => self.black_captures -= count,
            StoneColor::White => self.white_captures -= count,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_diagram(f, self.size, |c| self.color_at(c))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("size", &self.size)
            .field("moves", &self.history.len())
            .field("black_captures", &self.black_captures)
            .field("white_captures", &self.white_captures)
            .finish()?;
        writeln!(f)?;
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const B: StoneColor = StoneColor::Black;
    const W: StoneColor = StoneColor::White;

    fn setpos(size: usize, black: &[(usize, usize)], white: &[(usize, usize)]) -> Position {
        let mut pos = Position::new(size);
        for &(x, y) in black {
            assert!(pos.force_place(Stone::new(x, y, B)));
        }
        for &(x, y) in white {
            assert!(pos.force_place(Stone::new(x, y, W)));
        }
        pos
    }

    /// Recompute every chain's liberties from scratch and compare.
    fn assert_liberties_consistent(pos: &Position) {
        let size = pos.board_size();
        for chain in pos.chains() {
            let expected: BTreeSet<Coord> = chain
                .coords()
                .flat_map(|c| c.neighbors(size))
                .filter(|&n| !pos.occupied(n))
                .collect();
            assert_eq!(chain.liberties(), &expected);
            for c in chain.coords() {
                assert_eq!(pos.chain_at(c), Some(chain));
            }
        }
    }

    #[test]
    fn test_empty_position() {
        let pos = Position::new(9);
        assert_eq!(pos.board_size(), 9);
        assert_eq!(pos.chains().count(), 0);
        assert_eq!(pos.move_number(), 0);
        assert!(!pos.occupied(Coord::new(4, 4)));
    }

    #[test]
    fn test_single_stone_liberties() {
        let mut pos = Position::new(19);
        assert!(pos.add_stone(Stone::new(3, 3, B)));
        assert_eq!(pos.chain_at(Coord::new(3, 3)).unwrap().liberty_count(), 4);
        assert!(pos.add_stone(Stone::new(0, 0, W)));
        assert_eq!(pos.chain_at(Coord::new(0, 0)).unwrap().liberty_count(), 2);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_occupied_point_rejected() {
        let mut pos = Position::new(9);
        assert!(pos.add_stone(Stone::new(4, 4, B)));
        assert!(!pos.add_stone(Stone::new(4, 4, W)));
        assert!(!pos.add_stone(Stone::new(9, 0, W)));
        assert_eq!(pos.move_number(), 1);
    }

    #[test]
    fn test_merge_on_contact() {
        let mut pos = Position::new(9);
        pos.add_stone(Stone::new(2, 2, B));
        pos.add_stone(Stone::new(4, 2, B));
        pos.add_stone(Stone::new(3, 2, B));
        let chain = pos.chain_at(Coord::new(2, 2)).unwrap();
        assert_eq!(chain.size(), 3);
        assert_eq!(chain.liberty_count(), 8);
        assert_eq!(pos.chains().count(), 1);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_capture_single_stone() {
        let mut pos = setpos(9, &[(1, 0), (0, 1)], &[(0, 0)]);
        // (0,0) already has no liberties after setup; the engine still sees it.
        assert_eq!(pos.chain_at(Coord::new(0, 0)).unwrap().liberty_count(), 0);
        pos.force_remove(Coord::new(0, 1));
        assert!(pos.add_stone(Stone::new(0, 1, B)));
        assert!(!pos.occupied(Coord::new(0, 0)));
        assert_eq!(pos.captures(B), 1);
        assert_eq!(pos.current_move().unwrap().captured_count(), 1);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_multi_stone_capture() {
        let mut pos = setpos(9, &[(0, 2), (1, 1), (2, 0)], &[(0, 0), (1, 0), (0, 1)]);
        // Setup leaves White's three stones without liberties. Re-open one.
        pos.force_remove(Coord::new(2, 0));
        assert!(pos.chain_at(Coord::new(0, 0)).unwrap().is_atari());
        assert!(pos.add_stone(Stone::new(2, 0, B)));
        assert_eq!(pos.captures(B), 3);
        for c in [(0, 0), (1, 0), (0, 1)] {
            assert!(!pos.occupied(Coord::new(c.0, c.1)));
        }
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_suicide_rejected() {
        let mut pos = setpos(9, &[(1, 0), (0, 1)], &[]);
        let before = pos.snapshot();
        assert!(pos.is_suicide(Stone::new(0, 0, W)));
        assert!(!pos.add_stone(Stone::new(0, 0, W)));
        assert_eq!(pos.snapshot(), before);
        assert_eq!(pos.move_number(), 0);
    }

    #[test]
    fn test_group_suicide_rejected() {
        let mut pos = setpos(9, &[(1, 0), (1, 1), (0, 2)], &[(0, 1)]);
        assert!(!pos.add_stone(Stone::new(0, 0, W)));
        assert!(!pos.occupied(Coord::new(0, 0)));
    }

    #[test]
    fn test_filling_own_last_liberty_legal_when_capturing() {
        // White (1,0) has only (0,0) left; Black (0,0) has no liberty of its own.
        let mut pos = setpos(9, &[(2, 0), (1, 1)], &[(1, 0), (0, 1)]);
        assert!(!pos.is_suicide(Stone::new(0, 0, B)));
        assert!(pos.add_stone(Stone::new(0, 0, B)));
        assert!(!pos.occupied(Coord::new(1, 0)));
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_ko() {
        let mut pos = setpos(
            9,
            &[(0, 1), (1, 0), (1, 2)],
            &[(2, 0), (3, 1), (2, 2), (1, 1)],
        );
        assert!(pos.add_stone(Stone::new(2, 1, B)));
        assert_eq!(pos.current_move().unwrap().ko, Some(Coord::new(1, 1)));
        assert!(pos.is_ko(Coord::new(1, 1)));

        // Immediate retake is forbidden.
        assert!(!pos.add_stone(Stone::new(1, 1, W)));

        // A move elsewhere lifts the restriction.
        assert!(pos.add_stone(Stone::new(6, 6, W)));
        assert!(!pos.is_ko(Coord::new(1, 1)));
        assert!(pos.add_stone(Stone::new(6, 8, B)));
        assert!(pos.add_stone(Stone::new(1, 1, W)));
        assert!(!pos.occupied(Coord::new(2, 1)));
        assert_eq!(pos.current_move().unwrap().ko, Some(Coord::new(2, 1)));
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_pass_clears_ko() {
        let mut pos = setpos(
            9,
            &[(0, 1), (1, 0), (1, 2)],
            &[(2, 0), (3, 1), (2, 2), (1, 1)],
        );
        assert!(pos.add_stone(Stone::new(2, 1, B)));
        pos.pass(W);
        assert!(!pos.is_ko(Coord::new(1, 1)));
        pos.pass(B);
        assert!(pos.has_two_passes());
        assert!(pos.add_stone(Stone::new(1, 1, W)));
    }

    #[test]
    fn test_undo_restores_captures() {
        let mut pos = setpos(9, &[(2, 0), (1, 1)], &[(1, 0), (0, 1)]);
        let before = pos.snapshot();
        assert!(pos.add_stone(Stone::new(0, 0, B)));
        assert_eq!(pos.captures(B), 1);

        let (mv, chain) = pos.undo().unwrap();
        assert_eq!(mv.coord, Some(Coord::new(0, 0)));
        assert_eq!(chain.unwrap().size(), 1);
        assert_eq!(pos.snapshot(), before);
        assert_eq!(pos.captures(B), 0);
        assert!(pos.has_future());
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_undo_splits_chain() {
        let mut pos = Position::new(9);
        pos.add_stone(Stone::new(2, 2, B));
        pos.add_stone(Stone::new(4, 2, B));
        pos.add_stone(Stone::new(3, 2, B));
        assert_eq!(pos.chains().count(), 1);
        pos.undo();
        assert_eq!(pos.chains().count(), 2);
        assert_eq!(pos.chain_at(Coord::new(2, 2)).unwrap().size(), 1);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let mut pos = setpos(9, &[(2, 0), (1, 1)], &[(1, 0), (0, 1)]);
        let moves = [
            Stone::new(0, 0, B),
            Stone::new(4, 4, W),
            Stone::new(0, 2, B),
            Stone::new(5, 4, W),
        ];
        let mut snapshots = vec![pos.snapshot()];
        for stone in moves {
            assert!(pos.add_stone(stone));
            snapshots.push(pos.snapshot());
        }
        let captures = (pos.captures(B), pos.captures(W));

        while pos.undo().is_some() {}
        assert_eq!(pos.snapshot(), snapshots[0]);
        assert_eq!(pos.captures(B), 0);

        for expected in &snapshots[1..] {
            pos.redo().unwrap();
            assert_eq!(&pos.snapshot(), expected);
        }
        assert!(pos.redo().is_none());
        assert_eq!((pos.captures(B), pos.captures(W)), captures);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_new_move_discards_future() {
        let mut pos = Position::new(9);
        pos.add_stone(Stone::new(0, 0, B));
        pos.add_stone(Stone::new(1, 1, W));
        pos.undo();
        assert!(pos.add_stone(Stone::new(2, 2, W)));
        assert!(!pos.has_future());
        assert_eq!(pos.move_number(), 2);
        assert!(!pos.occupied(Coord::new(1, 1)));
    }

    #[test]
    fn test_undo_pass() {
        let mut pos = Position::new(9);
        pos.pass(B);
        let (mv, chain) = pos.undo().unwrap();
        assert!(mv.is_pass());
        assert!(chain.is_none());
        assert!(pos.undo().is_none());
    }

    #[test]
    fn test_force_place_replaces_and_remove_splits() {
        let mut pos = setpos(9, &[(1, 1), (2, 1), (3, 1)], &[]);
        assert!(pos.force_place(Stone::new(2, 1, W)));
        assert_eq!(pos.color_at(Coord::new(2, 1)), Some(W));
        assert_eq!(pos.chain_at(Coord::new(1, 1)).unwrap().size(), 1);
        assert_eq!(pos.force_remove(Coord::new(2, 1)), Some(W));
        assert_eq!(pos.force_remove(Coord::new(2, 1)), None);
        assert_eq!(pos.move_number(), 0);
        assert_liberties_consistent(&pos);
    }

    #[test]
    fn test_neighbor_chain_queries() {
        let pos = setpos(9, &[(1, 1), (3, 1)], &[(1, 0), (2, 0), (2, 2)]);
        let c = Coord::new(2, 1);
        assert_eq!(pos.neighbor_chains(c, B).len(), 2);
        assert_eq!(pos.neighbor_chains_with_liberties(c, W, 3).len(), 1);
        assert_eq!(pos.neighbor_chains_with_liberties(c, W, 4).len(), 1);
        assert!(pos.neighbor_chains_with_liberties(c, W, 2).is_empty());
        let black = pos.chain_at(Coord::new(1, 1)).unwrap();
        let touching = pos.chain_neighbors(black, W, 3);
        assert_eq!(touching.len(), 1);
        assert_eq!(touching[0].size(), 2);
    }

    #[test]
    fn test_resign() {
        let mut pos = Position::new(9);
        assert!(!pos.is_finished());
        pos.resign(W);
        assert_eq!(pos.result().unwrap().winner(), Some(B));
        pos.reset();
        assert!(!pos.is_finished());
    }

    #[test]
    #[should_panic(expected = "keyed to no chain")]
    fn test_undo_of_missing_stone_panics() {
        let mut pos = Position::new(9);
        pos.add_stone(Stone::new(4, 4, B));
        pos.force_remove(Coord::new(4, 4));
        pos.undo();
    }
}
