//! Game replay: a position and its symmetric Zobrist keys kept in lockstep.
//!
//! Every event applied through [`Replay`] updates the board and all eight
//! symmetric hashes together, including the stones a move captures and the
//! stones an undo brings back. This is the surface record readers (SGF,
//! GTP) drive, and the place opening-book entries are recorded from.

use std::sync::Arc;

use tracing::debug;

use crate::board::{Coord, Stone, StoneColor, Symmetry};
use crate::book::{Forecast, OpeningBook};
use crate::constants::DEFAULT_KOMI;
use crate::position::{Move, Position};
use crate::zobrist::{SymmetricHashes, ZobristTable};

/// One step of a game record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A move under the rules.
    Place(Stone),
    Pass(StoneColor),
    /// Setup stone (`AB`/`AW`), outside the rules and the move history.
    SetupAdd(Stone),
    /// Setup removal (`AE`).
    SetupRemove(Coord),
}

#[derive(Debug, Clone)]
pub struct Replay {
    position: Position,
    hashes: SymmetricHashes,
}

impl Replay {
    /// Empty board sized to the table.
    pub fn new(table: Arc<ZobristTable>) -> Self {
        Self::with_komi(table, DEFAULT_KOMI)
    }

    pub fn with_komi(table: Arc<ZobristTable>, komi: f32) -> Self {
        let position = Position::with_komi(table.size(), komi);
        Self {
            position,
            hashes: SymmetricHashes::new(table),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn set_komi(&mut self, komi: f32) {
        self.position.set_komi(komi);
    }

    pub fn hashes(&self) -> &SymmetricHashes {
        &self.hashes
    }

    /// Key of the current position in its own orientation.
    pub fn key(&self) -> u64 {
        self.hashes.key()
    }

    pub fn board_size(&self) -> usize {
        self.position.board_size()
    }

    /// Apply one event. Returns `false` if it was rejected (illegal move,
    /// off-board setup, or removal of an empty point), in which case nothing
    /// changed.
    pub fn apply(&mut self, event: GameEvent) -> bool {
        match event {
            GameEvent::Place(stone) => {
                if !self.position.add_stone(stone) {
                    debug!(color = %stone.color, at = %stone.coord, "rejected move");
                    return false;
                }
                self.hashes.toggle_stone(stone);
                if let Some(mv) = self.position.current_move() {
                    for captured in mv.captured_stones() {
                        self.hashes.toggle_stone(captured);
                    }
                }
                true
            }
            GameEvent::Pass(color) => {
                self.position.pass(color);
                self.hashes.apply_passing_move();
                true
            }
            GameEvent::SetupAdd(stone) => {
                if !stone.coord.on_board(self.board_size()) {
                    return false;
                }
                match self.position.color_at(stone.coord) {
                    Some(color) if color == stone.color => return true,
                    Some(color) => self.hashes.toggle_stone(Stone {
                        coord: stone.coord,
                        color,
                    }),
                    None => {}
                }
                self.position.force_place(stone);
                self.hashes.toggle_stone(stone);
                true
            }
            GameEvent::SetupRemove(coord) => match self.position.force_remove(coord) {
                Some(color) => {
                    self.hashes.toggle_stone(Stone { coord, color });
                    true
                }
                None => false,
            },
        }
    }

    /// Apply events in order, stopping at the first rejected one. Returns how
    /// many were applied.
    pub fn apply_all(&mut self, events: impl IntoIterator<Item = GameEvent>) -> usize {
        let mut applied = 0;
        for event in events {
            if !self.apply(event) {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Take back the latest move. Setup events are not part of the history.
    pub fn undo(&mut self) -> Option<Move> {
        let (mv, _) = self.position.undo()?;
        self.toggle_move(&mv);
        Some(mv)
    }

    pub fn redo(&mut self) -> Option<Move> {
        let mv = self.position.redo()?;
        self.toggle_move(&mv);
        Some(mv)
    }

    /// Clear the board, history and keys.
    pub fn reset(&mut self) {
        self.position.reset();
        self.hashes.reset();
    }

    fn toggle_move(&mut self, mv: &Move) {
        match mv.stone() {
            None => self.hashes.apply_passing_move(),
            Some(stone) => {
                self.hashes.toggle_stone(stone);
                for captured in mv.captured_stones() {
                    self.hashes.toggle_stone(captured);
                }
            }
        }
    }

    /// Record that `next` was played from the current position.
    pub fn record_forecast(&self, book: &mut OpeningBook, next: Coord, info: &str) -> bool {
        match Forecast::at(next, self.board_size(), info) {
            Some(forecast) => {
                book.add(self.key(), forecast);
                true
            }
            None => false,
        }
    }

    /// Book continuations for the current position in any orientation,
    /// expressed in this board's coordinates.
    pub fn forecasts(&self, book: &OpeningBook) -> Option<(Symmetry, Vec<Forecast>)> {
        book.lookup_symmetric(&self.hashes)
    }
}
