//! Zobrist hashing of board positions.
//!
//! A [`ZobristTable`] holds one random 64-bit value per (point state, x, y)
//! plus a constant for passes. A position's key is the XOR of the values of
//! its stones, so it can be updated in O(1) per placed or removed stone and
//! does not depend on the order stones arrived in. Empty points contribute
//! nothing: the empty board hashes to zero.
//!
//! Tables are shared read-only through `Arc`; each [`ZobristHash`] carries its
//! own key.

use std::sync::Arc;

use crate::board::{Coord, Stone, Symmetry};
use crate::constants::{DEFAULT_BOARD_SIZE, DEFAULT_ZOBRIST_SEED, POSITION_STATE_COUNT};
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTable {
    size: usize,
    pass_hash: u64,
    /// Indexed by `(state * size + x) * size + y`.
    values: Vec<u64>,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::generate(DEFAULT_BOARD_SIZE, DEFAULT_ZOBRIST_SEED)
    }
}

impl ZobristTable {
    /// Draw a fresh table from a seeded generator. The pass constant is drawn
    /// first, then points in x, y, state order. The same seed always yields
    /// the same table.
    pub fn generate(size: usize, seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let pass_hash = rng.u64(..);
        let mut table = Self {
            size,
            pass_hash,
            values: vec![0; POSITION_STATE_COUNT * size * size],
        };
        for x in 0..size {
            for y in 0..size {
                for state in 0..POSITION_STATE_COUNT {
                    let i = table.slot(state, x, y);
                    table.values[i] = rng.u64(..);
                }
            }
        }
        table
    }

    /// Build a table from values listed in x, y, state order (the on-disk
    /// order). Returns `None` if the count does not match the size.
    pub fn from_parts(size: usize, pass_hash: u64, values: &[u64]) -> Option<Self> {
        if values.len() != POSITION_STATE_COUNT * size * size {
            return None;
        }
        let mut table = Self {
            size,
            pass_hash,
            values: vec![0; values.len()],
        };
        let mut source = values.iter().copied();
        for x in 0..size {
            for y in 0..size {
                for state in 0..POSITION_STATE_COUNT {
                    let i = table.slot(state, x, y);
                    table.values[i] = source.next()?;
                }
            }
        }
        Some(table)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn pass_hash(&self) -> u64 {
        self.pass_hash
    }

    #[inline]
    fn slot(&self, state: usize, x: usize, y: usize) -> usize {
        (state * self.size + x) * self.size + y
    }

    /// Value for `state` at `(x, y)`. Panics if the point is off the table.
    #[inline]
    pub fn value(&self, state: usize, x: usize, y: usize) -> u64 {
        assert!(x < self.size && y < self.size, "({x},{y}) is off a {} table", self.size);
        self.values[self.slot(state, x, y)]
    }

    /// All values in x, y, state order.
    pub fn values_in_file_order(&self) -> impl Iterator<Item = u64> + '_ {
        (0..self.size).flat_map(move |x| {
            (0..self.size).flat_map(move |y| {
                (0..POSITION_STATE_COUNT).map(move |state| self.value(state, x, y))
            })
        })
    }
}

/// An incrementally maintained position key over a shared table.
#[derive(Debug, Clone)]
pub struct ZobristHash {
    table: Arc<ZobristTable>,
    key: u64,
}

impl ZobristHash {
    /// Key of the empty board.
    pub fn new(table: Arc<ZobristTable>) -> Self {
        Self { table, key: 0 }
    }

    /// Hash every stone currently on `pos`.
    pub fn from_position(table: Arc<ZobristTable>, pos: &Position) -> Self {
        let mut hash = Self::new(table);
        for chain in pos.chains() {
            for stone in chain.stones() {
                hash.toggle_stone(stone);
            }
        }
        hash
    }

    pub fn key(&self) -> u64 {
        self.key
    }

    pub fn table(&self) -> &Arc<ZobristTable> {
        &self.table
    }

    /// XOR in the value for `state` at `(x, y)`. Applying the same call twice
    /// restores the key.
    pub fn apply_move(&mut self, x: usize, y: usize, state: usize) {
        self.key ^= self.table.value(state, x, y);
    }

    pub fn apply_passing_move(&mut self) {
        self.key ^= self.table.pass_hash;
    }

    /// Mix a move number into the key.
    pub fn apply_move_number(&mut self, move_number: u64) {
        self.key ^= move_number;
    }

    /// Add a stone to, or remove it from, the key.
    pub fn toggle_stone(&mut self, stone: Stone) {
        self.apply_move(stone.coord.x, stone.coord.y, stone.color.state_index());
    }
}

impl PartialEq for ZobristHash {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for ZobristHash {}

/// Keys of a position under all eight board symmetries, kept in lockstep.
///
/// `key(s)` is the key the board would have after transforming every stone
/// through `s`. Looking a position up under each of them finds book entries
/// recorded in any orientation.
#[derive(Debug, Clone)]
pub struct SymmetricHashes {
    hashes: [ZobristHash; 8],
}

impl SymmetricHashes {
    pub fn new(table: Arc<ZobristTable>) -> Self {
        Self {
            hashes: std::array::from_fn(|_| ZobristHash::new(Arc::clone(&table))),
        }
    }

    pub fn from_position(table: Arc<ZobristTable>, pos: &Position) -> Self {
        let mut hashes = Self::new(table);
        for chain in pos.chains() {
            for stone in chain.stones() {
                hashes.toggle_stone(stone);
            }
        }
        hashes
    }

    pub fn board_size(&self) -> usize {
        self.hashes[0].table.size
    }

    pub fn table(&self) -> &Arc<ZobristTable> {
        &self.hashes[0].table
    }

    pub fn toggle_stone(&mut self, stone: Stone) {
        let size = self.board_size();
        for (sym, hash) in Symmetry::ALL.into_iter().zip(self.hashes.iter_mut()) {
            let c = sym.apply(stone.coord, size);
            hash.apply_move(c.x, c.y, stone.color.state_index());
        }
    }

    pub fn apply_passing_move(&mut self) {
        for hash in &mut self.hashes {
            hash.apply_passing_move();
        }
    }

    /// The untransformed key.
    pub fn key(&self) -> u64 {
        self.hashes[0].key
    }

    pub fn key_for(&self, sym: Symmetry) -> u64 {
        let i = Symmetry::ALL
            .iter()
            .position(|&s| s == sym)
            .unwrap_or_default();
        self.hashes[i].key
    }

    /// `(symmetry, key)` pairs in [`Symmetry::ALL`] order.
    pub fn keys(&self) -> impl Iterator<Item = (Symmetry, u64)> + '_ {
        Symmetry::ALL
            .into_iter()
            .zip(self.hashes.iter().map(ZobristHash::key))
    }

    pub fn reset(&mut self) {
        for hash in &mut self.hashes {
            hash.key = 0;
        }
    }
}

/// Map a point seen under `sym` back to the untransformed board.
pub fn untransform(sym: Symmetry, c: Coord, size: usize) -> Coord {
    sym.inverse().apply(c, size)
}
