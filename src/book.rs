//! Opening book: known continuations keyed by position hash.
//!
//! Each entry maps a Zobrist key to a list of [`Forecast`]s, a suggested next
//! point with free-form info text (typically the source game). Adding a
//! forecast for a point already listed merges the info text instead of
//! duplicating the entry.

use std::collections::HashMap;

use crate::board::{Coord, Symmetry};
use crate::zobrist::{SymmetricHashes, untransform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Forecast {
    /// Linear point index `x + size * y`.
    pub position: u16,
    pub info: String,
}

impl Forecast {
    pub fn new(position: u16, info: impl Into<String>) -> Self {
        Self {
            position,
            info: info.into(),
        }
    }

    /// Forecast for a point on a board of `size`. `None` if the index does
    /// not fit the 16-bit position field.
    pub fn at(c: Coord, size: usize, info: impl Into<String>) -> Option<Self> {
        let position = u16::try_from(c.index(size)).ok()?;
        Some(Self::new(position, info))
    }

    pub fn coord(&self, size: usize) -> Coord {
        Coord::from_index(usize::from(self.position), size)
    }

    /// Merge `info` into this forecast's text. Text already contained is
    /// skipped; anything else goes on a new line.
    pub fn append_info(&mut self, info: &str) {
        if self.info.contains(info) {
            return;
        }
        if self.info.is_empty() {
            self.info.push_str(info);
        } else {
            self.info.push('\n');
            self.info.push_str(info);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpeningBook {
    board_size: u8,
    entries: HashMap<u64, Vec<Forecast>>,
}

impl OpeningBook {
    pub fn new(board_size: u8) -> Self {
        Self {
            board_size,
            entries: HashMap::new(),
        }
    }

    pub fn board_size(&self) -> u8 {
        self.board_size
    }

    /// Record a forecast for `hash`, merging with an existing forecast for
    /// the same point.
    pub fn add(&mut self, hash: u64, forecast: Forecast) {
        let list = self.entries.entry(hash).or_default();
        match list.iter_mut().find(|f| f.position == forecast.position) {
            Some(existing) => existing.append_info(&forecast.info),
            None => list.push(forecast),
        }
    }

    pub fn add_all(&mut self, hash: u64, forecasts: impl IntoIterator<Item = Forecast>) {
        for forecast in forecasts {
            self.add(hash, forecast);
        }
    }

    pub fn get(&self, hash: u64) -> Option<&[Forecast]> {
        self.entries.get(&hash).map(Vec::as_slice)
    }

    /// Number of distinct hashes.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by hash.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[Forecast])> + '_ {
        let mut keys: Vec<u64> = self.entries.keys().copied().collect();
        keys.sort_unstable();
        keys.into_iter()
            .map(move |k| (k, self.entries[&k].as_slice()))
    }

    /// Look the position up under every symmetry, first hit wins. Forecast
    /// points are mapped back into the position's own orientation; points
    /// off the board are dropped.
    pub fn lookup_symmetric(&self, hashes: &SymmetricHashes) -> Option<(Symmetry, Vec<Forecast>)> {
        let size = hashes.board_size();
        hashes.keys().find_map(|(sym, key)| {
            let forecasts = self.get(key)?;
            let mapped = forecasts
                .iter()
                .filter(|f| f.coord(size).on_board(size))
                .filter_map(|f| {
                    let c = untransform(sym, f.coord(size), size);
                    Forecast::at(c, size, f.info.clone())
                })
                .collect();
            Some((sym, mapped))
        })
    }
}
