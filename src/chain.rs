//! Chains: maximal connected groups of same-colored stones and their liberties.
//!
//! A chain owns its member points and its liberty set. It knows nothing about
//! the rest of the board; keeping the coordinate-to-chain index in sync after
//! a merge is the caller's job.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::board::{Coord, Stone, StoneColor};

/// Broken chain invariants. These indicate a programming error in the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("can not add stone of color {found} to chain of color {expected}")]
    ColorMismatch {
        expected: StoneColor,
        found: StoneColor,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chain {
    color: StoneColor,
    stones: BTreeSet<Coord>,
    liberties: BTreeSet<Coord>,
}

impl Chain {
    pub fn new(color: StoneColor) -> Self {
        Self {
            color,
            stones: BTreeSet::new(),
            liberties: BTreeSet::new(),
        }
    }

    pub fn color(&self) -> StoneColor {
        self.color
    }

    /// Member points in ascending order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.stones.iter().copied()
    }

    pub fn stones(&self) -> impl Iterator<Item = Stone> + '_ {
        let color = self.color;
        self.stones.iter().map(move |&coord| Stone { coord, color })
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.stones.contains(&c)
    }

    pub fn liberties(&self) -> &BTreeSet<Coord> {
        &self.liberties
    }

    pub fn liberty_count(&self) -> usize {
        self.liberties.len()
    }

    /// Smallest member point; a stable handle for the chain across clones.
    pub fn anchor(&self) -> Option<Coord> {
        self.stones.first().copied()
    }

    pub fn size(&self) -> usize {
        self.stones.len()
    }

    /// Add a same-colored stone. Its own point stops being a liberty and
    /// `new_liberties` are merged in.
    pub fn add(
        &mut self,
        stone: Stone,
        new_liberties: impl IntoIterator<Item = Coord>,
    ) -> Result<(), ChainError> {
        if stone.color != self.color {
            return Err(ChainError::ColorMismatch {
                expected: self.color,
                found: stone.color,
            });
        }
        self.liberties.remove(&stone.coord);
        self.liberties.extend(new_liberties);
        self.stones.insert(stone.coord);
        Ok(())
    }

    /// Absorb another chain of the same color.
    pub fn merge(&mut self, other: &Chain) -> Result<(), ChainError> {
        if other.color != self.color {
            return Err(ChainError::ColorMismatch {
                expected: self.color,
                found: other.color,
            });
        }
        self.stones.extend(other.stones.iter().copied());
        self.liberties.extend(other.liberties.iter().copied());
        Ok(())
    }

    pub fn add_liberty(&mut self, c: Coord) {
        self.liberties.insert(c);
    }

    pub fn remove_liberty(&mut self, c: Coord) {
        self.liberties.remove(&c);
    }

    /// True iff `c` is the one and only liberty.
    pub fn is_last_liberty(&self, c: Coord) -> bool {
        self.liberties.len() == 1 && self.liberties.contains(&c)
    }

    pub fn is_atari(&self) -> bool {
        self.liberties.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_replaces_own_liberty() {
        let mut chain = Chain::new(StoneColor::Black);
        chain
            .add(Stone::new(3, 3, StoneColor::Black), [Coord::new(3, 4), Coord::new(4, 3)])
            .unwrap();
        chain
            .add(Stone::new(4, 3, StoneColor::Black), [Coord::new(5, 3)])
            .unwrap();
        assert_eq!(chain.size(), 2);
        assert!(!chain.liberties().contains(&Coord::new(4, 3)));
        assert_eq!(chain.liberty_count(), 2);
    }

    #[test]
    fn test_add_rejects_other_color() {
        let mut chain = Chain::new(StoneColor::White);
        let err = chain
            .add(Stone::new(0, 0, StoneColor::Black), std::iter::empty())
            .unwrap_err();
        assert_eq!(
            err,
            ChainError::ColorMismatch {
                expected: StoneColor::White,
                found: StoneColor::Black
            }
        );
        assert_eq!(chain.size(), 0);
    }

    #[test]
    fn test_merge() {
        let mut a = Chain::new(StoneColor::Black);
        a.add(Stone::new(0, 0, StoneColor::Black), [Coord::new(1, 0)]).unwrap();
        let mut b = Chain::new(StoneColor::Black);
        b.add(Stone::new(2, 0, StoneColor::Black), [Coord::new(1, 0), Coord::new(3, 0)])
            .unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.size(), 2);
        assert_eq!(a.liberty_count(), 2);

        let w = Chain::new(StoneColor::White);
        assert!(a.merge(&w).is_err());
    }

    #[test]
    fn test_last_liberty_and_atari() {
        let mut chain = Chain::new(StoneColor::White);
        chain
            .add(Stone::new(0, 0, StoneColor::White), [Coord::new(1, 0), Coord::new(0, 1)])
            .unwrap();
        assert!(!chain.is_atari());
        assert!(!chain.is_last_liberty(Coord::new(1, 0)));
        chain.remove_liberty(Coord::new(0, 1));
        assert!(chain.is_atari());
        assert!(chain.is_last_liberty(Coord::new(1, 0)));
        assert!(!chain.is_last_liberty(Coord::new(0, 1)));
        chain.add_liberty(Coord::new(0, 1));
        assert_eq!(chain.liberty_count(), 2);
    }
}
