//! Board geometry: colors, coordinates, neighbors, and symmetry transforms.
//!
//! Coordinates are `(x, y)` pairs with `0 <= x, y < size`. `y = 0` is the top
//! row when a board is printed; GTP vertices count rows from the bottom.

use std::fmt;

use crate::constants::{STATE_BLACK, STATE_WHITE};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoneColor {
    Black,
    White,
}

impl StoneColor {
    pub fn opposite(self) -> Self {
        match self {
            StoneColor::Black => StoneColor::White,
            StoneColor::White => StoneColor::Black,
        }
    }

    /// Zobrist state index of a stone of this color.
    pub fn state_index(self) -> usize {
        match self {
            StoneColor::Black => STATE_BLACK,
            StoneColor::White => STATE_WHITE,
        }
    }

    /// Parse `b`, `black`, `w`, `white` (any case).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Some(StoneColor::Black),
            "w" | "white" => Some(StoneColor::White),
            _ => None,
        }
    }
}

impl fmt::Display for StoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoneColor::Black => write!(f, "B"),
            StoneColor::White => write!(f, "W"),
        }
    }
}

/// A point on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Linear index `x + size * y`, as used by opening-book forecasts.
    #[inline]
    pub fn index(self, size: usize) -> usize {
        self.x + size * self.y
    }

    #[inline]
    pub fn from_index(index: usize, size: usize) -> Self {
        Self {
            x: index % size,
            y: index / size,
        }
    }

    #[inline]
    pub fn on_board(self, size: usize) -> bool {
        self.x < size && self.y < size
    }

    /// The up to four orthogonal neighbors (W, E, N, S) that lie on the board.
    pub fn neighbors(self, size: usize) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        let mut v = [None; 4];
        if x > 0 {
            v[0] = Some(Coord::new(x - 1, y));
        }
        if x + 1 < size {
            v[1] = Some(Coord::new(x + 1, y));
        }
        if y > 0 {
            v[2] = Some(Coord::new(x, y - 1));
        }
        if y + 1 < size {
            v[3] = Some(Coord::new(x, y + 1));
        }
        v.into_iter().flatten()
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A stone of a given color at a given point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Stone {
    pub coord: Coord,
    pub color: StoneColor,
}

impl Stone {
    pub const fn new(x: usize, y: usize, color: StoneColor) -> Self {
        Self {
            coord: Coord::new(x, y),
            color,
        }
    }
}

/// The eight symmetries of a square board.
///
/// Rotations are clockwise as the board is printed (`y = 0` on top).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    MirrorHorizontal,
    MirrorVertical,
    Rotate90,
    Rotate180,
    Rotate270,
    Transpose,
    AntiTranspose,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::Identity,
        Symmetry::MirrorHorizontal,
        Symmetry::MirrorVertical,
        Symmetry::Rotate90,
        Symmetry::Rotate180,
        Symmetry::Rotate270,
        Symmetry::Transpose,
        Symmetry::AntiTranspose,
    ];

    /// Map a coordinate on a `size` board through this transform.
    pub fn apply(self, c: Coord, size: usize) -> Coord {
        let m = size - 1;
        let (x, y) = (c.x, c.y);
        match self {
            Symmetry::Identity => Coord::new(x, y),
            Symmetry::MirrorHorizontal => Coord::new(m - x, y),
            Symmetry::MirrorVertical => Coord::new(x, m - y),
            Symmetry::Rotate90 => Coord::new(m - y, x),
            Symmetry::Rotate180 => Coord::new(m - x, m - y),
            Symmetry::Rotate270 => Coord::new(y, m - x),
            Symmetry::Transpose => Coord::new(y, x),
            Symmetry::AntiTranspose => Coord::new(m - y, m - x),
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Symmetry::Rotate90 => Symmetry::Rotate270,
            Symmetry::Rotate270 => Symmetry::Rotate90,
            other => other,
        }
    }
}

/// Parse a GTP vertex (e.g. `"D4"`) on a board of the given size.
///
/// Columns use letters A-T skipping I; row 1 is the bottom row.
/// Returns `None` for `"pass"` and for anything off the board.
pub fn parse_vertex(s: &str, size: usize) -> Option<Coord> {
    let bytes = s.as_bytes();
    if bytes.len() < 2 || s.eq_ignore_ascii_case("pass") {
        return None;
    }

    let col_char = bytes[0].to_ascii_uppercase();
    if !col_char.is_ascii_uppercase() || col_char == b'I' {
        return None;
    }
    let mut col = (col_char - b'A') as usize;
    // Skip 'I' column (Go convention to avoid confusion with 'J')
    if col_char > b'I' {
        col -= 1;
    }

    let row: usize = s[1..].parse().ok()?;
    if row == 0 || row > size || col >= size {
        return None;
    }
    Some(Coord::new(col, size - row))
}

/// Format a coordinate as a GTP vertex (e.g. `"D4"`).
pub fn format_vertex(c: Coord, size: usize) -> String {
    let mut letter = b'A' + c.x as u8;
    if letter >= b'I' {
        letter += 1;
    }
    format!("{}{}", letter as char, size - c.y)
}

/// Write a text diagram of a board, one row per line.
pub(crate) fn write_diagram(
    f: &mut fmt::Formatter<'_>,
    size: usize,
    stone_at: impl Fn(Coord) -> Option<StoneColor>,
) -> fmt::Result {
    for y in 0..size {
        for x in 0..size {
            let ch = match stone_at(Coord::new(x, y)) {
                Some(StoneColor::Black) => 'X',
                Some(StoneColor::White) => 'O',
                None => '.',
            };
            write!(f, "{ch} ")?;
        }
        writeln!(f)?;
    }
    Ok(())
}
