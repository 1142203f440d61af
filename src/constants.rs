//! Constants for board geometry, ladder reading, and the persisted formats.
//!
//! Board size is a runtime property of a [`Position`](crate::position::Position),
//! a [`ZobristTable`](crate::zobrist::ZobristTable) and an
//! [`OpeningBook`](crate::book::OpeningBook). The values here are defaults and
//! fixed limits shared by all of them.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board size (NxN) used when the caller does not pick one.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Smallest board size accepted by the binary formats. Files declaring a
/// size at or below this value are rejected.
pub const MIN_BOARD_SIZE: u8 = 1;

/// Largest board GTP vertices can name (25 column letters, `I` skipped).
pub const MAX_GTP_BOARD_SIZE: usize = 25;

/// Default komi (compensation points for White).
pub const DEFAULT_KOMI: f32 = 7.5;

// =============================================================================
// Ladder Reading
// =============================================================================

/// Ply budget for ladder reading. Guards against cyclic races.
pub const MAX_LADDER_ATTEMPT: i32 = 40;

// =============================================================================
// Zobrist State Indices
// =============================================================================

/// State index of a black stone.
pub const STATE_BLACK: usize = 1;

/// State index of a white stone.
pub const STATE_WHITE: usize = 2;

/// Number of states a point can be in (empty, black, white).
pub const POSITION_STATE_COUNT: usize = 3;

/// Seed used for the default Zobrist table so keys are reproducible.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0;

// =============================================================================
// Binary Formats
// =============================================================================

/// Magic characters at the head of a Zobrist table file.
pub const ZOBRIST_MAGIC: [char; 2] = ['Z', 'H'];

/// Magic characters at the head of an opening-book file.
pub const BOOK_MAGIC: [char; 2] = ['O', 'B'];

/// Format version written into new files.
pub const FORMAT_VERSION: u8 = 0;

/// Free-text metadata written into new files.
pub const FORMAT_METADATA: &str = "goban-rust";

/// Forecasts per position hash are stored with a one-byte count.
pub const MAX_FORECASTS: usize = 127;
