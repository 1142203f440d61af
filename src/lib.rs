//! goban-rust: a Go position engine.
//!
//! This crate tracks Go positions under the rules (captures, suicide, ko),
//! reads ladders, and keys positions with Zobrist hashes so they can be
//! matched against an opening book in any of the eight board orientations.
//!
//! ## Modules
//!
//! - [`constants`] - Defaults and fixed limits
//! - [`board`] - Colors, coordinates, symmetries and GTP vertices
//! - [`chain`] - Connected groups and their liberties
//! - [`history`] - Undo/redo cursor over recorded moves
//! - [`position`] - The rules engine
//! - [`ladder`] - Ladder reading and ladder move classifiers
//! - [`zobrist`] - Zobrist tables and incremental keys
//! - [`book`] - Opening book of forecasts keyed by position hash
//! - [`format`] - Binary file formats for tables and books
//! - [`replay`] - A position and its keys driven by game events
//! - [`result`] - Game results in SGF form
//! - [`gtp`] - Go Text Protocol front end
//!
//! ## Example
//!
//! ```
//! use goban_rust::board::{Stone, StoneColor};
//! use goban_rust::position::Position;
//!
//! let mut pos = Position::new(9);
//! assert!(pos.add_stone(Stone::new(1, 0, StoneColor::Black)));
//! assert!(pos.add_stone(Stone::new(0, 0, StoneColor::White)));
//! assert!(pos.add_stone(Stone::new(0, 1, StoneColor::Black)));
//!
//! // The white corner stone was captured.
//! assert_eq!(pos.color_at(goban_rust::board::Coord::new(0, 0)), None);
//! assert_eq!(pos.captures(StoneColor::Black), 1);
//!
//! pos.undo();
//! assert_eq!(pos.color_at(goban_rust::board::Coord::new(0, 0)), Some(StoneColor::White));
//! ```

pub mod board;
pub mod book;
pub mod chain;
pub mod constants;
pub mod format;
pub mod gtp;
pub mod history;
pub mod ladder;
pub mod position;
pub mod replay;
pub mod result;
pub mod zobrist;
