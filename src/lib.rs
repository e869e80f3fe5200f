//! A complete solver for the game of 4x4 Touchdown
//!
//! Touchdown is a simplified pawn-race game: each side starts with four pawns
//! on its back rank, a pawn may move one square forward to an empty square or
//! capture one square diagonally forward, the first side to land a pawn on
//! the opposite back rank wins, and a side with no legal moves loses.
//!
//! This crate solves the game exhaustively by retrograde analysis: every
//! reachable position is assigned a definite WIN or LOSS value for the side
//! to move, computed by iterating a fixed-point classification over the
//! entire 24-bit position index space until no index remains unknown.
//!
//! # Basic Usage
//!
//! ```
//! use touchdown::index::INITIAL_INDEX;
//! use touchdown::board::Board;
//!
//! let board = Board::decode(INITIAL_INDEX);
//! assert!(!board.is_win());
//! assert!(!board.is_loss());
//! assert_eq!(board.encode(), INITIAL_INDEX);
//! ```

use static_assertions::*;
pub use anyhow;

pub mod bits;

pub mod index;

pub mod board;

pub mod tablebase;

pub mod solver;

#[cfg(test)]
mod tests;

/// The number of rows on the Touchdown board
pub const ROWS: usize = 4;

/// The number of columns on the Touchdown board
pub const COLS: usize = 4;

/// The number of squares on the board
pub const SQUARES: usize = ROWS * COLS;

// the index encoding packs occupancy and role bits into a single 24-bit
// word; this only works out for a 4x4 board (16 occupancy bits + 8 role bits)
const_assert!(ROWS == 4 && COLS == 4);
const_assert!(SQUARES == 16);
