//! Chess board representation and rule logic.
//!
//! A mailbox board plus the full legality apparatus: pseudo-legal move
//! generation, self-check filtering, castling and en passant, make/unmake
//! with exact reversal, SAN and FEN parsing, and perft for validation.
//!
//! # Example
//! ```
//! use chess_rules::board::Game;
//!
//! let mut game = Game::new();
//! let moves = game.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod builder;
mod error;
mod fen;
mod grid;
mod make_unmake;
mod movegen;
pub mod prelude;
mod san;
mod state;
mod types;

#[cfg(test)]
mod tests;

// Public API - types users need
pub use builder::GameBuilder;
pub use error::{FenError, SanError, SquareError, StateError};
pub use grid::{Board, PieceQuery};
pub use state::{Game, Winner};
pub use types::{CastlingRights, Color, Move, Piece, PieceKind, Square};
