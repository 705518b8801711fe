//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types.
//!
//! # Example
//! ```
//! use chess_rules::board::prelude::*;
//! ```

pub use super::{
    Board, CastlingRights, Color, FenError, Game, GameBuilder, Move, Piece, PieceKind, PieceQuery,
    SanError, Square, SquareError, StateError, Winner,
};
