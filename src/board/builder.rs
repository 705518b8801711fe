//! Fluent builder for constructing positions.
//!
//! Lets tests and callers assemble a position piece by piece instead of
//! writing FEN strings.
//!
//! # Example
//! ```
//! use chess_rules::board::{Color, GameBuilder, Piece, PieceKind};
//!
//! let game = GameBuilder::new()
//!     .piece("e1", Piece::new(PieceKind::King, Color::White))
//!     .piece("e8", Piece::new(PieceKind::King, Color::Black))
//!     .piece("a2", Piece::new(PieceKind::Pawn, Color::White))
//!     .side_to_move(Color::White)
//!     .build();
//! ```

use super::grid::Board;
use super::state::Game;
use super::types::{CastlingRights, Color, Piece, Square};

/// A fluent builder for [`Game`] positions.
///
/// Starts empty with no castling rights; rights must be granted explicitly
/// because the builder cannot know whether king or rook have moved before.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    pieces: Vec<(Square, Piece)>,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GameBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        GameBuilder {
            pieces: Vec::new(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::none(),
            en_passant_target: None,
        }
    }

    /// Add a piece. The square is given in algebraic notation ("e4");
    /// an invalid square is a programming error and panics.
    #[must_use]
    pub fn piece(mut self, square: &str, piece: Piece) -> Self {
        let square: Square = square.parse().expect("invalid square in GameBuilder");
        self.pieces.push((square, piece));
        self
    }

    /// Set the side to move (White by default).
    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Grant a castling right.
    #[must_use]
    pub fn castling(mut self, color: Color, kingside: bool) -> Self {
        self.castling_rights.set(color, kingside);
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub fn en_passant(mut self, square: &str) -> Self {
        let square: Square = square.parse().expect("invalid square in GameBuilder");
        self.en_passant_target = Some(square);
        self
    }

    /// Build the game. Endgame detection runs on the resulting position.
    #[must_use]
    pub fn build(self) -> Game {
        let mut board = Board::empty();
        for (square, piece) in self.pieces {
            board.place(piece, square);
        }
        let mut game = Game {
            board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_target: self.en_passant_target,
            history: Vec::new(),
            finished: false,
            winner: None,
        };
        game.detect_endgame();
        game
    }
}
