//! Forsyth-Edwards Notation parsing and formatting.
//!
//! The first four fields (placement, side to move, castling, en passant
//! target) are load-bearing; trailing halfmove/fullmove counters are
//! accepted and ignored.

use std::str::FromStr;

use super::error::FenError;
use super::grid::{Board, PieceQuery};
use super::state::Game;
use super::types::{CastlingRights, Color, Piece, PieceKind, Square};

impl Game {
    /// Parse a game from FEN notation.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        // Piece placement, rank 8 first
        let mut board = Board::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::BadRankCount { found: ranks.len() });
        }
        for (row, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - row;
            let mut file = 0usize;
            for c in rank_str.chars() {
                match c {
                    '1'..='8' => file += c as usize - '0' as usize,
                    _ => {
                        let piece =
                            Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { symbol: c })?;
                        if file >= 8 {
                            return Err(FenError::BadRankWidth {
                                rank: rank + 1,
                                files: file + 1,
                            });
                        }
                        board.place(piece, Square::new(rank, file));
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        // Side to move
        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Castling rights; missing letters mean the right is gone
        let mut castling_rights = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling_rights.set(Color::White, true),
                'Q' => castling_rights.set(Color::White, false),
                'k' => castling_rights.set(Color::Black, true),
                'q' => castling_rights.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { symbol: c }),
            }
        }

        // En passant target
        let en_passant_target = if parts[3] == "-" {
            None
        } else {
            Some(
                parts[3]
                    .parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant {
                        found: parts[3].to_string(),
                    })?,
            )
        };

        // An impossible placement is rejected here rather than surfacing as
        // a panic deep inside the legality filter.
        for color in [Color::White, Color::Black] {
            let kings = board
                .find(PieceQuery::new().kind(PieceKind::King).color(color))
                .len();
            if kings != 1 {
                return Err(FenError::BadKingCount {
                    color,
                    found: kings,
                });
            }
        }

        let mut game = Game {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            history: Vec::new(),
            finished: false,
            winner: None,
        };
        game.detect_endgame();
        Ok(game)
    }

    /// Parse a game from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use
    /// [`try_from_fen`](Self::try_from_fen) for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Render the position as FEN. The halfmove clock is not tracked and is
    /// emitted as 0; the fullmove number is derived from the history.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some(piece) = self.board.occupant(Square::new(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        for (color, kingside, symbol) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling_rights.has(color, kingside) {
                castling.push(symbol);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = self
            .en_passant_target
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        let fullmove = self.history.len() / 2 + 1;

        format!("{} {} {} {} 0 {}", rows.join("/"), side, castling, ep, fullmove)
    }
}

impl FromStr for Game {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Game::try_from_fen(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -";

    #[test]
    fn test_standard_start_round_trip() {
        let game = Game::from_fen(START_FEN);
        let fresh = Game::new();
        assert_eq!(game.board(), fresh.board());
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.castling_rights(), CastlingRights::all());
        assert_eq!(game.en_passant_target(), None);
    }

    #[test]
    fn test_counters_are_optional_and_ignored() {
        let with = Game::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        let without = Game::from_fen(START_FEN);
        assert_eq!(with.board(), without.board());
    }

    #[test]
    fn test_side_castling_and_ep_fields() {
        let game =
            Game::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3");
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.en_passant_target(), Some("f6".parse().unwrap()));

        let game = Game::from_fen("4k3/8/8/8/8/8/8/R3K2R b KQ - 0 1");
        assert_eq!(game.side_to_move(), Color::Black);
        assert!(game.castling_rights().has(Color::White, true));
        assert!(game.castling_rights().has(Color::White, false));
        assert!(!game.castling_rights().has(Color::Black, true));
        assert!(!game.castling_rights().has(Color::Black, false));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Game::try_from_fen("8/8/8/8 w - -").unwrap_err(),
            FenError::BadRankCount { found: 4 }
        );
        assert_eq!(
            Game::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w").unwrap_err(),
            FenError::TooFewParts { found: 2 }
        );
        assert_eq!(
            Game::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq -")
                .unwrap_err(),
            FenError::InvalidPiece { symbol: 'X' }
        );
        assert_eq!(
            Game::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -")
                .unwrap_err(),
            FenError::InvalidSideToMove {
                found: "x".to_string()
            }
        );
        assert_eq!(
            Game::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq -")
                .unwrap_err(),
            FenError::InvalidCastling { symbol: 'x' }
        );
        assert_eq!(
            Game::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9")
                .unwrap_err(),
            FenError::InvalidEnPassant {
                found: "e9".to_string()
            }
        );
        // a rank describing nine files
        assert!(matches!(
            Game::try_from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenError::BadRankWidth { .. })
        ));
        // no black king
        assert!(matches!(
            Game::try_from_fen("8/8/8/8/8/8/8/4K3 w - -"),
            Err(FenError::BadKingCount { .. })
        ));
    }

    #[test]
    fn test_to_fen_round_trip() {
        let fens = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "r3k2r/p6p/8/B7/1pp1p3/3b4/P6P/R3K2R w KQkq - 0 1",
            "8/5p2/8/2k3P1/p3K3/8/1P6/8 b - - 0 1",
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        ];
        for fen in fens {
            let game = Game::from_fen(fen);
            let rendered = game.to_fen();
            let reparsed = Game::from_fen(&rendered);
            assert_eq!(game.board(), reparsed.board(), "round trip of {fen}");
            assert_eq!(game.side_to_move(), reparsed.side_to_move());
            assert_eq!(game.castling_rights(), reparsed.castling_rights());
            assert_eq!(game.en_passant_target(), reparsed.en_passant_target());
        }
    }

    #[test]
    fn test_from_str() {
        let game: Game = START_FEN.parse().unwrap();
        assert_eq!(game.board(), Game::new().board());
        assert!("not a fen".parse::<Game>().is_err());
    }
}
