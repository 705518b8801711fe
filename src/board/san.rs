//! Single half-move parsing, Standard Algebraic Notation subset.
//!
//! Supported grammar: `O-O`, `O-O-O`, or `<piece>? <file-disambig>? x? <dest>`
//! where a lower-case first character means a pawn move. Rank and
//! full-square disambiguators are out of scope; an input needing them fails
//! as ambiguous.
//!
//! The parser resolves which piece moves; it does not prove the move legal.
//! [`Game::apply_san`] membership-tests the result against the legal move
//! set before applying it.

use super::error::SanError;
use super::grid::PieceQuery;
use super::state::Game;
use super::types::{Move, Piece, PieceKind, Square};

const KINGSIDE_NOTATION: &str = "O-O";
const QUEENSIDE_NOTATION: &str = "O-O-O";

impl Game {
    /// Resolve one half-move of SAN against the current position.
    pub fn parse_san(&self, san: &str) -> Result<Move, SanError> {
        if san.is_empty() {
            return Err(SanError::Empty);
        }

        if san == KINGSIDE_NOTATION {
            return Ok(Move::castle(self.side_to_move, true));
        }
        if san == QUEENSIDE_NOTATION {
            return Ok(Move::castle(self.side_to_move, false));
        }

        // Prepend 'P' to pawn moves so every piece parses the same way.
        let mut chars: Vec<char> = san.chars().collect();
        if chars[0].is_ascii_lowercase() {
            chars.insert(0, 'P');
        }

        match chars.iter().position(|&c| c == 'x') {
            Some(split) => self.parse_capture(san, &chars[..split], &chars[split + 1..]),
            None => self.parse_plain(san, &chars),
        }
    }

    /// `<prefix>x<dest>`: the prefix is a piece letter plus an optional
    /// file disambiguator.
    fn parse_capture(&self, san: &str, prefix: &[char], dest: &[char]) -> Result<Move, SanError> {
        let kind = match prefix.first() {
            Some(&symbol) => {
                PieceKind::from_symbol(symbol).ok_or(SanError::InvalidPiece { symbol })?
            }
            None => return Err(SanError::InvalidPiece { symbol: 'x' }),
        };
        let file = match prefix.len() {
            1 => None,
            2 => Some(parse_file(san, prefix[1])?),
            _ => {
                return Err(SanError::InvalidSquare {
                    notation: san.to_string(),
                })
            }
        };
        let to = parse_destination(san, dest)?;

        let candidates = self.move_candidates(kind, file, to);
        match candidates.as_slice() {
            [from] => Ok(self.board.normal_move(*from, to)),
            [] => self
                .en_passant_fallback(kind, file, to)
                .ok_or(SanError::NoMatch {
                    notation: san.to_string(),
                }),
            _ => Err(SanError::Ambiguous {
                notation: san.to_string(),
            }),
        }
    }

    /// `<piece><dest>` or `<piece><file-disambig><dest>`.
    fn parse_plain(&self, san: &str, chars: &[char]) -> Result<Move, SanError> {
        let symbol = chars[0];
        let kind = PieceKind::from_symbol(symbol).ok_or(SanError::InvalidPiece { symbol })?;
        let (file, dest) = if chars.len() >= 4 {
            (Some(parse_file(san, chars[1])?), &chars[2..])
        } else {
            (None, &chars[1..])
        };
        let to = parse_destination(san, dest)?;

        let candidates = self.move_candidates(kind, file, to);
        match candidates.as_slice() {
            [from] => Ok(self.board.normal_move(*from, to)),
            [] => Err(SanError::NoMatch {
                notation: san.to_string(),
            }),
            _ => Err(SanError::Ambiguous {
                notation: san.to_string(),
            }),
        }
    }

    /// Friendly pieces of the right kind (and file, when disambiguated)
    /// whose pseudo-legal targets include the destination.
    fn move_candidates(
        &self,
        kind: PieceKind,
        file: Option<usize>,
        to: Square,
    ) -> Vec<Square> {
        let mut query = PieceQuery::new()
            .kind(kind)
            .color(self.side_to_move)
            .reaches(to);
        if let Some(file) = file {
            query = query.file(file);
        }
        self.board.find(query)
    }

    /// A pawn capture with no ordinary candidate may still be en passant:
    /// the destination must be the current en passant target and a friendly
    /// pawn must stand on the disambiguator file beside the victim.
    fn en_passant_fallback(
        &self,
        kind: PieceKind,
        file: Option<usize>,
        to: Square,
    ) -> Option<Move> {
        if kind != PieceKind::Pawn || self.en_passant_target != Some(to) {
            return None;
        }
        let color = self.side_to_move;
        let victim = to.offset(-color.forward(), 0)?;
        let attacker = Square::new(victim.rank(), file?);
        if self.board.occupant(attacker) != Some(Piece::new(PieceKind::Pawn, color))
            || self.board.occupant(victim) != Some(Piece::new(PieceKind::Pawn, color.opposite()))
        {
            return None;
        }
        Some(Move::en_passant(color, attacker, to, victim))
    }

    /// Parse one half-move of SAN and apply it.
    ///
    /// This is the canonical notation pathway: parse, membership-test
    /// against the legal move set, then apply.
    pub fn apply_san(&mut self, san: &str) -> Result<Move, SanError> {
        let mv = self.parse_san(san)?;
        if !self.legal_moves().contains(&mv) {
            return Err(SanError::Illegal {
                notation: san.to_string(),
            });
        }
        self.apply_move(mv);
        Ok(mv)
    }
}

fn parse_file(san: &str, c: char) -> Result<usize, SanError> {
    if ('a'..='h').contains(&c) {
        Ok(c as usize - 'a' as usize)
    } else {
        Err(SanError::InvalidSquare {
            notation: san.to_string(),
        })
    }
}

fn parse_destination(san: &str, dest: &[char]) -> Result<Square, SanError> {
    let notation: String = dest.iter().collect();
    if dest.len() != 2 {
        return Err(SanError::InvalidSquare {
            notation: san.to_string(),
        });
    }
    notation.parse().map_err(|_| SanError::InvalidSquare {
        notation: san.to_string(),
    })
}
