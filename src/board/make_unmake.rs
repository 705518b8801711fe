//! Applying and reversing moves on the board.
//!
//! Each variant's apply and undo are pure functions of the move payload and
//! the occupancy. Undo never re-reads the board to decide what moved: the
//! moving piece recorded at construction time is restored verbatim, which
//! reverses the automatic queen promotion exactly.

use super::grid::Board;
use super::types::{Move, Piece, PieceKind, Square};

/// King and rook files for a castle: (rook from, rook to, king to).
/// The king always starts on the e-file.
const KINGSIDE_FILES: (usize, usize, usize) = (7, 5, 6);
const QUEENSIDE_FILES: (usize, usize, usize) = (0, 3, 2);

const KING_FILE: usize = 4;

fn castle_files(kingside: bool) -> (usize, usize, usize) {
    if kingside {
        KINGSIDE_FILES
    } else {
        QUEENSIDE_FILES
    }
}

impl Board {
    /// Mutate the occupancy for a move.
    pub(crate) fn apply(&mut self, mv: &Move) {
        match *mv {
            Move::Normal { from, to, .. } => {
                self.move_raw(from, to);
            }
            Move::Castle { color, kingside } => {
                let rank = color.home_rank();
                let (rook_from, rook_to, king_to) = castle_files(kingside);
                // rook first, then king
                self.move_raw(Square::new(rank, rook_from), Square::new(rank, rook_to));
                self.move_raw(Square::new(rank, KING_FILE), Square::new(rank, king_to));
            }
            Move::EnPassant {
                attacker,
                target,
                victim,
                ..
            } => {
                self.move_raw(attacker, target);
                self.remove(victim);
            }
        }
    }

    /// Reverse [`apply`](Self::apply) for the same move, restoring the
    /// pre-move occupancy exactly.
    pub(crate) fn undo(&mut self, mv: &Move) {
        match *mv {
            Move::Normal {
                from,
                to,
                piece,
                captured,
                ..
            } => {
                self.place(piece, from);
                match captured {
                    Some(captured_piece) => self.place(captured_piece, to),
                    None => {
                        self.remove(to);
                    }
                }
            }
            Move::Castle { color, kingside } => {
                let rank = color.home_rank();
                let (rook_from, rook_to, king_to) = castle_files(kingside);
                self.move_raw(Square::new(rank, king_to), Square::new(rank, KING_FILE));
                self.move_raw(Square::new(rank, rook_to), Square::new(rank, rook_from));
            }
            Move::EnPassant {
                color,
                attacker,
                target,
                victim,
            } => {
                self.move_raw(target, attacker);
                self.place(Piece::new(PieceKind::Pawn, color.opposite()), victim);
            }
        }
    }
}
