//! Game state: the board plus everything the board cannot remember.
//!
//! Castling rights and the en passant target are path-dependent, so each
//! history entry snapshots them before the move is applied; undo restores
//! the snapshot instead of trying to re-derive the fields from occupancy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::StateError;
use super::grid::Board;
use super::types::{CastlingRights, Color, Move, PieceKind, Square};

/// The outcome of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl From<Color> for Winner {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Winner::White,
            Color::Black => Winner::Black,
        }
    }
}

/// One applied move plus the state snapshot needed to reverse it exactly.
#[derive(Clone, Debug)]
pub(crate) struct HistoryEntry {
    pub(crate) mv: Move,
    prior_rights: CastlingRights,
    prior_en_passant: Option<Square>,
}

/// A chess game: board occupancy, side to move, castling rights, en passant
/// target, and the move history.
///
/// The state is mutated only through [`apply_move`](Self::apply_move) /
/// [`undo_move`](Self::undo_move) (and the SAN convenience
/// [`apply_san`](Self::apply_san)); everything else is inspection.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) history: Vec<HistoryEntry>,
    pub(crate) finished: bool,
    pub(crate) winner: Option<Winner>,
}

impl Game {
    /// A game at the standard starting position, White to move.
    #[must_use]
    pub fn new() -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Color::White,
            castling_rights: CastlingRights::all(),
            en_passant_target: None,
            history: Vec::new(),
            finished: false,
            winner: None,
        }
    }

    /// The current occupancy.
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is.
    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The four castling rights.
    #[inline]
    #[must_use]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// The square skipped by the immediately preceding double pawn push,
    /// if there was one.
    #[inline]
    #[must_use]
    pub const fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// The applied moves, oldest first.
    pub fn history(&self) -> impl ExactSizeIterator<Item = &Move> + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }

    /// Has the game reached checkmate or stalemate?
    #[inline]
    #[must_use]
    pub const fn finished(&self) -> bool {
        self.finished
    }

    /// The outcome, once [`finished`](Self::finished) is true.
    #[inline]
    #[must_use]
    pub const fn winner(&self) -> Option<Winner> {
        self.winner
    }

    /// Apply a legal move and run endgame detection.
    ///
    /// The move must come from [`legal_moves`](Self::legal_moves) for the
    /// current position; membership testing is the caller's duty (the SAN
    /// pathway does it for you). Applying anything else corrupts the
    /// position.
    pub fn apply_move(&mut self, mv: Move) {
        self.make_move(mv);
        self.detect_endgame();
    }

    /// Undo the most recent move, restoring the full pre-move state.
    pub fn undo_move(&mut self) -> Result<Move, StateError> {
        self.unmake_move().ok_or(StateError::EmptyHistory)
    }

    /// The state transition of [`apply_move`](Self::apply_move) without the
    /// endgame scan. Perft and the legality filter drive the game through
    /// this pair; node counts and observable state are identical.
    pub(crate) fn make_move(&mut self, mv: Move) {
        self.history.push(HistoryEntry {
            mv,
            prior_rights: self.castling_rights,
            prior_en_passant: self.en_passant_target,
        });

        self.board.apply(&mv);
        self.en_passant_target = mv.double_push_target();
        self.update_castling_rights(&mv);
        self.side_to_move = self.side_to_move.opposite();
    }

    pub(crate) fn unmake_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.board.undo(&entry.mv);
        self.castling_rights = entry.prior_rights;
        self.en_passant_target = entry.prior_en_passant;
        self.side_to_move = self.side_to_move.opposite();
        self.finished = false;
        self.winner = None;
        Some(entry.mv)
    }

    /// Castling rights are forfeited by castling, by moving the king, by
    /// moving a rook off its home square, and by having a rook captured on
    /// its home square.
    fn update_castling_rights(&mut self, mv: &Move) {
        match *mv {
            Move::Castle { color, .. } => self.castling_rights.remove_both(color),
            Move::Normal {
                color,
                from,
                to,
                piece,
                captured,
                ..
            } => {
                match piece.kind {
                    PieceKind::King => self.castling_rights.remove_both(color),
                    PieceKind::Rook => {
                        let rank = color.home_rank();
                        if from == Square::new(rank, 0) {
                            self.castling_rights.remove(color, false);
                        } else if from == Square::new(rank, 7) {
                            self.castling_rights.remove(color, true);
                        }
                    }
                    _ => {}
                }

                if let Some(captured_piece) = captured {
                    if captured_piece.kind == PieceKind::Rook {
                        let rank = captured_piece.color.home_rank();
                        if to == Square::new(rank, 0) {
                            self.castling_rights.remove(captured_piece.color, false);
                        } else if to == Square::new(rank, 7) {
                            self.castling_rights.remove(captured_piece.color, true);
                        }
                    }
                }
            }
            Move::EnPassant { .. } => {}
        }
    }

    pub(crate) fn detect_endgame(&mut self) {
        let side = self.side_to_move;
        if self.is_checkmate(side) {
            self.finished = true;
            self.winner = Some(Winner::from(side.opposite()));
            #[cfg(feature = "logging")]
            log::debug!("checkmate, {} wins", side.opposite());
        } else if self.is_stalemate(side) {
            self.finished = true;
            self.winner = Some(Winner::Draw);
            #[cfg(feature = "logging")]
            log::debug!("stalemate");
        }
    }

    /// Count the leaf positions reachable in `depth` half-moves of legal
    /// play. The primary correctness oracle for the generation / apply /
    /// undo triangle.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.make_move(mv);
            nodes += self.perft(depth - 1);
            self.unmake_move();
        }
        nodes
    }

    /// Perft broken down by first move; handy when hunting a generation bug.
    pub fn perft_divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        let mut results = Vec::new();
        if depth == 0 {
            return results;
        }
        for mv in self.legal_moves() {
            self.make_move(mv);
            results.push((mv, self.perft(depth - 1)));
            self.unmake_move();
        }
        results
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
