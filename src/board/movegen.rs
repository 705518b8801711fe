//! Pseudo-legal move generation, attack detection, and the legality filter.
//!
//! Pseudo-legal generation answers "where may this piece move by its own
//! rules", ignoring self-check, castling and en passant. The legality
//! filter on [`Game`] layers those on top: it drops moves that leave the
//! mover's king attacked and admits castles and en passant captures under
//! their extra conditions.

use once_cell::sync::Lazy;

use super::grid::{Board, PieceQuery};
use super::state::Game;
use super::types::{Color, Move, Piece, PieceKind, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

const DIAGONAL_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONAL_DIRS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

fn leaper_table(deltas: &[(i8, i8); 8]) -> [Vec<Square>; 64] {
    std::array::from_fn(|idx| {
        let square = Square::from_index(idx);
        deltas
            .iter()
            .filter_map(|&(rank_delta, file_delta)| square.offset(rank_delta, file_delta))
            .collect()
    })
}

/// In-board knight destinations per square.
static KNIGHT_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| leaper_table(&KNIGHT_DELTAS));

/// In-board king destinations per square.
static KING_TARGETS: Lazy<[Vec<Square>; 64]> = Lazy::new(|| leaper_table(&KING_DELTAS));

impl Board {
    /// All destination squares the piece on `from` may move to by its own
    /// movement rules, ignoring self-check. Castling and en passant are not
    /// produced here. Empty for an unoccupied square.
    #[must_use]
    pub fn pseudo_targets(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.occupant(from) else {
            return Vec::new();
        };
        let mut targets = Vec::new();
        match piece.kind {
            PieceKind::Pawn => self.pawn_targets(from, piece.color, &mut targets),
            PieceKind::Knight => {
                self.leaper_targets(&KNIGHT_TARGETS[from.index()], piece.color, &mut targets);
            }
            PieceKind::King => {
                self.leaper_targets(&KING_TARGETS[from.index()], piece.color, &mut targets);
            }
            PieceKind::Bishop => self.slider_targets(from, piece.color, &DIAGONAL_DIRS, &mut targets),
            PieceKind::Rook => self.slider_targets(from, piece.color, &ORTHOGONAL_DIRS, &mut targets),
            PieceKind::Queen => {
                self.slider_targets(from, piece.color, &DIAGONAL_DIRS, &mut targets);
                self.slider_targets(from, piece.color, &ORTHOGONAL_DIRS, &mut targets);
            }
        }
        targets
    }

    fn pawn_targets(&self, from: Square, color: Color, targets: &mut Vec<Square>) {
        let forward = color.forward();

        if let Some(one_ahead) = from.offset(forward, 0) {
            if self.occupant(one_ahead).is_none() {
                targets.push(one_ahead);
                if from.rank() == color.pawn_rank() {
                    if let Some(two_ahead) = from.offset(2 * forward, 0) {
                        if self.occupant(two_ahead).is_none() {
                            targets.push(two_ahead);
                        }
                    }
                }
            }
        }

        // diagonal captures; edge files generate only the in-board diagonal
        for file_delta in [-1, 1] {
            if let Some(diagonal) = from.offset(forward, file_delta) {
                if self
                    .occupant(diagonal)
                    .is_some_and(|occupant| occupant.color != color)
                {
                    targets.push(diagonal);
                }
            }
        }
    }

    fn leaper_targets(&self, candidates: &[Square], color: Color, targets: &mut Vec<Square>) {
        for &to in candidates {
            if self.occupant(to).map_or(true, |occupant| occupant.color != color) {
                targets.push(to);
            }
        }
    }

    fn slider_targets(
        &self,
        from: Square,
        color: Color,
        directions: &[(i8, i8); 4],
        targets: &mut Vec<Square>,
    ) {
        for &(rank_delta, file_delta) in directions {
            let mut current = from;
            while let Some(next) = current.offset(rank_delta, file_delta) {
                match self.occupant(next) {
                    None => targets.push(next),
                    Some(occupant) => {
                        if occupant.color != color {
                            targets.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    /// The squares the piece on `from` attacks: the squares on which it
    /// could capture an enemy piece were one standing there. For pawns these
    /// are the two forward diagonals regardless of occupancy; push squares
    /// are never attacks. Empty for an unoccupied square.
    #[must_use]
    pub fn attack_targets(&self, from: Square) -> Vec<Square> {
        let Some(piece) = self.occupant(from) else {
            return Vec::new();
        };
        let mut targets = Vec::new();
        match piece.kind {
            PieceKind::Pawn => {
                for file_delta in [-1, 1] {
                    if let Some(diagonal) = from.offset(piece.color.forward(), file_delta) {
                        targets.push(diagonal);
                    }
                }
            }
            PieceKind::Knight => targets.extend_from_slice(&KNIGHT_TARGETS[from.index()]),
            PieceKind::King => targets.extend_from_slice(&KING_TARGETS[from.index()]),
            PieceKind::Bishop => self.slider_attacks(from, &DIAGONAL_DIRS, &mut targets),
            PieceKind::Rook => self.slider_attacks(from, &ORTHOGONAL_DIRS, &mut targets),
            PieceKind::Queen => {
                self.slider_attacks(from, &DIAGONAL_DIRS, &mut targets);
                self.slider_attacks(from, &ORTHOGONAL_DIRS, &mut targets);
            }
        }
        targets
    }

    fn slider_attacks(&self, from: Square, directions: &[(i8, i8); 4], targets: &mut Vec<Square>) {
        for &(rank_delta, file_delta) in directions {
            let mut current = from;
            while let Some(next) = current.offset(rank_delta, file_delta) {
                targets.push(next);
                if self.occupant(next).is_some() {
                    break;
                }
                current = next;
            }
        }
    }

    /// Is `square` attacked by any piece of color `by`?
    ///
    /// Scans outward from the square instead of enumerating every attacker's
    /// moves: leaper rings for knights and kings, the two pawn-attack
    /// origins, and each ray to its first occupant for sliders.
    #[must_use]
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        for &from in &KNIGHT_TARGETS[square.index()] {
            if self.occupant(from) == Some(Piece::new(PieceKind::Knight, by)) {
                return true;
            }
        }
        for &from in &KING_TARGETS[square.index()] {
            if self.occupant(from) == Some(Piece::new(PieceKind::King, by)) {
                return true;
            }
        }

        // a pawn attacking this square stands one rank short of it
        for file_delta in [-1, 1] {
            if let Some(from) = square.offset(-by.forward(), file_delta) {
                if self.occupant(from) == Some(Piece::new(PieceKind::Pawn, by)) {
                    return true;
                }
            }
        }

        self.ray_attacker(square, by, &DIAGONAL_DIRS, PieceKind::Bishop)
            || self.ray_attacker(square, by, &ORTHOGONAL_DIRS, PieceKind::Rook)
    }

    fn ray_attacker(
        &self,
        square: Square,
        by: Color,
        directions: &[(i8, i8); 4],
        slider: PieceKind,
    ) -> bool {
        for &(rank_delta, file_delta) in directions {
            let mut current = square;
            while let Some(next) = current.offset(rank_delta, file_delta) {
                if let Some(occupant) = self.occupant(next) {
                    if occupant.color == by
                        && (occupant.kind == slider || occupant.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                current = next;
            }
        }
        false
    }

    /// Does `color`'s king stand on a square attacked by the opponent?
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_square_attacked(king, color.opposite()))
    }

    /// Build a normal move from occupancy: the moving piece is read off
    /// `from`, the captured piece (if any) off `to`.
    ///
    /// # Panics
    /// Panics if `from` is empty; that is a caller bug.
    #[must_use]
    pub(crate) fn normal_move(&self, from: Square, to: Square) -> Move {
        let piece = self
            .occupant(from)
            .expect("normal_move from an empty square");
        Move::normal(piece.color, from, to, piece, self.occupant(to))
    }
}

impl Game {
    /// All legal moves for the side to move.
    ///
    /// The order of the returned moves is unspecified; treat the result as
    /// a set.
    #[must_use]
    pub fn legal_moves(&mut self) -> Vec<Move> {
        self.legal_moves_for(self.side_to_move())
    }

    /// All legal moves for `color` in the current position.
    #[must_use]
    pub fn legal_moves_for(&mut self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in self.board.find(PieceQuery::new().color(color)) {
            for to in self.board.pseudo_targets(from) {
                moves.push(self.board.normal_move(from, to));
            }
        }

        // drop anything that leaves our own king attacked
        let board = &mut self.board;
        moves.retain(|mv| {
            board.apply(mv);
            let safe = !board.is_in_check(color);
            board.undo(mv);
            safe
        });

        self.add_en_passant(color, &mut moves);

        for kingside in [true, false] {
            if self.can_castle(color, kingside) {
                #[cfg(feature = "logging")]
                log::debug!(
                    "{color} may castle {}",
                    if kingside { "kingside" } else { "queenside" }
                );
                moves.push(Move::castle(color, kingside));
            }
        }

        moves
    }

    /// En passant is available for exactly one half-move after an enemy
    /// double push; the capture is admitted per adjacent-file pawn, subject
    /// to the same self-check filter as every other move.
    fn add_en_passant(&mut self, color: Color, moves: &mut Vec<Move>) {
        let Some(target) = self.en_passant_target() else {
            return;
        };
        let Some(victim) = target.offset(-color.forward(), 0) else {
            return;
        };
        if self.board.occupant(victim) != Some(Piece::new(PieceKind::Pawn, color.opposite())) {
            return;
        }

        for file_delta in [-1, 1] {
            let Some(attacker) = victim.offset(0, file_delta) else {
                continue;
            };
            if self.board.occupant(attacker) != Some(Piece::new(PieceKind::Pawn, color)) {
                continue;
            }
            let mv = Move::en_passant(color, attacker, target, victim);
            self.board.apply(&mv);
            let safe = !self.board.is_in_check(color);
            self.board.undo(&mv);
            if safe {
                moves.push(mv);
            }
        }
    }

    /// May `color` castle on the given side right now?
    ///
    /// Requires the persistent right, king and rook on their home squares,
    /// the king not currently in check, every square between king and rook
    /// empty, no square the king passes over or lands on attacked, and a
    /// resulting position that leaves the king safe.
    #[must_use]
    pub fn can_castle(&mut self, color: Color, kingside: bool) -> bool {
        if !self.castling_rights().has(color, kingside) {
            return false;
        }

        let rank = color.home_rank();
        let king_home = Square::new(rank, 4);
        let rook_home = Square::new(rank, if kingside { 7 } else { 0 });
        if self.board.occupant(king_home) != Some(Piece::new(PieceKind::King, color))
            || self.board.occupant(rook_home) != Some(Piece::new(PieceKind::Rook, color))
        {
            return false;
        }

        if self.board.is_in_check(color) {
            return false;
        }

        let between: &[usize] = if kingside { &[5, 6] } else { &[1, 2, 3] };
        if between
            .iter()
            .any(|&file| self.board.occupant(Square::new(rank, file)).is_some())
        {
            return false;
        }

        let king_path: &[usize] = if kingside { &[5, 6] } else { &[3, 2] };
        if king_path
            .iter()
            .any(|&file| self.board.is_square_attacked(Square::new(rank, file), color.opposite()))
        {
            return false;
        }

        let mv = Move::castle(color, kingside);
        self.board.apply(&mv);
        let safe = !self.board.is_in_check(color);
        self.board.undo(&mv);
        safe
    }

    /// Is `color` in check in the current position?
    #[must_use]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// In check with no legal moves.
    #[must_use]
    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves_for(color).is_empty()
    }

    /// Not in check, but no legal moves either.
    #[must_use]
    pub fn is_stalemate(&mut self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves_for(color).is_empty()
    }
}
