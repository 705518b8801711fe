//! The 8x8 board: one optional piece per square.

use super::types::{Color, Piece, PieceKind, Square};

/// Occupancy of the 64 squares. The board knows nothing about whose turn it
/// is or what happened before; that state lives on [`Game`](super::Game).
///
/// Deep copies are `Clone`; equality compares the full occupancy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
        }
    }

    /// The standard starting position.
    #[must_use]
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            board.place(Piece::new(kind, Color::White), Square::new(0, file));
            board.place(Piece::new(kind, Color::Black), Square::new(7, file));
            board.place(Piece::new(PieceKind::Pawn, Color::White), Square::new(1, file));
            board.place(Piece::new(PieceKind::Pawn, Color::Black), Square::new(6, file));
        }
        board
    }

    /// Put a piece on a square, overwriting any occupant.
    #[inline]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Take the occupant off a square, returning it.
    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Empty every square.
    pub fn clear(&mut self) {
        self.squares = [None; 64];
    }

    /// The piece on a square, if any.
    #[inline]
    #[must_use]
    pub const fn occupant(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Move the occupant of `from` to `to` without consulting any rules.
    ///
    /// A pawn arriving on its promotion rank becomes a queen of the same
    /// color. `from == to` is a no-op.
    ///
    /// # Panics
    /// Panics if `from` is empty; that is a caller bug.
    pub fn move_raw(&mut self, from: Square, to: Square) {
        if from == to {
            return;
        }
        let piece = self
            .remove(from)
            .expect("move_raw from an empty square");
        let promoted = piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank();
        let arriving = if promoted {
            Piece::new(PieceKind::Queen, piece.color)
        } else {
            piece
        };
        self.place(arriving, to);
    }

    /// Iterate over all 64 squares.
    pub fn squares() -> impl Iterator<Item = Square> {
        (0..64).map(Square::from_index)
    }

    /// Iterate over the occupied squares and their pieces.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(idx, occ)| occ.map(|piece| (Square::from_index(idx), piece)))
    }

    /// The square holding this color's king, if present.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.occupied()
            .find(|&(_, piece)| piece == Piece::new(PieceKind::King, color))
            .map(|(square, _)| square)
    }

    /// Occupied squares matching all criteria of the query.
    #[must_use]
    pub fn find(&self, query: PieceQuery) -> Vec<Square> {
        self.occupied()
            .filter(|&(square, piece)| query.matches(self, square, piece))
            .map(|(square, _)| square)
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

/// Criteria for selecting occupied squares; unset fields match anything.
///
/// # Example
/// ```
/// use chess_rules::board::{Board, PieceQuery, Color, PieceKind};
///
/// let board = Board::standard();
/// let knights = board.find(PieceQuery::new().kind(PieceKind::Knight).color(Color::White));
/// assert_eq!(knights.len(), 2);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceQuery {
    kind: Option<PieceKind>,
    color: Option<Color>,
    rank: Option<usize>,
    file: Option<usize>,
    reaches: Option<Square>,
}

impl PieceQuery {
    #[must_use]
    pub fn new() -> Self {
        PieceQuery::default()
    }

    /// Require a piece kind.
    #[must_use]
    pub fn kind(mut self, kind: PieceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Require a piece color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Require a rank index (0-7).
    #[must_use]
    pub fn rank(mut self, rank: usize) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Require a file index (0-7).
    #[must_use]
    pub fn file(mut self, file: usize) -> Self {
        self.file = Some(file);
        self
    }

    /// Require that the piece can pseudo-legally reach this square.
    #[must_use]
    pub fn reaches(mut self, target: Square) -> Self {
        self.reaches = Some(target);
        self
    }

    fn matches(&self, board: &Board, square: Square, piece: Piece) -> bool {
        if self.kind.is_some_and(|kind| piece.kind != kind) {
            return false;
        }
        if self.color.is_some_and(|color| piece.color != color) {
            return false;
        }
        if self.rank.is_some_and(|rank| square.rank() != rank) {
            return false;
        }
        if self.file.is_some_and(|file| square.file() != file) {
            return false;
        }
        if let Some(target) = self.reaches {
            if !board.pseudo_targets(square).contains(&target) {
                return false;
            }
        }
        true
    }
}
