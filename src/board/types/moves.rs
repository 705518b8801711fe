//! Move representation.
//!
//! A move is one of three shapes: a normal from/to move (captures and the
//! automatic queen promotion included), a castle, or an en passant capture.
//! The original-design subclass hierarchy becomes a tagged enum; apply and
//! undo live on [`Board`](crate::board::Board) as pure functions of the
//! variant payload.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::{Color, Piece, PieceKind};
use super::square::Square;

/// A single half-move.
///
/// Equality and hashing are per-variant: normal moves compare by
/// (color, from, to), castles by (color, kingside), en passant captures by
/// (attacker, target, victim). Moves of different variants never compare
/// equal. The capture flag, payload piece and captured piece do not take
/// part in equality; they are bookkeeping for apply/undo.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Move {
    Normal {
        color: Color,
        from: Square,
        to: Square,
        /// The piece standing on `from` when the move was constructed.
        /// Undo restores this identity, which reverses promotion exactly.
        piece: Piece,
        captured: Option<Piece>,
        is_capture: bool,
    },
    Castle {
        color: Color,
        kingside: bool,
    },
    EnPassant {
        color: Color,
        /// Square of the capturing pawn before the move.
        attacker: Square,
        /// Destination square; empty before the move.
        target: Square,
        /// Square of the captured pawn.
        victim: Square,
    },
}

impl Move {
    /// Construct a normal move; the capture flag follows `captured`.
    #[must_use]
    pub fn normal(
        color: Color,
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
    ) -> Move {
        Move::Normal {
            color,
            from,
            to,
            piece,
            captured,
            is_capture: captured.is_some(),
        }
    }

    #[must_use]
    pub const fn castle(color: Color, kingside: bool) -> Move {
        Move::Castle { color, kingside }
    }

    #[must_use]
    pub const fn en_passant(color: Color, attacker: Square, target: Square, victim: Square) -> Move {
        Move::EnPassant {
            color,
            attacker,
            target,
            victim,
        }
    }

    /// The color making this move.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Color {
        match *self {
            Move::Normal { color, .. }
            | Move::Castle { color, .. }
            | Move::EnPassant { color, .. } => color,
        }
    }

    /// Returns true if this move captures a piece (en passant included).
    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        match *self {
            Move::Normal { is_capture, .. } => is_capture,
            Move::Castle { .. } => false,
            Move::EnPassant { .. } => true,
        }
    }

    /// The origin square of the moving piece, if the variant has one.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Option<Square> {
        match *self {
            Move::Normal { from, .. } => Some(from),
            Move::Castle { .. } => None,
            Move::EnPassant { attacker, .. } => Some(attacker),
        }
    }

    /// The destination square of the moving piece, if the variant has one.
    #[inline]
    #[must_use]
    pub const fn destination(&self) -> Option<Square> {
        match *self {
            Move::Normal { to, .. } => Some(to),
            Move::Castle { .. } => None,
            Move::EnPassant { target, .. } => Some(target),
        }
    }

    /// The square a double pawn push skips over, if this is one.
    #[must_use]
    pub(crate) fn double_push_target(&self) -> Option<Square> {
        match *self {
            Move::Normal {
                from, to, piece, ..
            } if piece.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 => {
                Some(Square::new(usize::midpoint(from.rank(), to.rank()), from.file()))
            }
            _ => None,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Move::Normal {
                    color: c1,
                    from: f1,
                    to: t1,
                    ..
                },
                Move::Normal {
                    color: c2,
                    from: f2,
                    to: t2,
                    ..
                },
            ) => c1 == c2 && f1 == f2 && t1 == t2,
            (
                Move::Castle {
                    color: c1,
                    kingside: k1,
                },
                Move::Castle {
                    color: c2,
                    kingside: k2,
                },
            ) => c1 == c2 && k1 == k2,
            (
                Move::EnPassant {
                    attacker: a1,
                    target: t1,
                    victim: v1,
                    ..
                },
                Move::EnPassant {
                    attacker: a2,
                    target: t2,
                    victim: v2,
                    ..
                },
            ) => a1 == a2 && t1 == t2 && v1 == v2,
            _ => false,
        }
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        mem::discriminant(self).hash(state);
        match *self {
            Move::Normal {
                color, from, to, ..
            } => {
                color.hash(state);
                from.hash(state);
                to.hash(state);
            }
            Move::Castle { color, kingside } => {
                color.hash(state);
                kingside.hash(state);
            }
            Move::EnPassant {
                attacker,
                target,
                victim,
                ..
            } => {
                attacker.hash(state);
                target.hash(state);
                victim.hash(state);
            }
        }
    }
}

impl fmt::Display for Move {
    /// Canonical notation. Normal moves always carry the origin file
    /// (`Ngf3`, `ee4`, `exd5`); castles render `O-O`/`O-O-O`; en passant
    /// renders as a pawn capture.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                from,
                to,
                piece,
                is_capture,
                ..
            } => {
                if piece.kind != PieceKind::Pawn {
                    write!(f, "{}", piece.kind.symbol())?;
                }
                write!(f, "{}", from.file_char())?;
                if is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{to}")
            }
            Move::Castle { kingside, .. } => {
                write!(f, "{}", if kingside { "O-O" } else { "O-O-O" })
            }
            Move::EnPassant {
                attacker, target, ..
            } => write!(f, "{}x{}", attacker.file_char(), target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn sq(notation: &str) -> Square {
        notation.parse().unwrap()
    }

    fn white_pawn() -> Piece {
        Piece::new(PieceKind::Pawn, Color::White)
    }

    #[test]
    fn test_normal_equality_ignores_payload() {
        let plain = Move::normal(Color::White, sq("e2"), sq("e4"), white_pawn(), None);
        let with_capture = Move::normal(
            Color::White,
            sq("e2"),
            sq("e4"),
            white_pawn(),
            Some(Piece::new(PieceKind::Knight, Color::Black)),
        );
        assert_eq!(plain, with_capture);

        let other_square = Move::normal(Color::White, sq("e2"), sq("e3"), white_pawn(), None);
        assert_ne!(plain, other_square);
        let other_color = Move::normal(Color::Black, sq("e2"), sq("e4"), white_pawn(), None);
        assert_ne!(plain, other_color);
    }

    #[test]
    fn test_cross_variant_inequality() {
        let normal = Move::normal(Color::White, sq("e1"), sq("g1"), white_pawn(), None);
        let castle = Move::castle(Color::White, true);
        let ep = Move::en_passant(Color::White, sq("e5"), sq("d6"), sq("d5"));
        assert_ne!(normal, castle);
        assert_ne!(castle, ep);
        assert_ne!(normal, ep);
    }

    #[test]
    fn test_hash_follows_equality() {
        let mut set = HashSet::new();
        set.insert(Move::normal(Color::White, sq("e2"), sq("e4"), white_pawn(), None));
        assert!(set.contains(&Move::normal(
            Color::White,
            sq("e2"),
            sq("e4"),
            white_pawn(),
            Some(Piece::new(PieceKind::Queen, Color::Black)),
        )));

        set.insert(Move::castle(Color::Black, false));
        assert!(set.contains(&Move::castle(Color::Black, false)));
        assert!(!set.contains(&Move::castle(Color::Black, true)));
    }

    #[test]
    fn test_double_push_target() {
        let push = Move::normal(Color::White, sq("e2"), sq("e4"), white_pawn(), None);
        assert_eq!(push.double_push_target(), Some(sq("e3")));

        let single = Move::normal(Color::White, sq("e2"), sq("e3"), white_pawn(), None);
        assert_eq!(single.double_push_target(), None);

        let black = Move::normal(
            Color::Black,
            sq("d7"),
            sq("d5"),
            Piece::new(PieceKind::Pawn, Color::Black),
            None,
        );
        assert_eq!(black.double_push_target(), Some(sq("d6")));
    }

    #[test]
    fn test_display_notation() {
        let pawn_push = Move::normal(Color::White, sq("e2"), sq("e4"), white_pawn(), None);
        assert_eq!(pawn_push.to_string(), "ee4");

        let knight = Move::normal(
            Color::White,
            sq("g1"),
            sq("f3"),
            Piece::new(PieceKind::Knight, Color::White),
            None,
        );
        assert_eq!(knight.to_string(), "Ngf3");

        let capture = Move::normal(
            Color::White,
            sq("e4"),
            sq("d5"),
            white_pawn(),
            Some(Piece::new(PieceKind::Pawn, Color::Black)),
        );
        assert_eq!(capture.to_string(), "exd5");

        assert_eq!(Move::castle(Color::White, true).to_string(), "O-O");
        assert_eq!(Move::castle(Color::Black, false).to_string(), "O-O-O");

        let ep = Move::en_passant(Color::White, sq("e5"), sq("d6"), sq("d5"));
        assert_eq!(ep.to_string(), "exd6");
    }
}
