//! Error types for rule-engine operations.

use std::fmt;

use super::types::Color;

/// Error type for square parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// Invalid algebraic notation
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for FEN parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string has too few fields (needs at least 4)
    TooFewParts { found: usize },
    /// Placement does not describe exactly 8 ranks
    BadRankCount { found: usize },
    /// A rank's files do not sum to 8
    BadRankWidth { rank: usize, files: usize },
    /// Invalid piece character in the placement string
    InvalidPiece { symbol: char },
    /// Invalid castling character
    InvalidCastling { symbol: char },
    /// Invalid side to move (must be 'w' or 'b')
    InvalidSideToMove { found: String },
    /// Invalid en passant square
    InvalidEnPassant { found: String },
    /// The placement does not contain exactly one king of this color
    BadKingCount { color: Color, found: usize },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::TooFewParts { found } => {
                write!(f, "FEN must have at least 4 fields, found {found}")
            }
            FenError::BadRankCount { found } => {
                write!(f, "FEN placement must have 8 ranks, found {found}")
            }
            FenError::BadRankWidth { rank, files } => {
                write!(f, "Rank {rank} of FEN placement describes {files} files")
            }
            FenError::InvalidPiece { symbol } => {
                write!(f, "Invalid piece character '{symbol}' in FEN")
            }
            FenError::InvalidCastling { symbol } => {
                write!(f, "Invalid castling character '{symbol}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::InvalidEnPassant { found } => {
                write!(f, "Invalid en passant square '{found}'")
            }
            FenError::BadKingCount { color, found } => {
                write!(f, "FEN placement has {found} {color} kings, expected 1")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for SAN parsing and application failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    /// Empty SAN string
    Empty,
    /// Invalid piece letter
    InvalidPiece { symbol: char },
    /// Invalid destination square
    InvalidSquare { notation: String },
    /// Ambiguous move (multiple pieces can reach the destination)
    Ambiguous { notation: String },
    /// No piece of the moving side can make this move
    NoMatch { notation: String },
    /// The move parsed but is not legal in the current position
    Illegal { notation: String },
}

impl fmt::Display for SanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SanError::Empty => write!(f, "Empty move string"),
            SanError::InvalidPiece { symbol } => {
                write!(f, "Invalid piece letter '{symbol}'")
            }
            SanError::InvalidSquare { notation } => {
                write!(f, "Invalid square in '{notation}'")
            }
            SanError::Ambiguous { notation } => {
                write!(f, "Ambiguous move '{notation}'")
            }
            SanError::NoMatch { notation } => {
                write!(f, "No piece can play '{notation}'")
            }
            SanError::Illegal { notation } => {
                write!(f, "Illegal move '{notation}'")
            }
        }
    }
}

impl std::error::Error for SanError {}

/// Caller bugs against the game state; these indicate misuse, not bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Undo was requested with no moves in the history
    EmptyHistory,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateError::EmptyHistory => write!(f, "No move to undo"),
        }
    }
}

impl std::error::Error for StateError {}
