//! Move selection policies.
//!
//! The engine core does not decide moves; it only enumerates them. The one
//! policy in scope is uniform-random selection, behind a trait so callers
//! can plug in their own.

use rand::prelude::*;

use crate::board::{Game, Move};

/// A policy that picks one of the legal moves in a position.
pub trait MoveSelector {
    /// Choose a move for the side to move, or `None` when there is none.
    fn select(&mut self, game: &mut Game) -> Option<Move>;
}

/// Uniform-random choice among the legal moves.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    #[must_use]
    pub fn new() -> Self {
        RandomSelector {
            rng: StdRng::from_entropy(),
        }
    }

    /// A selector with a fixed seed, for reproducible games.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        RandomSelector {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomSelector {
    fn default() -> Self {
        RandomSelector::new()
    }
}

impl MoveSelector for RandomSelector {
    fn select(&mut self, game: &mut Game) -> Option<Move> {
        let moves = game.legal_moves();
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..moves.len());
        Some(moves[idx])
    }
}
