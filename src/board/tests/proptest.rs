//! Property-based tests using proptest.

use crate::board::{Color, Game, PieceKind, PieceQuery};
use proptest::prelude::*;

/// Strategy for the length of a random legal move sequence.
fn move_count_strategy() -> impl Strategy<Value = usize> {
    1..=20usize
}

/// Strategy for the seed driving move selection.
fn seed_strategy() -> impl Strategy<Value = u64> {
    any::<u64>()
}

/// Play `num_moves` random legal moves, stopping early at a finished game.
fn random_playout(game: &mut Game, seed: u64, num_moves: usize) -> usize {
    use rand::prelude::*;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut applied = 0;
    for _ in 0..num_moves {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        game.apply_move(mv);
        applied += 1;
    }
    applied
}

proptest! {
    /// Property: applying then undoing a whole playout restores the game exactly.
    #[test]
    fn prop_apply_undo_restores_state(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut game = Game::new();
        let initial_fen = game.to_fen();

        let applied = random_playout(&mut game, seed, num_moves);
        for _ in 0..applied {
            game.undo_move().unwrap();
        }

        prop_assert_eq!(game.to_fen(), initial_fen);
        prop_assert_eq!(game.side_to_move(), Color::White);
        prop_assert_eq!(game.history().len(), 0);
    }

    /// Property: FEN round-trips preserve the position.
    #[test]
    fn prop_fen_roundtrip(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut game = Game::new();
        random_playout(&mut game, seed, num_moves);

        let fen = game.to_fen();
        let restored = Game::from_fen(&fen);

        prop_assert_eq!(game.board(), restored.board());
        prop_assert_eq!(game.side_to_move(), restored.side_to_move());
        prop_assert_eq!(game.castling_rights(), restored.castling_rights());
        prop_assert_eq!(game.en_passant_target(), restored.en_passant_target());
    }

    /// Property: no legal move leaves its mover in check.
    #[test]
    fn prop_legal_moves_are_legal(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut game = Game::new();
        random_playout(&mut game, seed, num_moves);

        let side = game.side_to_move();
        for mv in game.legal_moves() {
            game.apply_move(mv);
            prop_assert!(!game.is_in_check(side), "legal move left the king in check: {}", mv);
            game.undo_move().unwrap();
        }
    }

    /// Property: every legal move belongs to the side to move and starts on
    /// one of its pieces.
    #[test]
    fn prop_legal_moves_carry_the_mover(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut game = Game::new();
        random_playout(&mut game, seed, num_moves);

        let side = game.side_to_move();
        for mv in game.legal_moves() {
            prop_assert_eq!(mv.color(), side);
            if let Some(from) = mv.origin() {
                let mover = game.board().occupant(from);
                prop_assert!(mover.is_some_and(|p| p.color == side));
            }
        }
    }

    /// Property: a legal playout never breaks the material invariants.
    #[test]
    fn prop_piece_invariants_hold(seed in seed_strategy(), num_moves in move_count_strategy()) {
        let mut game = Game::new();
        random_playout(&mut game, seed, num_moves);

        prop_assert!(game.board().occupied().count() <= 32);
        for color in [Color::White, Color::Black] {
            let kings = game.board().find(PieceQuery::new().kind(PieceKind::King).color(color));
            prop_assert_eq!(kings.len(), 1);
        }
    }
}
