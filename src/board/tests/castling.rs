//! Castle admission and castling-rights revocation.

use crate::board::{Color, Game, Move, PieceKind, Square};

fn sq(notation: &str) -> Square {
    notation.parse().unwrap()
}

#[test]
fn test_kingside_castle_after_opening_sequence() {
    let mut game = Game::new();
    for san in ["e4", "e5", "Nf3", "a5", "Be2", "b5"] {
        game.apply_san(san).unwrap();
    }

    let castle = Move::castle(Color::White, true);
    assert!(game.legal_moves().contains(&castle));

    game.apply_move(castle);
    assert_eq!(
        game.board().occupant(sq("g1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        game.board().occupant(sq("f1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(game.board().occupant(sq("e1")), None);
    assert_eq!(game.board().occupant(sq("h1")), None);
    assert!(!game.castling_rights().has(Color::White, true));
    assert!(!game.castling_rights().has(Color::White, false));
}

#[test]
fn test_queenside_castle_movement() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let castle = Move::castle(Color::Black, false);
    assert!(game.legal_moves().contains(&castle));

    game.apply_move(castle);
    assert_eq!(
        game.board().occupant(sq("c8")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        game.board().occupant(sq("d8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(game.board().occupant(sq("a8")), None);
}

#[test]
fn test_cannot_castle_without_right() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w Qkq - 0 1");
    assert!(!game.can_castle(Color::White, true));
    assert!(game.can_castle(Color::White, false));
}

#[test]
fn test_cannot_castle_when_obstructed() {
    // bishops still on their home squares
    let mut game = Game::from_fen("r3kb1r/8/8/8/8/8/8/R3KB1R w KQkq - 0 1");
    assert!(!game.can_castle(Color::White, true));
    assert!(game.can_castle(Color::White, false));
    assert!(!game.can_castle(Color::Black, true));
    assert!(game.can_castle(Color::Black, false));
}

#[test]
fn test_cannot_castle_out_of_check() {
    // black rook pins the white king on the e-file
    let mut game = Game::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1");
    assert!(game.is_in_check(Color::White));
    assert!(!game.can_castle(Color::White, true));
    assert!(!game.can_castle(Color::White, false));
}

#[test]
fn test_cannot_castle_through_attacked_square() {
    // black rook controls f1, crossed by the kingside king walk
    let mut game = Game::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!game.can_castle(Color::White, true));
    assert!(game.can_castle(Color::White, false));
}

#[test]
fn test_cannot_castle_into_attacked_square() {
    // black rook controls g1, the kingside landing square
    let mut game = Game::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(!game.can_castle(Color::White, true));
    assert!(game.can_castle(Color::White, false));
}

#[test]
fn test_queenside_b_file_attack_does_not_block() {
    // black rook controls only b1, which the king never crosses
    let mut game = Game::from_fen("1r2k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(game.can_castle(Color::White, false));
}

#[test]
fn test_king_move_revokes_both_rights() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    game.apply_san("Ke2").unwrap();
    assert!(!game.castling_rights().has(Color::White, true));
    assert!(!game.castling_rights().has(Color::White, false));
    assert!(game.castling_rights().has(Color::Black, true));
    assert!(game.castling_rights().has(Color::Black, false));
}

#[test]
fn test_rook_move_revokes_one_right() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    game.apply_san("Rab1").unwrap();
    assert!(game.castling_rights().has(Color::White, true));
    assert!(!game.castling_rights().has(Color::White, false));
}

#[test]
fn test_rook_capture_revokes_opponent_right() {
    // white rook takes the h8 rook; black loses the kingside right
    let mut game = Game::from_fen("r3k2r/7R/8/8/8/8/8/R3K3 w Qkq - 0 1");
    let capture = game
        .legal_moves()
        .into_iter()
        .find(|m| m.destination() == Some(sq("h8")))
        .expect("Rxh8 should be legal");
    game.apply_move(capture);
    assert!(!game.castling_rights().has(Color::Black, true));
    assert!(game.castling_rights().has(Color::Black, false));
}

#[test]
fn test_castle_unavailable_at_start() {
    let mut game = Game::new();
    assert!(!game.can_castle(Color::White, true));
    assert!(!game.can_castle(Color::White, false));
    assert!(!game.can_castle(Color::Black, true));
    assert!(!game.can_castle(Color::Black, false));
}
