// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end properties of the legal move generator, exercised through
//! the public crate API.
use athena::{Analysis, Color, MoveGenerator, MoveVec, PieceKind, Position};

static INTERESTING_POSITIONS: [&str; 6] = [
    // the starting position
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    // kiwipete: castles, pins, promotions, en passant
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    // rook endgame with a live en-passant threat
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    // black in check with promotions available
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
    // promotion race
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    // en-passant capture is the only sensible move
    "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
];

fn generate(pos: &mut Position) -> MoveVec {
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(pos, &mut moves);
    moves
}

fn same_board(a: &Position, b: &Position) -> bool {
    for &color in &[Color::White, Color::Black] {
        for &kind in &[
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
            PieceKind::King,
        ] {
            if a.pieces_of_kind(color, kind) != b.pieces_of_kind(color, kind) {
                return false;
            }
        }
    }

    a.castle_status() == b.castle_status() && a.en_passant_square() == b.en_passant_square()
}

#[test]
fn make_unmake_round_trips_every_generated_move() {
    for &fen in &INTERESTING_POSITIONS {
        let original = Position::from_fen(fen).unwrap();
        let mut pos = original.clone();
        for mov in generate(&mut pos) {
            pos.make(mov);
            pos.unmake(mov);
            assert!(
                same_board(&original, &pos),
                "make/unmake of `{}` corrupted `{}`",
                mov,
                fen
            );
        }
    }
}

#[test]
fn no_generated_move_leaves_the_king_in_check() {
    // Walk every position reachable from the start within three plies
    // and verify that making any generated move never leaves the moving
    // side's own king attacked.
    fn walk(pos: &mut Position, plies_left: u32) {
        let side = pos.side_to_move();
        for mov in generate(pos) {
            pos.make(mov);
            assert!(
                !pos.is_check(side),
                "move `{}` left its own king in check",
                mov
            );
            if plies_left > 1 {
                pos.toggle_side_to_move();
                walk(pos, plies_left - 1);
                pos.toggle_side_to_move();
            }
            pos.unmake(mov);
        }
    }

    let mut pos = Position::from_start_position();
    walk(&mut pos, 3);
}

#[test]
fn check_count_agrees_with_is_check() {
    let fens = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", false),
        ("8/8/8/8/8/1p6/2K5/8 w - - 0 1", true),
        ("8/8/8/6b1/5n2/8/3K4/8 w - - 0 1", false),
        ("8/8/8/3q4/8/3P4/3K4/8 w - - 0 1", false),
        ("8/8/8/3r4/8/8/3K4/8 w - - 0 1", true),
        ("8/8/8/3q4/8/5n2/3K4/8 w - - 0 1", true),
    ];

    for &(fen, expected) in &fens {
        let pos = Position::from_fen(fen).unwrap();
        let side = pos.side_to_move();
        let analysis = Analysis::new(&pos, side);
        assert_eq!(expected, pos.is_check(side), "is_check mismatch for {}", fen);
        assert_eq!(
            expected,
            analysis.check_count() >= 1,
            "check count mismatch for {}",
            fen
        );
    }
}

#[test]
fn double_check_only_ever_moves_the_king() {
    let fens = [
        "8/8/8/3q4/8/5n2/3K4/8 w - - 0 1",
        // double check: rook and bishop both bear on e8
        "4k3/8/8/7B/4R3/8/8/4K3 b - - 0 1",
    ];

    for &fen in &fens {
        let mut pos = Position::from_fen(fen).unwrap();
        let side = pos.side_to_move();
        let analysis = Analysis::new(&pos, side);
        if analysis.check_count() == 2 {
            for mov in generate(&mut pos) {
                assert_eq!(
                    PieceKind::King,
                    mov.piece().kind,
                    "non-king move `{}` generated under double check",
                    mov
                );
            }
        }
    }
}

#[test]
fn checkmate_and_stalemate_are_distinguished() {
    // Mated: in check with no moves.
    let mut mated = Position::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    assert!(generate(&mut mated).is_empty());
    assert!(mated.is_check(Color::White));

    // Stalemated: no moves but also no check.
    let mut stale = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(generate(&mut stale).is_empty());
    assert!(!stale.is_check(Color::Black));
}

#[test]
fn en_passant_capture_empties_both_fifth_rank_squares() {
    // After the en-passant capture is made, the capturing pawn sits on
    // d6 and both fifth-rank squares are empty.
    let mut pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let moves = generate(&mut pos);
    let ep = moves
        .iter()
        .find(|m| m.captured_piece() == Some(PieceKind::Pawn) && m.destination().to_string() == "d6")
        .copied()
        .expect("en-passant capture must be generated");

    pos.make(ep);
    assert_eq!(PieceKind::Pawn, pos.piece_at(athena::Square::D6).unwrap().kind);
    assert!(pos.piece_at(athena::Square::D5).is_none());
    assert!(pos.piece_at(athena::Square::E5).is_none());
}
