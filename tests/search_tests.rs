// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! End-to-end search behavior through the public API.
use athena::eval::{BoardEvaluator, PieceSquareEvaluator};
use athena::search::Searcher;
use athena::{Position, Square};

#[test]
fn search_reports_a_move_from_the_start_position() {
    let mut pos = Position::from_start_position();
    let mut searcher: Searcher<PieceSquareEvaluator> = Searcher::new(3);
    let result = searcher.search(&mut pos);

    assert!(result.best_move.is_some());
    assert!(result.nodes_searched > 400);

    // search must hand the position back untouched; the move clocks are
    // not restored by unmake and are excluded from the comparison.
    assert_eq!(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        reversible_fields(&pos.as_fen())
    );
}

/// The first four FEN fields: placement, side to move, castling rights,
/// and the en-passant target. The clocks are irreversible by design.
fn reversible_fields(fen: &str) -> String {
    fen.split(' ').take(4).collect::<Vec<_>>().join(" ")
}

#[test]
fn deeper_search_prefers_the_faster_mate() {
    // White has a mate in one; even searching deeper, the shallower
    // mate's depth bias must win out over dawdling lines.
    let mut pos = Position::from_fen("6k1/8/6K1/8/8/8/8/4Q3 w - - 0 1").unwrap();
    let mut searcher: Searcher<PieceSquareEvaluator> = Searcher::new(4);
    let result = searcher.search(&mut pos);

    let best = result.best_move.expect("a best move should exist");
    assert_eq!(Square::E1, best.source());
    assert_eq!(Square::E8, best.destination());
    assert!((result.score - 9.99).abs() < 1e-9);
}

#[test]
fn principal_variation_is_traced_per_depth() {
    let mut pos = Position::from_start_position();
    let mut searcher: Searcher<PieceSquareEvaluator> = Searcher::new(2);
    searcher.search(&mut pos);

    let pv = searcher.principal_variation();
    assert_eq!(2, pv.len());
    assert!(pv[0].is_some());
    assert!(pv[1].is_some());
}

#[test]
fn evaluator_contract_is_white_positive() {
    let eval = PieceSquareEvaluator::new();
    let white_ahead = Position::from_fen("4k3/8/8/8/8/8/8/QQQQK3 w - - 0 1").unwrap();
    let black_ahead = Position::from_fen("qqqqk3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    assert!(eval.evaluate(&white_ahead) > 0.0);
    assert!(eval.evaluate(&black_ahead) < 0.0);
}

#[test]
fn terminal_positions_score_correctly_from_the_root() {
    // Checkmate: the mated side to move loses at the full mate score.
    let mut mated = Position::from_fen(
        "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
    )
    .unwrap();
    let mut searcher: Searcher<PieceSquareEvaluator> = Searcher::new(2);
    let result = searcher.search(&mut mated);
    assert!(result.best_move.is_none());
    assert!(result.score <= -10.0 + 1e-9);

    // Stalemate: dead draw.
    let mut stale = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let result = searcher.search(&mut stale);
    assert!(result.best_move.is_none());
    assert_eq!(0.0, result.score);
}
