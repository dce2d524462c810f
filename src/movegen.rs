// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The legal move generator. Generation branches on the check count
//! reported by the analyzer:
//!
//! * **Double check** — only the king may move. Generate king evasions
//!   and return.
//! * **Single check** — king evasions, plus non-king moves restricted to
//!   capturing the checker or landing on the blocking ray between the
//!   checker and the king.
//! * **No check** — full generation for every piece, plus castling.
//!
//! In every branch, the destinations of a pinned piece are intersected
//! with its pin ray, so pinned pieces slide along the line of the pin
//! (and may capture the pinner) but never expose the king.
//!
//! En-passant captures are the one case that is validated by actually
//! playing the move: the capture removes a pawn from a square other than
//! the destination and can uncover a horizontal attack no pin scan
//! models, so each candidate is made, the king probed for check, and the
//! move unmade. This is the only place generation calls into move
//! application.
use arrayvec::ArrayVec;

use crate::analysis::Analysis;
use crate::attacks;
use crate::bitboard::{Bitboard, BB_RANK_1, BB_RANK_2, BB_RANK_7, BB_RANK_8};
use crate::moves::Move;
use crate::position::{self, Position};
use crate::types::{Color, Direction, Piece, PieceKind, Square};

/// A fixed-capacity list of moves. No legal chess position has more than
/// 256 moves, so the capacity is never exceeded in practice.
pub type MoveVec = ArrayVec<[Move; 256]>;

static PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Queen,
];

pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates the complete set of legal moves for the side to move.
    /// The position is borrowed mutably only so that en-passant
    /// candidates can be speculatively applied and reverted; it is
    /// returned to its original state before this function returns.
    pub fn generate_moves(&self, pos: &mut Position, moves: &mut MoveVec) {
        let us = pos.side_to_move();
        let analysis = Analysis::new(pos, us);

        match analysis.check_count() {
            2 => {
                // Nothing but the king can resolve a double check.
                self.king_moves(pos, &analysis, moves);
            }
            1 => {
                // Capture the checker, block its ray, or step the king
                // away. Knight and pawn checks have an empty blocking
                // ray, which leaves capture and evasion.
                let capture_mask = analysis.checkers();
                let push_mask = analysis.check_ray();
                self.pawn_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.knight_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.sliding_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.king_moves(pos, &analysis, moves);
            }
            _ => {
                let capture_mask = pos.pieces(us.toggle());
                let push_mask = !pos.all_pieces();
                self.pawn_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.knight_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.sliding_moves(pos, &analysis, capture_mask, push_mask, moves);
                self.king_moves(pos, &analysis, moves);
                self.castle_moves(pos, &analysis, moves);
            }
        }
    }

    fn pawn_moves(
        &self,
        pos: &mut Position,
        analysis: &Analysis,
        capture_mask: Bitboard,
        push_mask: Bitboard,
        moves: &mut MoveVec,
    ) {
        let us = pos.side_to_move();
        let them = us.toggle();
        let occupancy = pos.all_pieces();
        let piece = Piece::new(PieceKind::Pawn, us);
        let (ahead, start_rank, promo_rank) = match us {
            Color::White => (Direction::North, BB_RANK_2, BB_RANK_8),
            Color::Black => (Direction::South, BB_RANK_7, BB_RANK_1),
        };

        for pawn in pos.pawns(us) {
            let allowed = analysis.pin_ray(pawn);

            // Pushes. The single-step square must be empty for either
            // push; the double push additionally needs an empty landing
            // square and a pawn still on its starting rank.
            let ahead_one = pawn.towards(ahead);
            if !occupancy.contains(ahead_one) {
                if (push_mask & allowed).contains(ahead_one) {
                    if promo_rank.contains(ahead_one) {
                        for &promoted in &PROMOTION_KINDS {
                            moves.push(Move::promotion(pos, piece, pawn, ahead_one, promoted));
                        }
                    } else {
                        moves.push(Move::normal(pos, piece, pawn, ahead_one));
                    }
                }

                if start_rank.contains(pawn) {
                    let ahead_two = ahead_one.towards(ahead);
                    if !occupancy.contains(ahead_two) && (push_mask & allowed).contains(ahead_two) {
                        moves.push(Move::double_push(pos, piece, pawn, ahead_two));
                    }
                }
            }

            // Ordinary diagonal captures, promoting on the last rank.
            let targets = attacks::pawn_attacks(pawn, us) & capture_mask & allowed;
            for target in targets {
                let captured = pos
                    .piece_at(target)
                    .expect("pawn capture target is empty")
                    .kind;
                if promo_rank.contains(target) {
                    for &promoted in &PROMOTION_KINDS {
                        moves.push(Move::promotion_capture(
                            pos, piece, pawn, target, promoted, captured,
                        ));
                    }
                } else {
                    moves.push(Move::capture(pos, piece, pawn, target, captured));
                }
            }
        }

        // En passant. Candidates are any of our pawns attacking the
        // target square; each one is validated by playing it out and
        // probing for check, which covers the uncovered-rook edge case
        // as well as every in-check situation.
        if let Some(ep_square) = pos.en_passant_square() {
            for pawn in attacks::pawn_attacks(ep_square, them) & pos.pawns(us) {
                let mov = Move::en_passant(pos, piece, pawn, ep_square);
                pos.make(mov);
                let leaves_king_safe = !pos.is_check(us);
                pos.unmake(mov);
                if leaves_king_safe {
                    moves.push(mov);
                }
            }
        }
    }

    fn knight_moves(
        &self,
        pos: &Position,
        analysis: &Analysis,
        capture_mask: Bitboard,
        push_mask: Bitboard,
        moves: &mut MoveVec,
    ) {
        let us = pos.side_to_move();
        let piece = Piece::new(PieceKind::Knight, us);
        for knight in pos.knights(us) {
            // A knight's moves all leave the line of any pin, so a
            // pinned knight simply never moves.
            let targets = attacks::knight_attacks(knight) & analysis.pin_ray(knight);
            self.push_piece_moves(pos, piece, knight, targets, capture_mask, push_mask, moves);
        }
    }

    fn sliding_moves(
        &self,
        pos: &Position,
        analysis: &Analysis,
        capture_mask: Bitboard,
        push_mask: Bitboard,
        moves: &mut MoveVec,
    ) {
        let us = pos.side_to_move();
        let occupancy = pos.all_pieces();

        for bishop in pos.bishops(us) {
            let targets = attacks::bishop_attacks(bishop, occupancy) & analysis.pin_ray(bishop);
            let piece = Piece::new(PieceKind::Bishop, us);
            self.push_piece_moves(pos, piece, bishop, targets, capture_mask, push_mask, moves);
        }

        for rook in pos.rooks(us) {
            let targets = attacks::rook_attacks(rook, occupancy) & analysis.pin_ray(rook);
            let piece = Piece::new(PieceKind::Rook, us);
            self.push_piece_moves(pos, piece, rook, targets, capture_mask, push_mask, moves);
        }

        for queen in pos.queens(us) {
            let targets = attacks::queen_attacks(queen, occupancy) & analysis.pin_ray(queen);
            let piece = Piece::new(PieceKind::Queen, us);
            self.push_piece_moves(pos, piece, queen, targets, capture_mask, push_mask, moves);
        }
    }

    fn push_piece_moves(
        &self,
        pos: &Position,
        piece: Piece,
        source: Square,
        targets: Bitboard,
        capture_mask: Bitboard,
        push_mask: Bitboard,
        moves: &mut MoveVec,
    ) {
        for target in targets & capture_mask {
            let captured = pos
                .piece_at(target)
                .expect("capture target is empty")
                .kind;
            moves.push(Move::capture(pos, piece, source, target, captured));
        }

        for target in targets & push_mask {
            moves.push(Move::normal(pos, piece, source, target));
        }
    }

    fn king_moves(&self, pos: &Position, analysis: &Analysis, moves: &mut MoveVec) {
        let us = pos.side_to_move();
        let enemies = pos.pieces(us.toggle());
        let king = analysis.king();
        let piece = Piece::new(PieceKind::King, us);

        let targets =
            attacks::king_attacks(king) & !pos.pieces(us) & !analysis.danger_squares();
        for target in targets {
            if enemies.contains(target) {
                let captured = pos
                    .piece_at(target)
                    .expect("king capture target is empty")
                    .kind;
                moves.push(Move::capture(pos, piece, king, target, captured));
            } else {
                moves.push(Move::normal(pos, piece, king, target));
            }
        }
    }

    // Only called when the king is not in check. Each castle requires
    // the rights flag, the rook at home, empty squares between king and
    // rook, and unattacked transit squares for the king. The queenside
    // knight square is crossed by the rook alone, so it must only be
    // empty.
    fn castle_moves(&self, pos: &Position, analysis: &Analysis, moves: &mut MoveVec) {
        let us = pos.side_to_move();
        let king = analysis.king();
        let home = match us {
            Color::White => Square::E1,
            Color::Black => Square::E8,
        };
        if king != home {
            // Castle rights without the king at home come from corrupt
            // FEN input; never attempt the move.
            return;
        }

        let occupancy = pos.all_pieces();
        let danger = analysis.danger_squares();
        let piece = Piece::new(PieceKind::King, us);

        if pos.can_castle_kingside(us) && pos.rooks(us).contains(position::kingside_rook(us)) {
            let one = king.towards(Direction::East);
            let two = one.towards(Direction::East);
            if !occupancy.contains(one)
                && !occupancy.contains(two)
                && !danger.contains(one)
                && !danger.contains(two)
            {
                moves.push(Move::kingside_castle(pos, piece, king, two));
            }
        }

        if pos.can_castle_queenside(us) && pos.rooks(us).contains(position::queenside_rook(us)) {
            let one = king.towards(Direction::West);
            let two = one.towards(Direction::West);
            let three = two.towards(Direction::West);
            if !occupancy.contains(one)
                && !occupancy.contains(two)
                && !occupancy.contains(three)
                && !danger.contains(one)
                && !danger.contains(two)
            {
                moves.push(Move::queenside_castle(pos, piece, king, two));
            }
        }
    }
}

impl Default for MoveGenerator {
    fn default() -> MoveGenerator {
        MoveGenerator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{MoveGenerator, MoveVec};
    use crate::moves::MoveKind;
    use crate::position::Position;
    use crate::types::{PieceKind, Square};

    fn generate(fen: &str) -> MoveVec {
        let mut pos = Position::from_fen(fen).unwrap();
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(&mut pos, &mut moves);
        moves
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let moves = generate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(20, moves.len());

        let pushes = moves
            .iter()
            .filter(|m| m.kind() == MoveKind::Normal)
            .count();
        let double_pushes = moves
            .iter()
            .filter(|m| match m.kind() {
                MoveKind::DoublePush { .. } => true,
                _ => false,
            })
            .count();
        assert_eq!(12, pushes); // 8 single pawn pushes + 4 knight moves
        assert_eq!(8, double_pushes);
    }

    #[test]
    fn kiwipete_has_forty_eight_moves() {
        let moves =
            generate("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(48, moves.len());
    }

    #[test]
    fn double_check_generates_only_king_moves() {
        let moves = generate("8/8/8/3q4/8/5n2/3K4/8 w - - 0 1");
        assert!(!moves.is_empty());
        for mov in &moves {
            assert_eq!(PieceKind::King, mov.piece().kind);
        }
    }

    #[test]
    fn rook_check_offers_only_evasions() {
        // No friendly piece can block or capture; the king must step off
        // the file, and the squares behind it on the ray stay forbidden.
        let moves = generate("4r3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(4, moves.len());
        for mov in &moves {
            assert_eq!(PieceKind::King, mov.piece().kind);
            assert_ne!(crate::types::File::E, mov.destination().file());
        }
    }

    #[test]
    fn check_can_be_blocked_or_checker_captured() {
        // The rook on a5 checks along the fifth rank; the bishop can
        // capture the checker and the knight can block the ray.
        let moves = generate("7k/8/1B6/r3K3/8/2N5/8/8 w - - 0 1");
        let capture = moves.iter().any(|m| {
            m.piece().kind == PieceKind::Bishop && m.destination() == Square::A5 && m.is_capture()
        });
        let blocks: Vec<_> = moves
            .iter()
            .filter(|m| m.piece().kind == PieceKind::Knight)
            .collect();
        assert!(capture, "bishop should be able to capture the checker");
        assert_eq!(2, blocks.len(), "knight should block on b5 and d5");
        assert!(blocks
            .iter()
            .all(|m| m.destination() == Square::B5 || m.destination() == Square::D5));
    }

    #[test]
    fn checkmate_generates_no_moves() {
        // Fool's mate.
        let moves = generate("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(moves.is_empty());
    }

    #[test]
    fn stalemate_generates_no_moves() {
        let moves = generate("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn back_rank_mate_generates_no_moves() {
        // The rook checks along the eighth rank; the king's own pawns
        // box it in, and h8 stays forbidden because the rook's ray is
        // traced with the king lifted off the board.
        let moves = generate("R5k1/5ppp/8/8/8/8/8/7K b - - 0 1");
        assert!(moves.is_empty());
    }

    #[test]
    fn pinned_rook_slides_along_the_pin() {
        let moves = generate("3q4/8/8/8/8/3R4/3K4/8 w - - 0 1");
        let rook_moves: Vec<_> = moves
            .iter()
            .filter(|m| m.piece().kind == PieceKind::Rook)
            .collect();

        // Up the file, including the capture of the pinning queen, but
        // never sideways off the pin ray.
        assert_eq!(5, rook_moves.len());
        assert!(rook_moves
            .iter()
            .all(|m| m.destination().file() == crate::types::File::D));
        assert!(rook_moves
            .iter()
            .any(|m| m.destination() == Square::D8 && m.is_capture()));
    }

    #[test]
    fn pinned_knight_never_moves() {
        let moves = generate("3q4/8/8/8/8/3N4/3K4/8 w - - 0 1");
        assert!(moves.iter().all(|m| m.piece().kind != PieceKind::Knight));
    }

    #[test]
    fn en_passant_is_generated() {
        let moves = generate("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let ep = moves.iter().find(|m| match m.kind() {
            MoveKind::EnPassantCapture { .. } => true,
            _ => false,
        });
        let ep = ep.expect("en-passant capture should be generated");
        assert_eq!(Square::E5, ep.source());
        assert_eq!(Square::D6, ep.destination());
    }

    #[test]
    fn en_passant_exposing_the_king_is_rejected() {
        // Capturing en passant would remove both pawns from the fifth
        // rank and expose the king to the rook on h5.
        let moves = generate("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1");
        assert!(moves.iter().all(|m| match m.kind() {
            MoveKind::EnPassantCapture { .. } => false,
            _ => true,
        }));
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // White just pushed d2-d4, checking the king on c5. Capturing
        // the pawn en passant resolves the check.
        let moves = generate("8/8/8/2k5/3Pp3/8/8/4K3 b - d3 0 1");
        let ep = moves.iter().find(|m| match m.kind() {
            MoveKind::EnPassantCapture { .. } => true,
            _ => false,
        });
        assert!(ep.is_some());
    }

    #[test]
    fn castles_are_generated_when_legal() {
        let moves = generate("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        let kingside = moves.iter().any(|m| m.kind() == MoveKind::CastleKingSide);
        let queenside = moves.iter().any(|m| m.kind() == MoveKind::CastleQueenSide);
        assert!(kingside);
        assert!(queenside);
    }

    #[test]
    fn castle_through_attack_is_rejected() {
        // The rook on f2 covers f1, so the king may not castle across
        // it, but capturing the rook and other king moves remain.
        let moves = generate("4k3/8/8/8/8/8/5r2/4K2R w K - 0 1");
        assert!(moves.iter().all(|m| m.kind() != MoveKind::CastleKingSide));
    }

    #[test]
    fn attacked_castling_rook_is_fine() {
        // Only the king's transit squares matter; an attacked rook on h1
        // does not forbid the castle.
        let moves = generate("4k3/8/8/7r/8/8/8/4K2R w K - 0 1");
        assert!(moves.iter().any(|m| m.kind() == MoveKind::CastleKingSide));
    }

    #[test]
    fn castle_with_missing_rook_is_not_generated() {
        // Corrupt FEN: rights claim a castle but the rooks are gone.
        let moves = generate("4k3/8/8/8/8/8/8/4K3 w KQkq - 0 1");
        assert!(moves.iter().all(|m| match m.kind() {
            MoveKind::CastleKingSide | MoveKind::CastleQueenSide => false,
            _ => true,
        }));
    }

    #[test]
    fn castle_out_of_check_is_rejected() {
        let moves = generate("4k3/8/8/8/8/8/4r3/4K2R w K - 0 1");
        assert!(moves.iter().all(|m| m.kind() != MoveKind::CastleKingSide));
    }
}
