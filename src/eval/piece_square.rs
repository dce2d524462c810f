// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A piece-square evaluator: middlegame placement tables summed per
//! piece, combined with a material difference squashed through a
//! sigmoid. The balance between the material and positional terms shifts
//! with the size of the material imbalance, so lopsided positions are
//! scored almost entirely on material while balanced ones are scored
//! mostly on placement.
use crate::eval::BoardEvaluator;
use crate::position::Position;
use crate::types::{Color, PieceKind, Square, TableIndex, PIECE_KINDS};

// Placement tables are written from White's point of view with a8 first,
// which is exactly the board's square numbering, so White indexes them
// with the raw square. Black's tables are the same ones mirrored rank
// for rank; flipping bit 5..3 of the square index (xor 56) does the
// mirroring.
#[rustfmt::skip]
static PAWN_TABLE: [f64; 64] = [
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
    50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0, 50.0,
    10.0, 10.0, 20.0, 30.0, 30.0, 20.0, 10.0, 10.0,
     5.0,  5.0, 10.0, 25.0, 25.0, 10.0,  5.0,  5.0,
     0.0,  0.0,  0.0, 20.0, 20.0,  0.0,  0.0,  0.0,
     5.0, -5.0,-10.0,  0.0,  0.0,-10.0, -5.0,  5.0,
     5.0, 10.0, 10.0,-20.0,-20.0, 10.0, 10.0,  5.0,
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

#[rustfmt::skip]
static KNIGHT_TABLE: [f64; 64] = [
   -50.0,-40.0,-30.0,-30.0,-30.0,-30.0,-40.0,-50.0,
   -40.0,-20.0,  0.0,  0.0,  0.0,  0.0,-20.0,-40.0,
   -30.0,  0.0, 10.0, 15.0, 15.0, 10.0,  0.0,-30.0,
   -30.0,  5.0, 15.0, 20.0, 20.0, 15.0,  5.0,-30.0,
   -30.0,  0.0, 15.0, 20.0, 20.0, 15.0,  0.0,-30.0,
   -30.0,  5.0, 10.0, 15.0, 15.0, 10.0,  5.0,-30.0,
   -40.0,-20.0,  0.0,  5.0,  5.0,  0.0,-20.0,-40.0,
   -50.0,-40.0,-30.0,-30.0,-30.0,-30.0,-40.0,-50.0,
];

#[rustfmt::skip]
static BISHOP_TABLE: [f64; 64] = [
   -20.0,-10.0,-10.0,-10.0,-10.0,-10.0,-10.0,-20.0,
   -10.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,-10.0,
   -10.0,  0.0,  5.0, 10.0, 10.0,  5.0,  0.0,-10.0,
   -10.0,  5.0,  5.0, 10.0, 10.0,  5.0,  5.0,-10.0,
   -10.0,  0.0, 10.0, 10.0, 10.0, 10.0,  0.0,-10.0,
   -10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0,-10.0,
   -10.0,  5.0,  0.0,  0.0,  0.0,  0.0,  5.0,-10.0,
   -20.0,-10.0,-10.0,-10.0,-10.0,-10.0,-10.0,-20.0,
];

#[rustfmt::skip]
static ROOK_TABLE: [f64; 64] = [
     0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
     5.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0,  5.0,
    -5.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -5.0,
    -5.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -5.0,
    -5.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -5.0,
    -5.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -5.0,
    -5.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0, -5.0,
     0.0,  0.0,  0.0,  5.0,  5.0,  0.0,  0.0,  0.0,
];

#[rustfmt::skip]
static QUEEN_TABLE: [f64; 64] = [
   -20.0,-10.0,-10.0, -5.0, -5.0,-10.0,-10.0,-20.0,
   -10.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,-10.0,
   -10.0,  0.0,  5.0,  5.0,  5.0,  5.0,  0.0,-10.0,
    -5.0,  0.0,  5.0,  5.0,  5.0,  5.0,  0.0, -5.0,
     0.0,  0.0,  5.0,  5.0,  5.0,  5.0,  0.0, -5.0,
   -10.0,  5.0,  5.0,  5.0,  5.0,  5.0,  0.0,-10.0,
   -10.0,  0.0,  5.0,  0.0,  0.0,  0.0,  0.0,-10.0,
   -20.0,-10.0,-10.0, -5.0, -5.0,-10.0,-10.0,-20.0,
];

#[rustfmt::skip]
static KING_TABLE: [f64; 64] = [
   -30.0,-40.0,-40.0,-50.0,-50.0,-40.0,-40.0,-30.0,
   -30.0,-40.0,-40.0,-50.0,-50.0,-40.0,-40.0,-30.0,
   -30.0,-40.0,-40.0,-50.0,-50.0,-40.0,-40.0,-30.0,
   -30.0,-40.0,-40.0,-50.0,-50.0,-40.0,-40.0,-30.0,
   -20.0,-30.0,-30.0,-40.0,-40.0,-30.0,-30.0,-20.0,
   -10.0,-20.0,-20.0,-20.0,-20.0,-20.0,-20.0,-10.0,
    20.0, 20.0,  0.0,  0.0,  0.0,  0.0,  0.0, 20.0,
    20.0, 30.0, 10.0,  0.0,  0.0, 10.0, 30.0, 20.0,
];

// Normalizes the summed placement scores to roughly the unit interval.
const POSITION_SCALE: f64 = 800.0;

fn table(kind: PieceKind) -> &'static [f64; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

// Material in pawn units; kings carry no material weight since they are
// never off the board.
fn material(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

fn mirror(sq: Square) -> usize {
    sq.as_index() ^ 56
}

/// Squashes a non-negative material difference (in pawn units) into the
/// unit interval: a one-pawn edge counts for little, a rook is decisive.
fn material_sigmoid(diff: i32) -> f64 {
    1.0 / (1.1 + (-f64::from(diff) + 4.0).exp())
}

pub struct PieceSquareEvaluator;

impl PieceSquareEvaluator {
    pub fn new() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }
}

impl Default for PieceSquareEvaluator {
    fn default() -> PieceSquareEvaluator {
        PieceSquareEvaluator
    }
}

impl BoardEvaluator for PieceSquareEvaluator {
    fn evaluate(&self, pos: &Position) -> f64 {
        let mut white_placement = 0.0;
        let mut black_placement = 0.0;
        let mut white_material = 0;
        let mut black_material = 0;

        for &kind in &PIECE_KINDS {
            let values = table(kind);
            for sq in pos.pieces_of_kind(Color::White, kind) {
                white_placement += values[sq.as_index()];
                white_material += material(kind);
            }
            for sq in pos.pieces_of_kind(Color::Black, kind) {
                black_placement += values[mirror(sq)];
                black_material += material(kind);
            }
        }

        // The more lopsided the material, the less placement matters.
        let material_difference = white_material - black_material;
        let (material_weight, position_weight) = match material_difference.abs() {
            d if d > 8 => (0.9, 0.1),
            d if d > 6 => (0.7, 0.3),
            d if d > 4 => (0.5, 0.5),
            d if d > 1 => (0.3, 0.7),
            _ => (0.4, 0.6),
        };

        let material_value = if material_difference > 0 {
            material_sigmoid(material_difference)
        } else if material_difference < 0 {
            -material_sigmoid(-material_difference)
        } else {
            0.0
        } * material_weight;

        let placement_value =
            (white_placement - black_placement) / POSITION_SCALE * position_weight;

        material_value + placement_value
    }
}
