// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Attack generation: pure functions from a square (plus, for sliding
//! pieces, an occupancy mask) to the set of attacked squares. Nothing in
//! this module looks at a `Position`; callers pass whatever occupancy
//! view suits them.
//!
//! Pawn, knight, and king patterns never depend on occupancy, so they are
//! computed once per square and cached for the lifetime of the process.
//! Sliding attacks are resolved from per-square, per-direction ray masks
//! by locating the nearest blocker on the ray; the blocker's square stays
//! in the attack set so that captures of the blocker are visible.
use crate::bitboard::Bitboard;
use crate::bitboard::{
    BB_FILE_A, BB_FILE_AB, BB_FILE_GH, BB_FILE_H, BB_RANK_1, BB_RANK_12, BB_RANK_78, BB_RANK_8,
};
use crate::types::{Color, Direction, Square, TableIndex, COLORS, SQUARES};

struct KingTable {
    table: [Bitboard; 64],
}

impl KingTable {
    pub fn new() -> KingTable {
        let mut kt = KingTable {
            table: [Bitboard::EMPTY; 64],
        };

        for &sq in SQUARES.iter() {
            let mut board = Bitboard::EMPTY;
            if !BB_RANK_8.contains(sq) {
                board.insert(sq.towards(Direction::North));
                if !BB_FILE_A.contains(sq) {
                    board.insert(sq.towards(Direction::NorthWest));
                }
                if !BB_FILE_H.contains(sq) {
                    board.insert(sq.towards(Direction::NorthEast));
                }
            }

            if !BB_RANK_1.contains(sq) {
                board.insert(sq.towards(Direction::South));
                if !BB_FILE_A.contains(sq) {
                    board.insert(sq.towards(Direction::SouthWest));
                }
                if !BB_FILE_H.contains(sq) {
                    board.insert(sq.towards(Direction::SouthEast));
                }
            }

            if !BB_FILE_A.contains(sq) {
                board.insert(sq.towards(Direction::West));
            }
            if !BB_FILE_H.contains(sq) {
                board.insert(sq.towards(Direction::East));
            }

            kt.table[sq.as_index()] = board;
        }

        kt
    }

    pub fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

struct PawnTable {
    table: [[Bitboard; 2]; 64],
}

impl PawnTable {
    pub fn new() -> PawnTable {
        let mut pt = PawnTable {
            table: [[Bitboard::EMPTY; 2]; 64],
        };

        for &sq in SQUARES.iter() {
            for &color in COLORS.iter() {
                let mut board = Bitboard::EMPTY;
                let (promo_rank, up_left, up_right) = match color {
                    Color::White => (BB_RANK_8, Direction::NorthWest, Direction::NorthEast),
                    Color::Black => (BB_RANK_1, Direction::SouthWest, Direction::SouthEast),
                };

                if promo_rank.contains(sq) {
                    // Pawns never stand on their own promotion rank; they
                    // would already have promoted.
                    continue;
                }

                if !BB_FILE_A.contains(sq) {
                    board.insert(sq.towards(up_left));
                }
                if !BB_FILE_H.contains(sq) {
                    board.insert(sq.towards(up_right));
                }

                pt.table[sq.as_index()][color.as_index()] = board;
            }
        }

        pt
    }

    pub fn attacks(&self, sq: Square, color: Color) -> Bitboard {
        self.table[sq.as_index()][color.as_index()]
    }
}

struct KnightTable {
    table: [Bitboard; 64],
}

impl KnightTable {
    pub fn new() -> KnightTable {
        let mut kt = KnightTable {
            table: [Bitboard::EMPTY; 64],
        };

        // Every jump carries its own file guard so that a knight on the
        // a-file never reappears on the h-file after the shift, and vice
        // versa. Offsets are relative to the a8-origin numbering, where
        // one step north is -8.
        for &sq in SQUARES.iter() {
            let mut board = Bitboard::EMPTY;
            if !BB_FILE_A.contains(sq) && !BB_RANK_78.contains(sq) {
                board.insert(sq.plus(-17));
            }
            if !BB_FILE_H.contains(sq) && !BB_RANK_78.contains(sq) {
                board.insert(sq.plus(-15));
            }
            if !BB_FILE_GH.contains(sq) && !BB_RANK_8.contains(sq) {
                board.insert(sq.plus(-6));
            }
            if !BB_FILE_GH.contains(sq) && !BB_RANK_1.contains(sq) {
                board.insert(sq.plus(10));
            }
            if !BB_FILE_H.contains(sq) && !BB_RANK_12.contains(sq) {
                board.insert(sq.plus(17));
            }
            if !BB_FILE_A.contains(sq) && !BB_RANK_12.contains(sq) {
                board.insert(sq.plus(15));
            }
            if !BB_FILE_AB.contains(sq) && !BB_RANK_1.contains(sq) {
                board.insert(sq.plus(6));
            }
            if !BB_FILE_AB.contains(sq) && !BB_RANK_8.contains(sq) {
                board.insert(sq.plus(-10));
            }
            kt.table[sq.as_index()] = board;
        }
        kt
    }

    pub fn attacks(&self, sq: Square) -> Bitboard {
        self.table[sq.as_index()]
    }
}

// Entry 64 is a sentinel row of empty boards, selected by the blocker
// scans below when a ray runs to the edge without hitting anything.
struct RayTable {
    table: [[Bitboard; 8]; 65],
}

impl RayTable {
    pub fn new() -> RayTable {
        let mut rt = RayTable {
            table: [[Bitboard::EMPTY; 8]; 65],
        };

        for &sq in SQUARES.iter() {
            let mut populate_dir = |dir: Direction, edge: Bitboard| {
                let mut entry = Bitboard::EMPTY;
                if edge.contains(sq) {
                    // The ray starts on its own edge; it covers nothing.
                    rt.table[sq.as_index()][dir.as_index()] = entry;
                    return;
                }

                let mut cursor = sq;
                loop {
                    cursor = cursor.towards(dir);
                    entry.insert(cursor);
                    if edge.contains(cursor) {
                        break;
                    }
                }
                rt.table[sq.as_index()][dir.as_index()] = entry;
            };

            populate_dir(Direction::North, BB_RANK_8);
            populate_dir(Direction::NorthEast, BB_RANK_8.union(BB_FILE_H));
            populate_dir(Direction::East, BB_FILE_H);
            populate_dir(Direction::SouthEast, BB_RANK_1.union(BB_FILE_H));
            populate_dir(Direction::South, BB_RANK_1);
            populate_dir(Direction::SouthWest, BB_RANK_1.union(BB_FILE_A));
            populate_dir(Direction::West, BB_FILE_A);
            populate_dir(Direction::NorthWest, BB_RANK_8.union(BB_FILE_A));
        }
        rt
    }

    pub fn ray(&self, sq: usize, dir: Direction) -> Bitboard {
        self.table[sq][dir.as_index()]
    }
}

lazy_static! {
    static ref KING_TABLE: KingTable = KingTable::new();
    static ref PAWN_TABLE: PawnTable = PawnTable::new();
    static ref KNIGHT_TABLE: KnightTable = KnightTable::new();
    static ref RAY_TABLE: RayTable = RayTable::new();
}

/// The full, occupancy-blind ray from `sq` in direction `dir`, up to and
/// including the board edge. Used by the check/pin analyzer to walk
/// x-rays toward the king.
pub(crate) fn ray(sq: Square, dir: Direction) -> Bitboard {
    RAY_TABLE.ray(sq.as_index(), dir)
}

fn positive_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() > 0);
    let attacks = RAY_TABLE.ray(sq.as_index(), dir);
    let blockers = attacks.intersect(occupancy).bits();
    let blocking_square = blockers.trailing_zeros() as usize;
    let blocked_ray = RAY_TABLE.ray(blocking_square, dir);
    attacks ^ blocked_ray
}

fn negative_ray_attacks(sq: Square, occupancy: Bitboard, dir: Direction) -> Bitboard {
    debug_assert!(dir.as_vector() < 0);
    let attacks = RAY_TABLE.ray(sq.as_index(), dir);
    let blockers = attacks.intersect(occupancy).bits();
    let blocking_square = (64 - blockers.leading_zeros())
        .checked_sub(1)
        .unwrap_or(64) as usize;
    let blocked_ray = RAY_TABLE.ray(blocking_square, dir);
    attacks ^ blocked_ray
}

fn diagonal_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    negative_ray_attacks(sq, occupancy, Direction::NorthWest)
        | positive_ray_attacks(sq, occupancy, Direction::SouthEast)
}

fn antidiagonal_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    negative_ray_attacks(sq, occupancy, Direction::NorthEast)
        | positive_ray_attacks(sq, occupancy, Direction::SouthWest)
}

fn file_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    negative_ray_attacks(sq, occupancy, Direction::North)
        | positive_ray_attacks(sq, occupancy, Direction::South)
}

fn rank_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    positive_ray_attacks(sq, occupancy, Direction::East)
        | negative_ray_attacks(sq, occupancy, Direction::West)
}

pub fn pawn_attacks(sq: Square, color: Color) -> Bitboard {
    PAWN_TABLE.attacks(sq, color)
}

pub fn knight_attacks(sq: Square) -> Bitboard {
    KNIGHT_TABLE.attacks(sq)
}

pub fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    diagonal_attacks(sq, occupancy) | antidiagonal_attacks(sq, occupancy)
}

pub fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    file_attacks(sq, occupancy) | rank_attacks(sq, occupancy)
}

pub fn queen_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(sq, occupancy) | rook_attacks(sq, occupancy)
}

pub fn king_attacks(sq: Square) -> Bitboard {
    KING_TABLE.attacks(sq)
}
