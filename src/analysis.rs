// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Check and pin analysis of a static position, computed once per
//! move-generation pass for the side to move:
//!
//! * which enemy pieces check the king, and how many;
//! * for a single sliding checker, the blocking ray between it and the
//!   king;
//! * the king-danger set: every square the enemy attacks, computed with
//!   the friendly king lifted off the board so that sliding attacks see
//!   through it (a king stepping backwards along a checking ray must
//!   still count as attacked);
//! * which friendly pieces are pinned, and the ray each one is confined
//!   to.
use crate::attacks;
use crate::bitboard::Bitboard;
use crate::position::Position;
use crate::types::{Color, Direction, Square, TableIndex, DIRECTIONS};

/// The set of `by`-colored pieces that attack `target` under the given
/// occupancy view.
pub fn attackers_of(pos: &Position, target: Square, by: Color, occupancy: Bitboard) -> Bitboard {
    let mut attackers = Bitboard::EMPTY;

    // Pawn attacks are mirror-symmetric between the colors: a `by` pawn
    // attacks `target` exactly when a pawn of the other color standing on
    // `target` would attack the pawn's own square.
    attackers |= attacks::pawn_attacks(target, by.toggle()) & pos.pawns(by);
    attackers |= attacks::knight_attacks(target) & pos.knights(by);
    attackers |= attacks::king_attacks(target) & pos.kings(by);

    let diagonal = pos.bishops(by) | pos.queens(by);
    attackers |= attacks::bishop_attacks(target, occupancy) & diagonal;
    let straight = pos.rooks(by) | pos.queens(by);
    attackers |= attacks::rook_attacks(target, occupancy) & straight;

    attackers
}

/// One analysis pass over a position for a given side. All fields are
/// computed eagerly at construction; the struct borrows nothing.
pub struct Analysis {
    king: Square,
    checkers: Bitboard,
    check_ray: Bitboard,
    danger_squares: Bitboard,
    pinned: Bitboard,
    pin_rays: [Bitboard; 64],
}

impl Analysis {
    pub fn new(pos: &Position, us: Color) -> Analysis {
        let them = us.toggle();
        let king = pos.king_square(us);
        let occupancy = pos.all_pieces();
        let our_pieces = pos.pieces(us);

        // Contact checkers first: pawns, knights, and (for completeness,
        // since two kings can never legally touch) the enemy king, found
        // by attack symmetry from the king square.
        let mut checkers = Bitboard::EMPTY;
        checkers |= attacks::pawn_attacks(king, us) & pos.pawns(them);
        checkers |= attacks::knight_attacks(king) & pos.knights(them);
        checkers |= attacks::king_attacks(king) & pos.kings(them);

        // Sliding checkers and pins come out of the same scan: walk each
        // of the eight rays away from the king and classify the nearest
        // blocker. An enemy slider of the right kind is a checker; a
        // friendly piece backed by such a slider is pinned to the ray.
        let mut check_ray = Bitboard::EMPTY;
        let mut pinned = Bitboard::EMPTY;
        let mut pin_rays = [Bitboard::ALL; 64];
        let diagonal_sliders = pos.bishops(them) | pos.queens(them);
        let straight_sliders = pos.rooks(them) | pos.queens(them);

        for &dir in &DIRECTIONS {
            let sliders = if is_diagonal(dir) {
                diagonal_sliders
            } else {
                straight_sliders
            };

            let ray = attacks::ray(king, dir);
            let nearest = match nearest_on_ray(ray & occupancy, dir) {
                Some(sq) => sq,
                None => continue,
            };

            if sliders.contains(nearest) {
                checkers.insert(nearest);

                // Squares strictly between king and checker; landing a
                // piece on one of them blocks the check.
                let mut between = ray ^ attacks::ray(nearest, dir);
                between.remove(nearest);
                check_ray |= between;
            } else if our_pieces.contains(nearest) {
                let beyond = attacks::ray(nearest, dir);
                if let Some(backer) = nearest_on_ray(beyond & occupancy, dir) {
                    if sliders.contains(backer) {
                        pinned.insert(nearest);
                        // The pinned piece may move anywhere on the
                        // king-to-pinner segment, pinner included.
                        pin_rays[nearest.as_index()] = ray ^ attacks::ray(backer, dir);
                    }
                }
            }
        }

        // Danger squares: the full enemy attack union, with our king
        // lifted off the board so sliders see through it.
        let mut king_board = Bitboard::EMPTY;
        king_board.insert(king);
        let occupancy_sans_king = occupancy ^ king_board;

        let mut danger_squares = Bitboard::EMPTY;
        for pawn in pos.pawns(them) {
            danger_squares |= attacks::pawn_attacks(pawn, them);
        }
        for knight in pos.knights(them) {
            danger_squares |= attacks::knight_attacks(knight);
        }
        for bishop in pos.bishops(them) {
            danger_squares |= attacks::bishop_attacks(bishop, occupancy_sans_king);
        }
        for rook in pos.rooks(them) {
            danger_squares |= attacks::rook_attacks(rook, occupancy_sans_king);
        }
        for queen in pos.queens(them) {
            danger_squares |= attacks::queen_attacks(queen, occupancy_sans_king);
        }
        for enemy_king in pos.kings(them) {
            danger_squares |= attacks::king_attacks(enemy_king);
        }

        Analysis {
            king,
            checkers,
            check_ray,
            danger_squares,
            pinned,
            pin_rays,
        }
    }

    /// The friendly king's square.
    pub fn king(&self) -> Square {
        self.king
    }

    /// The set of enemy pieces currently giving check.
    pub fn checkers(&self) -> Bitboard {
        self.checkers
    }

    /// How many enemy pieces give check: 0, 1, or 2.
    pub fn check_count(&self) -> u32 {
        self.checkers.count()
    }

    /// The single checker's square, when exactly one piece gives check.
    pub fn checking_square(&self) -> Option<Square> {
        if self.check_count() == 1 {
            self.checkers.first()
        } else {
            None
        }
    }

    /// Squares strictly between the king and a single sliding checker.
    /// Empty for knight and pawn checks, which cannot be blocked.
    pub fn check_ray(&self) -> Bitboard {
        self.check_ray
    }

    /// Every square the enemy attacks; the king may not move onto one.
    pub fn danger_squares(&self) -> Bitboard {
        self.danger_squares
    }

    pub fn is_pinned(&self, sq: Square) -> bool {
        self.pinned.contains(sq)
    }

    /// The set of friendly pinned pieces.
    pub fn pinned(&self) -> Bitboard {
        self.pinned
    }

    /// The destinations a piece on `sq` is confined to by a pin: the
    /// king-to-pinner segment for pinned pieces, the full board for
    /// everything else.
    pub fn pin_ray(&self, sq: Square) -> Bitboard {
        self.pin_rays[sq.as_index()]
    }
}

fn is_diagonal(dir: Direction) -> bool {
    match dir {
        Direction::NorthEast
        | Direction::SouthEast
        | Direction::SouthWest
        | Direction::NorthWest => true,
        _ => false,
    }
}

/// The blocker on `ray` nearest to the ray's origin: the lowest set bit
/// for rays that run toward higher square numbers, the highest set bit
/// for rays that run the other way.
fn nearest_on_ray(blockers: Bitboard, dir: Direction) -> Option<Square> {
    if blockers.is_empty() {
        return None;
    }

    let index = if dir.as_vector() > 0 {
        blockers.bits().trailing_zeros()
    } else {
        63 - blockers.bits().leading_zeros()
    };
    Some(Square::from_index(index as usize))
}
