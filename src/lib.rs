// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod analysis;
pub mod attacks;
mod bitboard;
pub mod eval;
mod movegen;
mod moves;
mod perft;
mod position;
pub mod search;
mod types;

pub use crate::analysis::Analysis;
pub use crate::bitboard::{Bitboard, BitboardIterator};
pub use crate::movegen::{MoveGenerator, MoveVec};
pub use crate::moves::{Move, MoveKind};
pub use crate::perft::perft;
pub use crate::position::{FenParseError, Position};
pub use crate::types::{CastleStatus, Color, File, Piece, PieceKind, Rank, Square};
