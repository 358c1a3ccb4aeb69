/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use arbiter_types::*;

/// A chessboard: an 8x8 grid of occupants, with occupancy queries, move
/// application, and legality checks.
mod board;
/// The error taxonomy for everything that can be rejected.
mod error;
/// Attack detection and per-square move generation over offset/ray tables.
mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
mod moves;
/// Short-algebraic notation encoding, including disambiguation.
mod notation;
/// Utility function for performance testing.
mod perft;
/// Match state: a board plus castling rights, turn counters, and game status.
mod position;

pub use board::*;
pub use error::*;
pub use movegen::*;
pub use moves::*;
pub use notation::*;
pub use perft::*;
pub use position::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::board::*;
    pub use crate::error::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::notation::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use arbiter_types::*;
}
