/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter_types::Color;
use thiserror::Error;

use crate::Move;

/// Everything the engine can reject.
///
/// All variants are recoverable conditions reported to the caller; none of
/// them mutate state or abort the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Raw coordinates outside the 8x8 grid. Checked before any grid access;
    /// a constructed [`Square`](arbiter_types::Square) can never trip this.
    #[error("coordinates ({file}, {rank}) are off the board")]
    OutOfBounds { file: i32, rank: i32 },

    /// A move submitted for application that is not in the current
    /// legal-move set. The position is left untouched.
    #[error("move {0} is not legal in the current position")]
    IllegalMove(Move),

    /// A promotion was requested but no pawn of the given color is resting
    /// on its far rank.
    #[error("{0:?} has no pawn eligible for promotion")]
    NoPromotablePawn(Color),

    /// Contradictory construction flags (castle and en passant both set, or
    /// en passant without a victim square). Rejected before a
    /// [`Move`] value ever exists.
    #[error("malformed move: {0}")]
    MalformedMove(&'static str),
}
