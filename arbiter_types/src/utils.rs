/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN string for the "Kiwipete" position, a dense perft test case.
pub const FEN_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Maximum number of legal moves that can be reached in any position.
///
/// The key position is `R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1`,
/// which has 218 legal moves.
pub const MAX_NUM_MOVES: usize = 218;

/// Maximum number of destination squares a single piece can have: a queen in
/// the middle of an otherwise open board reaches 27 squares.
pub const MAX_PIECE_MOVES: usize = 27;
