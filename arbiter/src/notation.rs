/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter_types::{Piece, Square};

use crate::{Board, Move, Status};

/// Encodes a move in short algebraic notation against the board it is about
/// to be played on.
///
/// Castles render as `O-O` or `O-O-O`, judged by comparing the destination
/// file against the start file. Other moves render as piece letter (omitted
/// for pawns) + disambiguation + `x` when the destination is occupied before
/// the move + destination square; pawn captures prefix the origin file
/// letter instead of a piece letter. An en-passant capture lands on an empty
/// square and therefore renders without `x`.
///
/// No check (`+`), mate (`#`), or promotion suffix is ever appended: those
/// depend on post-move information the caller holds, and are composed onto
/// the encoded string by the caller. See [`status_suffix`].
///
/// # Example
/// ```
/// # use arbiter::{san, Board, Move, Square};
/// let board = Board::default();
/// let e4 = Move::new(
///     Square::from_uci("e2").unwrap(),
///     Square::from_uci("e4").unwrap(),
/// );
/// assert_eq!(san(&board, &e4), "e4");
/// ```
pub fn san(board: &Board, mv: &Move) -> String {
    if mv.is_castle() {
        return if mv.to().file() > mv.from().file() {
            String::from("O-O")
        } else {
            String::from("O-O-O")
        };
    }

    // Nothing to encode if there is nothing to move
    let Some(piece) = board.piece_at(mv.from()) else {
        return mv.to().to_uci();
    };

    let mut text = String::new();

    if !piece.is_pawn() {
        text.push(piece.kind().letter());
        text.push_str(&disambiguation(board, mv, piece));
    }

    if board.has(mv.to()) {
        if piece.is_pawn() {
            text.push(file_letter(mv.from()));
        }
        text.push('x');
    }

    text.push_str(&mv.to().to_uci());
    text
}

/// The extra origin characters needed when another piece of the same kind
/// and color could legally reach the same destination: the origin file
/// letter when the rival comes from a different file, the origin rank digit
/// when it shares the file, or both when neither alone settles it.
fn disambiguation(board: &Board, mv: &Move, piece: Piece) -> String {
    let mut need_file = false;
    let mut need_rank = false;

    for square in Square::iter() {
        if square == mv.from() || board.piece_at(square) != Some(piece) {
            continue;
        }

        // Only rivals that could actually play to the same square count
        if board
            .legal_moves_from(square)
            .iter()
            .any(|rival| rival.to() == mv.to())
        {
            if square.file() != mv.from().file() {
                need_file = true;
            } else {
                need_rank = true;
            }
        }
    }

    let mut text = String::new();
    if need_file {
        text.push(file_letter(mv.from()));
    }
    if need_rank {
        text.push(rank_digit(mv.from()));
    }
    text
}

/// The suffix a caller appends to a SAN string for the status the move
/// produced: `+` for check, `#` for mate, nothing otherwise.
pub const fn status_suffix(status: Status) -> &'static str {
    match status {
        Status::Check(_) => "+",
        Status::Checkmate(_) => "#",
        _ => "",
    }
}

#[inline(always)]
fn file_letter(square: Square) -> char {
    (b'a' + square.file()) as char
}

#[inline(always)]
fn rank_digit(square: Square) -> char {
    (b'0' + Square::SIZE - square.rank()) as char
}

#[cfg(test)]
mod tests {
    use arbiter_types::Color;

    use super::*;
    use crate::{CastleSide, Position};

    fn sq(uci: &str) -> Square {
        Square::from_uci(uci).unwrap()
    }

    fn mv(from: &str, to: &str) -> Move {
        Move::new(sq(from), sq(to))
    }

    #[test]
    fn test_pawn_push_is_bare_square() {
        let board = Board::default();
        assert_eq!(san(&board, &mv("e2", "e4")), "e4");
        assert_eq!(san(&board, &mv("a7", "a5")), "a5");
    }

    #[test]
    fn test_piece_moves_use_letters() {
        let board = Board::default();
        assert_eq!(san(&board, &mv("g1", "f3")), "Nf3");

        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3").unwrap();
        assert_eq!(san(&board, &mv("a1", "a4")), "Ra4");
    }

    #[test]
    fn test_captures_mark_x() {
        // White knight takes the pawn on d5
        let board = Board::from_fen("4k3/8/8/3p4/8/4N3/8/4K3").unwrap();
        assert_eq!(san(&board, &mv("e3", "d5")), "Nxd5");
    }

    #[test]
    fn test_pawn_capture_prefixes_origin_file() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        assert_eq!(san(&board, &mv("e4", "d5")), "exd5");
    }

    #[test]
    fn test_en_passant_renders_without_x() {
        // The destination square is empty before the move, so no `x` appears
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        let ep = Move::en_passant(sq("e5"), sq("d6"), sq("d5"));
        assert_eq!(san(&board, &ep), "d6");
    }

    #[test]
    fn test_castles() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(
            san(&board, &Move::castle(Color::White, CastleSide::Kingside)),
            "O-O"
        );
        assert_eq!(
            san(&board, &Move::castle(Color::Black, CastleSide::Queenside)),
            "O-O-O"
        );
    }

    #[test]
    fn test_disambiguation_by_file() {
        // The king on e1 blocks h1's path to d1: no disambiguation needed
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(san(&board, &mv("a1", "d1")), "Rd1");

        // With the king out of the way, both rooks see d1
        let board = Board::from_fen("4k3/8/8/8/8/8/4K3/R6R").unwrap();
        assert_eq!(san(&board, &mv("a1", "d1")), "Rad1");
        assert_eq!(san(&board, &mv("h1", "d1")), "Rhd1");
    }

    #[test]
    fn test_disambiguation_by_rank() {
        // Rooks a1 and a5 both reach a3
        let board = Board::from_fen("4k3/8/8/R7/8/8/8/R3K3").unwrap();
        assert_eq!(san(&board, &mv("a1", "a3")), "R1a3");
        assert_eq!(san(&board, &mv("a5", "a3")), "R5a3");
    }

    #[test]
    fn test_disambiguation_ignores_pinned_rival() {
        // Knights on b1 and e2 could both reach c3, but e2 is pinned by the
        // rook on e8 and cannot legally move there
        let board = Board::from_fen("4r3/8/8/8/8/8/4N3/1N2K3").unwrap();
        assert_eq!(san(&board, &mv("b1", "c3")), "Nc3");
    }

    #[test]
    fn test_status_suffixes() {
        assert_eq!(status_suffix(Status::Check(Color::White)), "+");
        assert_eq!(status_suffix(Status::Checkmate(Color::Black)), "#");
        assert_eq!(status_suffix(Status::Normal), "");
        assert_eq!(status_suffix(Status::Stalemate), "");
    }

    #[test]
    fn test_opening_move_encoding_from_raw_coordinates() {
        // The pawn double push from (4, 6) to (4, 4) must render as "e4"
        let pos = Position::default();
        let opening = Move::new(
            Square::new(4, 6).unwrap(),
            Square::new(4, 4).unwrap(),
        );
        assert_eq!(pos.san(&opening), "e4");
    }
}
