/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter_types::{Color, Piece, PieceKind, Square, MAX_NUM_MOVES, MAX_PIECE_MOVES};

use crate::{Board, Move};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// An alias for an [`arrayvec::ArrayVec`] of the destination squares of a
/// single piece, containing at most [`MAX_PIECE_MOVES`] entries.
pub type SquareList = arrayvec::ArrayVec<Square, MAX_PIECE_MOVES>;

/// The four orthogonal ray directions, as `(file, rank)` deltas.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// The four diagonal ray directions.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

/// All eight ray directions; doubles as the king's step offsets.
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (0, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// The eight knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
];

impl Board {
    /// Scans outward from `from` in `direction` and returns the first piece
    /// encountered along the ray, with its square, or `None` if the ray runs
    /// off the board first.
    pub fn first_piece_along(
        &self,
        from: Square,
        direction: (i8, i8),
    ) -> Option<(Square, Piece)> {
        let mut current = from;
        while let Some(next) = current.offset(direction.0, direction.1) {
            if let Some(piece) = self.piece_at(next) {
                return Some((next, piece));
            }
            current = next;
        }
        None
    }

    /// Returns `true` iff any piece of `by` attacks `square`.
    ///
    /// An attacking slider must be the *first* piece encountered along its
    /// ray; any occupant, friend or foe, blocks everything behind it.
    pub fn attacks(&self, square: Square, by: Color) -> bool {
        // Radiate orthogonally, looking for an unobstructed rook or queen
        for direction in ORTHOGONALS {
            if let Some((_, piece)) = self.first_piece_along(square, direction) {
                if piece.color() == by
                    && matches!(piece.kind(), PieceKind::Rook | PieceKind::Queen)
                {
                    return true;
                }
            }
        }

        // Then diagonally, for an unobstructed bishop or queen
        for direction in DIAGONALS {
            if let Some((_, piece)) = self.first_piece_along(square, direction) {
                if piece.color() == by
                    && matches!(piece.kind(), PieceKind::Bishop | PieceKind::Queen)
                {
                    return true;
                }
            }
        }

        // Knights jump over blockers, so a plain offset probe suffices
        let knight = Piece::new(by, PieceKind::Knight);
        for (df, dr) in KNIGHT_OFFSETS {
            if square.offset(df, dr).map(|s| self.piece_at(s)) == Some(Some(knight)) {
                return true;
            }
        }

        // A pawn of `by` attacks this square from one rank behind it,
        // "behind" meaning against the pawn's direction of travel
        let pawn = Piece::new(by, PieceKind::Pawn);
        for df in [-1, 1] {
            if square.offset(df, -by.forward()).map(|s| self.piece_at(s)) == Some(Some(pawn)) {
                return true;
            }
        }

        // And finally, the enemy king
        let king = Piece::new(by, PieceKind::King);
        for (df, dr) in ALL_DIRECTIONS {
            if square.offset(df, dr).map(|s| self.piece_at(s)) == Some(Some(king)) {
                return true;
            }
        }

        false
    }

    /// Returns `true` iff the king of `color` is attacked by the opponent.
    ///
    /// A board with no king of `color` reports `false` rather than failing,
    /// so partially set-up positions remain queryable.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(square) => self.attacks(square, color.opponent()),
            None => false,
        }
    }

    /// The destination squares reachable from `from` under pure movement
    /// rules, with no check-legality filtering, dispatched on the kind of
    /// the piece standing there.
    ///
    /// An empty square yields an empty list. Castling and en passant are not
    /// generated here; they are synthesized by the match state, which owns
    /// the bookkeeping they depend on.
    pub fn pseudo_moves(&self, from: Square) -> SquareList {
        let mut destinations = SquareList::new();

        let Some(piece) = self.piece_at(from) else {
            return destinations;
        };

        match piece.kind() {
            PieceKind::King => self.offset_moves(from, &ALL_DIRECTIONS, &mut destinations),
            PieceKind::Knight => self.offset_moves(from, &KNIGHT_OFFSETS, &mut destinations),
            PieceKind::Bishop => self.ray_moves(from, &DIAGONALS, &mut destinations),
            PieceKind::Rook => self.ray_moves(from, &ORTHOGONALS, &mut destinations),
            PieceKind::Queen => self.ray_moves(from, &ALL_DIRECTIONS, &mut destinations),
            PieceKind::Pawn => self.pawn_moves(from, piece.color(), &mut destinations),
        }

        destinations
    }

    /// Fixed-offset destinations (king, knight), filtered only by
    /// [`Board::is_possible`].
    fn offset_moves(&self, from: Square, offsets: &[(i8, i8)], destinations: &mut SquareList) {
        for &(df, dr) in offsets {
            if let Some(to) = from.offset(df, dr) {
                if self.is_possible(&Move::new(from, to)) {
                    destinations.push(to);
                }
            }
        }
    }

    /// Ray destinations (bishop, rook, queen). Each ray stops at the first
    /// occupied square, including it when it holds an enemy piece.
    fn ray_moves(&self, from: Square, directions: &[(i8, i8)], destinations: &mut SquareList) {
        for &(df, dr) in directions {
            let mut current = from;
            while let Some(to) = current.offset(df, dr) {
                if self.is_possible(&Move::new(from, to)) {
                    destinations.push(to);
                }
                if self.has(to) {
                    break;
                }
                current = to;
            }
        }
    }

    /// Pawn destinations: a single push onto an empty square, a double push
    /// from the home rank across two empty squares, and diagonal-forward
    /// captures onto enemy-occupied squares. Pushes and captures are
    /// mutually exclusive move classes.
    fn pawn_moves(&self, from: Square, color: Color, destinations: &mut SquareList) {
        let forward = color.forward();

        if let Some(one) = from.offset(0, forward) {
            if !self.has(one) {
                destinations.push(one);

                if from.rank() == color.pawn_rank() {
                    if let Some(two) = from.offset(0, 2 * forward) {
                        if !self.has(two) {
                            destinations.push(two);
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            if let Some(to) = from.offset(df, forward) {
                if self
                    .piece_at(to)
                    .is_some_and(|target| target.color() != color)
                {
                    destinations.push(to);
                }
            }
        }
    }

    /// The legal moves of the piece at `from`: its pseudo moves filtered
    /// through [`Board::is_possible_and_legal`].
    pub fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();

        for to in self.pseudo_moves(from) {
            let mv = Move::new(from, to);
            if self.is_possible_and_legal(&mv) {
                moves.push(mv);
            }
        }

        moves
    }

    /// Returns `true` iff any occupied square of `side` yields at least one
    /// legal move.
    ///
    /// This is the board-level answer: castling and en passant are not
    /// consulted. For the full answer, ask
    /// [`Position::legal_moves_for`](crate::Position::legal_moves_for).
    pub fn has_any_legal_move(&self, side: Color) -> bool {
        Square::iter().any(|square| {
            self.piece_at(square)
                .is_some_and(|piece| piece.color() == side)
                && !self.legal_moves_from(square).is_empty()
        })
    }
}
