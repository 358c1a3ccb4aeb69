/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};
use arbiter_types::{Color, Piece, PieceKind, Square, FEN_STARTPOS};

use crate::{CastleSide, EngineError, Move, MoveKind};

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you
/// need those, see [`Position`](crate::Position).
///
/// Internally an 8x8 mailbox: every square holds exactly one occupant, which
/// is either empty (`None`) or a piece of some kind and color.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
        }
    }

    /// Constructs a [`Board`] from the provided FEN string, ignoring
    /// castling/ep/move counters.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        // If this FEN string contains more than just the initial placements, extract the placements
        let placements = if fen.contains(' ') {
            fen.split(' ').next().unwrap()
        } else {
            fen
        };

        if placements.matches('/').count() != 7 {
            bail!("Missing placements for all 8 ranks.");
        }

        // FEN lists ranks from the top of the board down, which is the order
        // ranks are numbered here, so no reversal is needed.
        for (rank, placements) in placements.split('/').enumerate() {
            let mut file = 0u8;
            let rank = rank as u8;

            for piece_char in placements.chars() {
                if let Ok(piece) = Piece::from_uci(piece_char) {
                    let square = Square::new(file, rank)?;
                    board.place(piece, square);
                    file += 1;
                } else {
                    let Some(empty) = piece_char.to_digit(10) else {
                        bail!("Found non-piece, non-numeric char {piece_char:?} when parsing FEN.");
                    };
                    file += empty as u8;
                }
            }
        }

        Ok(board)
    }

    /// Generates a [FEN](https://www.chess.com/terms/fen-chess) placement
    /// string of this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut placements: [String; 8] = Default::default();

        for rank in 0..Square::SIZE {
            let mut empty_spaces = 0;
            for file in 0..Square::SIZE {
                if let Some(piece) = self.piece_at(Square::new_unchecked(file, rank)) {
                    if empty_spaces != 0 {
                        placements[rank as usize] += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    placements[rank as usize].push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                placements[rank as usize] += &empty_spaces.to_string();
            }
        }

        placements.join("/")
    }

    /// Returns `true` if there is a piece at the given [`Square`], else `false`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Board, Square};
    /// let board = Board::default();
    /// assert_eq!(board.has(Square::from_uci("b1").unwrap()), true);
    /// ```
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Fetches the occupant of the provided [`Square`].
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Fetches the occupant at raw `(file, rank)` coordinates, the boundary
    /// form for callers that do not hold a [`Square`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::Board;
    /// let board = Board::default();
    /// assert!(board.occupant(0, 0).unwrap().is_some());
    /// assert!(board.occupant(8, 0).is_err());
    /// assert!(board.occupant(-1, 3).is_err());
    /// ```
    pub fn occupant(&self, file: i32, rank: i32) -> Result<Option<Piece>, EngineError> {
        let range = 0..Square::SIZE as i32;
        if !range.contains(&file) || !range.contains(&rank) {
            return Err(EngineError::OutOfBounds { file, rank });
        }
        Ok(self.piece_at(Square::new_unchecked(file as u8, rank as u8)))
    }

    /// Places the provided [`Piece`] at the supplied [`Square`], replacing
    /// whatever was there. Setup-only: performs no legality checking.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Clears the supplied [`Square`] of any pieces. Setup-only: performs no
    /// legality checking.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.squares[square.index()] = None;
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Clears the entire board, removing all pieces.
    #[inline(always)]
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    /// Yields every occupied square along with its piece, top rank first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// The square the king of `color` stands on, if one exists.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(color, PieceKind::King);
        Square::iter().find(|&square| self.piece_at(square) == Some(king))
    }

    /// Mutates the board per the move's semantics: relocates the piece at
    /// `from` to `to`; additionally empties the victim square of an
    /// en-passant capture, or relocates the rook of a castle.
    ///
    /// This assumes the move has already been validated and performs no
    /// legality checking itself; applying an unvalidated move produces an
    /// inconsistent board. Always validate first.
    pub fn apply(&mut self, mv: &Move) {
        match mv.kind() {
            MoveKind::Quiet => {}
            MoveKind::EnPassant { victim } => self.clear(victim),
            MoveKind::Castle => {
                // The rook moves too: kingside file 7 -> 5, queenside 0 -> 3.
                let side = if mv.to().file() > mv.from().file() {
                    CastleSide::Kingside
                } else {
                    CastleSide::Queenside
                };
                let rank = mv.from().rank();
                let rook = self.take(Square::new_unchecked(side.rook_home_file(), rank));
                self.squares[Square::new_unchecked(side.rook_destination_file(), rank).index()] =
                    rook;
            }
        }

        let piece = self.take(mv.from());
        self.squares[mv.to().index()] = piece;
    }

    /// Returns `true` iff the destination is not occupied by a same-side
    /// piece (castle moves delegate to the castle-possibility check).
    ///
    /// Does not check whether the mover's own king ends up in check; that is
    /// [`Board::is_legal`]'s job.
    pub fn is_possible(&self, mv: &Move) -> bool {
        if let Some(side) = mv.castle_side() {
            let Some(color) = color_of_home_rank(mv.from().rank()) else {
                return false;
            };
            return self.is_possible_castle(color, side);
        }

        let Some(piece) = self.piece_at(mv.from()) else {
            return false;
        };

        match self.piece_at(mv.to()) {
            Some(target) => target.color() != piece.color(),
            None => true,
        }
    }

    /// Returns `true` iff, after simulating the move on a copy of the board,
    /// the side that moved is not in check.
    ///
    /// Castle moves are judged by their own rule: the king may not castle
    /// out of, through, or into an attacked square.
    pub fn is_legal(&self, mv: &Move) -> bool {
        if let Some(side) = mv.castle_side() {
            let Some(color) = color_of_home_rank(mv.from().rank()) else {
                return false;
            };
            return self.is_legal_castle(color, side);
        }

        let Some(piece) = self.piece_at(mv.from()) else {
            return false;
        };

        let mut simulated = *self;
        simulated.apply(mv);
        !simulated.is_in_check(piece.color())
    }

    /// The canonical single-move legality predicate: possible *and* legal.
    #[inline(always)]
    pub fn is_possible_and_legal(&self, mv: &Move) -> bool {
        self.is_possible(mv) && self.is_legal(mv)
    }

    /// Returns `true` iff `color`'s king and the `side` rook stand on their
    /// home squares with every square strictly between them empty.
    ///
    /// This consults present occupancy only, never move history; it must be
    /// combined with the match state's castling rights before a castle is
    /// offered as legal.
    pub fn is_possible_castle(&self, color: Color, side: CastleSide) -> bool {
        let rank = color.home_rank();

        if self.piece_at(Square::new_unchecked(4, rank)) != Some(Piece::new(color, PieceKind::King))
        {
            return false;
        }

        let corner = Square::new_unchecked(side.rook_home_file(), rank);
        if self.piece_at(corner) != Some(Piece::new(color, PieceKind::Rook)) {
            return false;
        }

        let between = match side {
            CastleSide::Kingside => 5..7,
            CastleSide::Queenside => 1..4,
        };
        between
            .map(|file| Square::new_unchecked(file, rank))
            .all(|square| !self.has(square))
    }

    /// Returns `true` iff castling would not move the king out of, through,
    /// or into check.
    ///
    /// Only the squares the king itself occupies or transits matter; the
    /// queenside rook's b-file square may be attacked.
    pub fn is_legal_castle(&self, color: Color, side: CastleSide) -> bool {
        if self.is_in_check(color) {
            return false;
        }

        let rank = color.home_rank();
        let transit: [u8; 2] = match side {
            CastleSide::Kingside => [5, 6],
            CastleSide::Queenside => [3, 2],
        };

        transit
            .into_iter()
            .all(|file| !self.attacks(Square::new_unchecked(file, rank), color.opponent()))
    }

    /// Replaces the first pawn of `color` found on its far rank with a piece
    /// of `kind`, failing if no such pawn exists.
    pub fn promote_pawn(&mut self, color: Color, kind: PieceKind) -> Result<(), EngineError> {
        let rank = color.promotion_rank();
        let pawn = Piece::new(color, PieceKind::Pawn);

        for file in 0..Square::SIZE {
            let square = Square::new_unchecked(file, rank);
            if self.piece_at(square) == Some(pawn) {
                self.place(Piece::new(color, kind), square);
                return Ok(());
            }
        }

        Err(EngineError::NoPromotablePawn(color))
    }

    /// Returns `true` iff every occupant on the board is a king.
    ///
    /// This is the whole of the insufficient-material rule here; positions
    /// like king+bishop vs. king are not recognized as dead draws.
    pub fn is_bare_kings(&self) -> bool {
        self.iter().all(|(_, piece)| piece.is_king())
    }
}

/// The color whose back rank this is, if it is a back rank at all.
#[inline(always)]
const fn color_of_home_rank(rank: u8) -> Option<Color> {
    match rank {
        7 => Some(Color::White),
        0 => Some(Color::Black),
        _ => None,
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

impl IndexMut<Square> for Board {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self.squares[index.index()]
    }
}

impl fmt::Display for Board {
    /// Rank-by-rank pictorial dump, top rank first, with `.` as the filler
    /// for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..Square::SIZE {
            write!(f, "{}| ", Square::SIZE - rank)?;
            for file in 0..Square::SIZE {
                let square = Square::new_unchecked(file, rank);
                match self.piece_at(square) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..Square::SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in 0..Square::SIZE {
            write!(f, "{} ", (b'a' + file) as char)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
