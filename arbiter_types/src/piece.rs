/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

/// One of the two sides in a match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Number of colors.
    pub const COUNT: usize = 2;

    /// The other color.
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Creates a `usize` for indexing into per-color arrays.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Rank delta in which this color's pawns advance.
    ///
    /// White pawns march toward rank 0 at the top of the board, Black pawns
    /// toward rank 7 at the bottom.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The rank this color's king and rooks start on.
    #[inline(always)]
    pub const fn home_rank(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The rank this color's pawns start on.
    #[inline(always)]
    pub const fn pawn_rank(&self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The far rank on which this color's pawns promote.
    #[inline(always)]
    pub const fn promotion_rank(&self) -> u8 {
        match self {
            Self::White => 0,
            Self::Black => 7,
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" | "W" => Ok(Self::White),
            "b" | "B" => Ok(Self::Black),
            _ => bail!("color string must be `w` or `b`, got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => write!(f, "w"),
            Self::Black => write!(f, "b"),
        }
    }
}

/// The kind of a chess piece, independent of its color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// All piece kinds.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// The uppercase FEN/SAN letter of this kind.
    #[inline(always)]
    pub const fn letter(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Creates a [`PieceKind`] from an uppercase FEN/SAN letter.
    pub fn from_letter(letter: char) -> Result<Self> {
        match letter {
            'P' => Ok(Self::Pawn),
            'N' => Ok(Self::Knight),
            'B' => Ok(Self::Bishop),
            'R' => Ok(Self::Rook),
            'Q' => Ok(Self::Queen),
            'K' => Ok(Self::King),
            _ => bail!("{letter:?} is not a piece letter"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A piece of a given kind and color.
///
/// Equality is structural: two pieces are equal when both kind and color
/// match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`].
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// The color of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The kind of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece is a pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a king.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// The FEN character of this piece: uppercase for White, lowercase for
    /// Black.
    ///
    /// # Example
    /// ```
    /// # use arbiter_types::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Knight).char(), 'N');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Queen).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    /// Creates a [`Piece`] from a FEN character.
    pub fn from_uci(c: char) -> Result<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = PieceKind::from_letter(c.to_ascii_uppercase())?;
        Ok(Self::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_char_round_trip() {
        for kind in PieceKind::ALL {
            for color in [Color::White, Color::Black] {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_uci(piece.char()).unwrap(), piece);
            }
        }
        assert!(Piece::from_uci('x').is_err());
    }

    #[test]
    fn test_color_geometry() {
        assert_eq!(Color::White.home_rank(), 7);
        assert_eq!(Color::Black.home_rank(), 0);
        assert_eq!(Color::White.pawn_rank(), 6);
        assert_eq!(Color::Black.pawn_rank(), 1);
        assert_eq!(Color::White.promotion_rank(), 0);
        assert_eq!(Color::Black.promotion_rank(), 7);
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.opponent(), Color::Black);
    }
}
