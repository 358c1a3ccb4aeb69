/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

/// A coordinate pair on the 8x8 board.
///
/// Files run `0..8` from left to right (`a` through `h`). Ranks run `0..8`
/// from the *top* of the board (Black's home rank) to the bottom (White's
/// home rank), so the algebraic digit of a rank is `8 - rank`:
///
/// ```
/// # use arbiter_types::Square;
/// let e2 = Square::new(4, 6).unwrap();
/// assert_eq!(e2.to_uci(), "e2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Width (and height) of the board, in squares.
    pub const SIZE: u8 = 8;

    /// Creates a new [`Square`] from a file and rank, failing if either
    /// coordinate lies outside `0..8`.
    ///
    /// # Example
    /// ```
    /// # use arbiter_types::Square;
    /// assert!(Square::new(0, 7).is_ok());
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    pub fn new(file: u8, rank: u8) -> Result<Self> {
        if file >= Self::SIZE || rank >= Self::SIZE {
            bail!("square coordinates ({file}, {rank}) are outside the board");
        }
        Ok(Self::new_unchecked(file, rank))
    }

    /// Creates a new [`Square`] without bounds checking.
    ///
    /// Only use this when both coordinates are already known to be in `0..8`.
    #[inline(always)]
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// The file (column) of this square, in `0..8`, left to right.
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.file
    }

    /// The rank (row) of this square, in `0..8`, top to bottom.
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Flattened index of this square, `rank * 8 + file`, in `0..64`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.rank as usize * Self::SIZE as usize + self.file as usize
    }

    /// Creates a [`Square`] from a flattened index, failing if out of range.
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!("square index {index} is outside the board");
        }
        Ok(Self::new_unchecked(
            (index % Self::SIZE as usize) as u8,
            (index / Self::SIZE as usize) as u8,
        ))
    }

    /// Returns the square `delta_file` files and `delta_rank` ranks away, or
    /// `None` if that lands off the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter_types::Square;
    /// let a8 = Square::new(0, 0).unwrap();
    /// assert_eq!(a8.offset(1, 1), Square::new(1, 1).ok());
    /// assert_eq!(a8.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub fn offset(&self, delta_file: i8, delta_rank: i8) -> Option<Self> {
        let file = self.file as i8 + delta_file;
        let rank = self.rank as i8 + delta_rank;
        if (0..Self::SIZE as i8).contains(&file) && (0..Self::SIZE as i8).contains(&rank) {
            Some(Self::new_unchecked(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Yields every square on the board, rank by rank from the top.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..Self::COUNT).map(|index| {
            Self::new_unchecked(
                (index % Self::SIZE as usize) as u8,
                (index / Self::SIZE as usize) as u8,
            )
        })
    }

    /// Creates a [`Square`] from an algebraic string like `e4`.
    ///
    /// # Example
    /// ```
    /// # use arbiter_types::Square;
    /// assert_eq!(Square::from_uci("e4").unwrap(), Square::new(4, 4).unwrap());
    /// assert!(Square::from_uci("j9").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut chars = uci.trim().chars();
        let file_char = chars
            .next()
            .ok_or(anyhow!("square string {uci:?} is missing a file"))?;
        let rank_char = chars
            .next()
            .ok_or(anyhow!("square string {uci:?} is missing a rank"))?;
        if chars.next().is_some() {
            bail!("square string {uci:?} has trailing characters");
        }

        let file = match file_char {
            'a'..='h' => file_char as u8 - b'a',
            _ => bail!("{file_char:?} is not a file letter"),
        };
        let rank = match rank_char {
            '1'..='8' => Self::SIZE - (rank_char as u8 - b'0'),
            _ => bail!("{rank_char:?} is not a rank digit"),
        };

        Ok(Self::new_unchecked(file, rank))
    }

    /// Renders this square as algebraic text like `e4`.
    pub fn to_uci(self) -> String {
        format!(
            "{}{}",
            (b'a' + self.file) as char,
            (b'0' + Self::SIZE - self.rank) as char
        )
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.to_uci(), self.file, self.rank)
    }
}
