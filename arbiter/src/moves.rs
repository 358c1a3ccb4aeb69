/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, Result};
use arbiter_types::{Color, PieceKind, Square};

use crate::{EngineError, Position};

/// Which wing a castle move is played on.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

impl CastleSide {
    /// The file the king lands on when castling to this side.
    #[inline(always)]
    pub const fn king_destination_file(&self) -> u8 {
        match self {
            Self::Kingside => 6,
            Self::Queenside => 2,
        }
    }

    /// The file of the rook's home corner on this side.
    #[inline(always)]
    pub const fn rook_home_file(&self) -> u8 {
        match self {
            Self::Kingside => 7,
            Self::Queenside => 0,
        }
    }

    /// The file the rook lands on when castling to this side.
    #[inline(always)]
    pub const fn rook_destination_file(&self) -> u8 {
        match self {
            Self::Kingside => 5,
            Self::Queenside => 3,
        }
    }
}

/// What makes a move more than a relocation.
///
/// Castling and en passant are separate variants, so the two can never be
/// claimed by the same move, and an en-passant move cannot exist without its
/// victim square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum MoveKind {
    /// A plain relocation or capture.
    Quiet,

    /// A castle; `from`/`to` describe the king's movement.
    Castle,

    /// An en-passant capture; `victim` is the square of the pawn being
    /// captured, which is *not* the destination square.
    EnPassant { victim: Square },
}

/// A proposed transition between two squares, tagged with special-move
/// information.
///
/// A `Move` is a plain value compared structurally. It carries no proof of
/// legality; submit it to [`Position::apply_move`](crate::Position::apply_move)
/// to find out.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a plain move between two squares.
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Quiet,
            promotion: None,
        }
    }

    /// Creates the castle move for `color` on `side`. The `from`/`to`
    /// squares are the king's.
    pub fn castle(color: Color, side: CastleSide) -> Self {
        let rank = color.home_rank();
        Self {
            from: Square::new_unchecked(4, rank),
            to: Square::new_unchecked(side.king_destination_file(), rank),
            kind: MoveKind::Castle,
            promotion: None,
        }
    }

    /// Creates an en-passant capture. `to` is the square the capturing pawn
    /// lands on; `victim` is the square of the pawn being captured.
    #[inline(always)]
    pub const fn en_passant(from: Square, to: Square, victim: Square) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::EnPassant { victim },
            promotion: None,
        }
    }

    /// Returns this move with a promotion target attached.
    ///
    /// The target is only meaningful on a pawn move onto its far rank;
    /// [`Position::apply_move`](crate::Position::apply_move) rejects it
    /// anywhere else.
    #[inline(always)]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// Builds a move from raw flags, the boundary-input form.
    ///
    /// Fails with [`EngineError::MalformedMove`] if both special flags are
    /// set, or if en passant is flagged without a victim square. Prefer the
    /// typed constructors ([`Move::new`], [`Move::castle`],
    /// [`Move::en_passant`]) when not translating foreign input.
    pub fn from_flags(
        from: Square,
        to: Square,
        is_castle: bool,
        is_en_passant: bool,
        en_passant_victim: Option<Square>,
    ) -> Result<Self, EngineError> {
        let kind = match (is_castle, is_en_passant) {
            (true, true) => {
                return Err(EngineError::MalformedMove(
                    "castle and en passant cannot both be set",
                ))
            }
            (true, false) => MoveKind::Castle,
            (false, true) => MoveKind::EnPassant {
                victim: en_passant_victim.ok_or(EngineError::MalformedMove(
                    "en passant flagged without a victim square",
                ))?,
            },
            (false, false) => MoveKind::Quiet,
        };

        Ok(Self {
            from,
            to,
            kind,
            promotion: None,
        })
    }

    /// The square this move starts from (the king's, for a castle).
    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// The square this move ends on (the king's, for a castle).
    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// The special-move tag of this move.
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    /// The promotion target attached to this move, if any.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Returns `true` if this is a castle move.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        matches!(self.kind, MoveKind::Castle)
    }

    /// Returns `true` if this is an en-passant capture.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind, MoveKind::EnPassant { .. })
    }

    /// The square of the pawn captured en passant, if this is an en-passant
    /// move.
    #[inline(always)]
    pub const fn en_passant_victim(&self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant { victim } => Some(victim),
            _ => None,
        }
    }

    /// For a castle move, which wing it is played on, judged by comparing
    /// the destination file against the start file.
    #[inline(always)]
    pub const fn castle_side(&self) -> Option<CastleSide> {
        match self.kind {
            MoveKind::Castle => {
                if self.to.file() > self.from.file() {
                    Some(CastleSide::Kingside)
                } else {
                    Some(CastleSide::Queenside)
                }
            }
            _ => None,
        }
    }

    /// Returns `true` if `other` describes the same board action as `self`,
    /// ignoring any promotion tag.
    ///
    /// Used when validating submitted moves: the legal-move list is
    /// generated without promotion targets, since promotion is the mover's
    /// choice.
    #[inline(always)]
    pub fn same_action(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.kind == other.kind
    }

    /// Finds the legal move matching a long-algebraic string like `e2e4` or
    /// `e7e8q` in the given position.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, Position};
    /// let game = Position::default();
    /// let mv = Move::from_long_algebraic(&game, "g1f3").unwrap();
    /// assert_eq!(mv.to().to_uci(), "f3");
    /// ```
    pub fn from_long_algebraic(position: &Position, text: &str) -> Result<Self> {
        let text = text.trim();
        if !text.is_ascii() || text.len() < 4 {
            return Err(anyhow!("move string {text:?} is not long-algebraic"));
        }

        let from = Square::from_uci(&text[0..2])?;
        let to = Square::from_uci(&text[2..4])?;
        let promotion = match &text[4..] {
            "" => None,
            suffix => Some(PieceKind::from_letter(
                suffix
                    .chars()
                    .next()
                    .unwrap()
                    .to_ascii_uppercase(),
            )?),
        };

        let mv = position
            .legal_moves_for(position.side_to_move())
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to)
            .ok_or(anyhow!("move {text:?} is not legal here"))?;

        Ok(match promotion {
            Some(kind) => mv.with_promotion(kind),
            None => mv,
        })
    }
}

impl fmt::Display for Move {
    /// Long-algebraic rendering: origin square, destination square, and a
    /// lowercase promotion letter if present (`e2e4`, `e7e8q`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
