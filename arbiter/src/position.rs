/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};
use arbiter_types::{Color, Piece, PieceKind, Square, FEN_STARTPOS};

use crate::{Board, CastleSide, EngineError, Move, MoveList, notation};

/// Represents the castling rights of a single player.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub struct CastlingRights {
    pub(crate) kingside: bool,
    pub(crate) queenside: bool,
}

impl CastlingRights {
    /// Rights to castle on both wings.
    pub const BOTH: Self = Self {
        kingside: true,
        queenside: true,
    };

    /// No rights on either wing.
    pub const NONE: Self = Self {
        kingside: false,
        queenside: false,
    };

    /// Returns `true` if castling on `side` has not been forfeited.
    #[inline(always)]
    pub const fn allows(&self, side: CastleSide) -> bool {
        match side {
            CastleSide::Kingside => self.kingside,
            CastleSide::Queenside => self.queenside,
        }
    }

    /// Forfeits the right to castle on `side`. Clearing is one-way; there is
    /// no method to restore a right.
    #[inline(always)]
    pub fn forfeit(&mut self, side: CastleSide) {
        match side {
            CastleSide::Kingside => self.kingside = false,
            CastleSide::Queenside => self.queenside = false,
        }
    }
}

/// The state of a match as reported after every accepted move.
///
/// `Checkmate` and `Check` carry a [`Color`]: the *winner* for checkmate, the
/// side whose king is attacked for check.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Status {
    /// Play continues, nothing remarkable.
    Normal,

    /// The given side is in check but has a legal reply.
    Check(Color),

    /// The side to move has no legal reply and is in check; the given side
    /// (its opponent) wins.
    Checkmate(Color),

    /// The side to move has no legal reply but is not in check.
    Stalemate,

    /// One hundred halfmoves have passed without a capture.
    FiftyMoveDraw,

    /// Only kings remain on the board.
    InsufficientMaterialDraw,
}

impl Status {
    /// Returns `true` if this status ends the match.
    #[inline(always)]
    pub const fn is_game_over(&self) -> bool {
        !matches!(self, Self::Normal | Self::Check(_))
    }

    /// The movetext result token for a finished game (`1-0`, `0-1`, or
    /// `1/2-1/2`), or `None` while play continues.
    pub const fn result_str(&self) -> Option<&'static str> {
        match self {
            Self::Checkmate(Color::White) => Some("1-0"),
            Self::Checkmate(Color::Black) => Some("0-1"),
            Self::Stalemate | Self::FiftyMoveDraw | Self::InsufficientMaterialDraw => {
                Some("1/2-1/2")
            }
            Self::Normal | Self::Check(_) => None,
        }
    }
}

/// The full state of a match: a [`Board`] plus the cross-move bookkeeping
/// (side to move, castling rights, en-passant target, and move counters).
///
/// Analogous to a FEN string.
///
/// A `Position` owns its board exclusively. Every what-if evaluation during
/// legality checking happens on an independent copy; the authoritative board
/// mutates exactly once per accepted move.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Position {
    board: Board,

    /// The [`Color`] of the current player.
    side_to_move: Color,

    /// Castling rights for each player.
    castling_rights: [CastlingRights; Color::COUNT],

    /// The square a pawn skipped over on the previous move's double advance,
    /// eligible as an en-passant destination for exactly one reply.
    ep_square: Option<Square>,

    /// Halfmoves since the last capture. Pawn advances do *not* reset this
    /// counter here, unlike under FIDE rules.
    halfmove: u32,

    /// Number of completed move pairs since the beginning of the game.
    fullmove: u32,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    ///
    /// # Example
    /// ```
    /// # use arbiter::Position;
    /// let state = Position::new();
    /// assert_eq!(state.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Color::White,
            castling_rights: [CastlingRights::NONE; Color::COUNT],
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::new();
        let mut split = fen.trim().split(' ');

        let placements = split.next().ok_or(anyhow!(
            "Invalid FEN string: FEN string must have piece placements."
        ))?;
        pos.board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        pos.side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("KQkq");
        pos.castling_rights[Color::White.index()].kingside = castling.contains('K');
        pos.castling_rights[Color::White.index()].queenside = castling.contains('Q');
        pos.castling_rights[Color::Black.index()].kingside = castling.contains('k');
        pos.castling_rights[Color::Black.index()].queenside = castling.contains('q');

        let en_passant_target = split.next().unwrap_or("-");
        pos.ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        pos.halfmove = halfmove.parse().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid halfmove counter. Got {halfmove}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        pos.fullmove = fullmove.parse().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid fullmove counter. Got {fullmove}"
        )))?;

        Ok(pos)
    }

    /// Generates a FEN string from this [`Position`].
    pub fn to_fen(&self) -> String {
        let placements = self.board.to_fen();
        let active_color = self.side_to_move;
        let castling = self.castling_rights_uci();

        let en_passant_target = match self.ep_square {
            Some(square) => square.to_uci(),
            None => String::from("-"),
        };

        let halfmove = self.halfmove;
        let fullmove = self.fullmove;

        format!("{placements} {active_color} {castling} {en_passant_target} {halfmove} {fullmove}")
    }

    /// Renders the castling-rights field of a FEN string.
    pub fn castling_rights_uci(&self) -> String {
        let mut castling = String::with_capacity(4);

        if self.castling_rights[Color::White.index()].kingside {
            castling.push('K');
        }
        if self.castling_rights[Color::White.index()].queenside {
            castling.push('Q');
        }
        if self.castling_rights[Color::Black.index()].kingside {
            castling.push('k');
        }
        if self.castling_rights[Color::Black.index()].queenside {
            castling.push('q');
        }

        // If no side can castle, use a hyphen
        if castling.is_empty() {
            castling = String::from("-");
        }
        castling
    }

    /// Fetches this position's [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutably fetches this position's [`Board`], for direct setup.
    ///
    /// Bookkeeping (rights, counters, the en-passant target) is untouched by
    /// board edits; adjust it via FEN if a setup needs it.
    #[inline(always)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`]:
    /// the one the double-advancing pawn skipped over.
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] for `color` in the current position.
    #[inline(always)]
    pub const fn castling_rights_for(&self, color: Color) -> CastlingRights {
        self.castling_rights[color.index()]
    }

    /// Returns the half-move counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> u32 {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> u32 {
        self.fullmove
    }

    /// Toggles the current player from White to Black (or vice versa).
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Every legal move available to `side`: board-level legal moves for
    /// each of its occupied squares, plus a castle move per unforfeited
    /// right that survives the occupancy and attack rules, plus any
    /// en-passant capture against the current target.
    pub fn legal_moves_for(&self, side: Color) -> MoveList {
        let mut moves = MoveList::new();

        for (square, piece) in self.board.iter() {
            if piece.color() == side {
                moves.extend(self.board.legal_moves_from(square));
            }
        }

        for castle_side in [CastleSide::Kingside, CastleSide::Queenside] {
            if self.castling_rights[side.index()].allows(castle_side) {
                let mv = Move::castle(side, castle_side);
                if self.board.is_possible_and_legal(&mv) {
                    moves.push(mv);
                }
            }
        }

        if let Some(ep) = self.ep_square {
            moves.extend(self.en_passant_moves(side, ep));
        }

        moves
    }

    /// The en-passant captures available to `side` against the target
    /// square `ep`: one per pawn standing beside the victim, each still
    /// subject to the no-self-check rule.
    fn en_passant_moves(&self, side: Color, ep: Square) -> MoveList {
        let mut moves = MoveList::new();
        let pawn = Piece::new(side, PieceKind::Pawn);

        for file_delta in [-1, 1] {
            // The capturing pawn sits one rank short of the target, on an
            // adjacent file; the victim shares the capturer's rank and the
            // target's file.
            let Some(from) = ep.offset(file_delta, -side.forward()) else {
                continue;
            };
            if self.board.piece_at(from) != Some(pawn) {
                continue;
            }

            let victim = Square::new_unchecked(ep.file(), from.rank());
            let mv = Move::en_passant(from, ep, victim);
            if self.board.is_possible_and_legal(&mv) {
                moves.push(mv);
            }
        }

        moves
    }

    /// Validates and applies a move for the side to move, returning the
    /// resulting [`Status`].
    ///
    /// A move outside the current legal-move set is rejected with
    /// [`EngineError::IllegalMove`] and the position is left untouched. A
    /// promotion tag is honored only when the move actually carries a pawn
    /// onto its far rank; anywhere else it is likewise rejected.
    pub fn apply_move(&mut self, mv: &Move) -> Result<Status, EngineError> {
        let legal = self.legal_moves_for(self.side_to_move);
        if !legal.iter().any(|candidate| candidate.same_action(mv)) {
            return Err(EngineError::IllegalMove(*mv));
        }

        if mv.promotion().is_some() && !self.is_promoting_move(mv) {
            return Err(EngineError::IllegalMove(*mv));
        }

        self.make_move(mv);
        Ok(self.status())
    }

    /// Returns `true` if `mv` pushes a pawn of the side to move onto its far
    /// rank.
    fn is_promoting_move(&self, mv: &Move) -> bool {
        self.board
            .piece_at(mv.from())
            .is_some_and(|piece| piece.is_pawn())
            && mv.to().rank() == self.side_to_move.promotion_rank()
    }

    /// Applies the move. No enforcement of legality.
    ///
    /// This is the raw fast path behind [`Position::apply_move`], useful
    /// when the move is already known to come from
    /// [`Position::legal_moves_for`] (as in perft). Feeding it anything else
    /// is a contract violation that corrupts the position.
    pub fn make_move(&mut self, mv: &Move) {
        let mover = self.side_to_move;
        let moved = self.board.piece_at(mv.from());
        let is_capture = self.board.has(mv.to()) || mv.is_en_passant();

        // Rights clear one-way and never come back. A rook is keyed by the
        // corner it leaves; checking its color is unnecessary, since a White
        // rook leaving a8 means the Black rook is long gone from there.
        if let Some(piece) = moved {
            match piece.kind() {
                PieceKind::King => {
                    self.castling_rights[piece.color().index()] = CastlingRights::NONE;
                }
                PieceKind::Rook => {
                    for color in [Color::White, Color::Black] {
                        for side in [CastleSide::Kingside, CastleSide::Queenside] {
                            let corner =
                                Square::new_unchecked(side.rook_home_file(), color.home_rank());
                            if mv.from() == corner {
                                self.castling_rights[color.index()].forfeit(side);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // The en-passant window lasts exactly one ply: set it only on a
        // double pawn advance, to the square the pawn skipped over.
        self.ep_square = None;
        if let Some(piece) = moved {
            if piece.is_pawn() && mv.from().rank().abs_diff(mv.to().rank()) == 2 {
                self.ep_square = mv.from().offset(0, piece.color().forward());
            }
        }

        // Captures reset the fifty-move clock; pawn advances do not.
        if is_capture {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }
        if mover == Color::Black {
            self.fullmove += 1;
        }

        self.board.apply(mv);

        if let Some(kind) = mv.promotion() {
            // The tag was validated (or vouched for) by the caller, so the
            // pawn is now standing on `to`.
            self.board.place(Piece::new(mover, kind), mv.to());
        }

        self.toggle_side_to_move();
    }

    /// Copies `self` and returns a [`Position`] after having applied the
    /// provided [`Move`]. No enforcement of legality.
    #[inline(always)]
    pub fn with_move_made(&self, mv: &Move) -> Self {
        let mut copied = *self;
        copied.make_move(mv);
        copied
    }

    /// Derives the state of the match for the side about to move.
    ///
    /// Precedence is deliberate and preserved from the engine this one is
    /// modeled on: clock and material draws are reported even when the
    /// position is also checkmate.
    pub fn status(&self) -> Status {
        let side = self.side_to_move;

        if self.halfmove >= 100 {
            return Status::FiftyMoveDraw;
        }
        if self.board.is_bare_kings() {
            return Status::InsufficientMaterialDraw;
        }

        let in_check = self.board.is_in_check(side);
        let any_reply = !self.legal_moves_for(side).is_empty();

        match (any_reply, in_check) {
            (false, true) => Status::Checkmate(side.opponent()),
            (false, false) => Status::Stalemate,
            (true, true) => Status::Check(side),
            (true, false) => Status::Normal,
        }
    }

    /// Replaces a pawn of `side` resting on its far rank with a piece of
    /// `new_kind`, in place.
    ///
    /// This is the two-step promotion flow: the mover applies the pawn's
    /// final advance, then promotes before the next move is made. Fails with
    /// [`EngineError::NoPromotablePawn`] if no eligible pawn exists, leaving
    /// the position untouched.
    pub fn promote_pawn(&mut self, side: Color, new_kind: PieceKind) -> Result<(), EngineError> {
        self.board.promote_pawn(side, new_kind)
    }

    /// Encodes `mv` in short algebraic notation against the current board.
    ///
    /// Call this *before* applying the move; SAN is defined against the
    /// position the move is played in.
    #[inline(always)]
    pub fn san(&self, mv: &Move) -> String {
        notation::san(&self.board, mv)
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        writeln!(f)?;
        writeln!(f, "          FEN: {}", self.to_fen())?;
        writeln!(f, "         Side: {}", self.side_to_move)?;
        writeln!(f, "     Castling: {}", self.castling_rights_uci())?;
        let ep = self
            .ep_square
            .map(|s| s.to_uci())
            .unwrap_or(String::from("-"));
        writeln!(f, "           EP: {ep}")?;
        writeln!(f, "    Half-move: {}", self.halfmove)?;
        write!(f, "    Full-move: {}", self.fullmove)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(uci: &str) -> Square {
        Square::from_uci(uci).unwrap()
    }

    fn find_move(position: &Position, text: &str) -> Move {
        Move::from_long_algebraic(position, text).unwrap()
    }

    #[test]
    fn test_startpos_has_twenty_moves() {
        let pos = Position::default();
        let moves = pos.legal_moves_for(Color::White);
        assert_eq!(moves.len(), 20);

        // 16 pawn moves, 4 knight moves
        let pawn_moves = moves
            .iter()
            .filter(|mv| {
                pos.board()
                    .piece_at(mv.from())
                    .is_some_and(|piece| piece.is_pawn())
            })
            .count();
        assert_eq!(pawn_moves, 16);

        // Black has 20 as well
        assert_eq!(pos.legal_moves_for(Color::Black).len(), 20);
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            FEN_STARTPOS,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 12 34",
            "4k3/8/8/8/8/8/8/4K3 b - - 99 120",
        ];
        for fen in fens {
            assert_eq!(Position::from_fen(fen).unwrap().to_fen(), fen);
        }
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let mut pos = Position::default();
        let before = pos;

        // Pawns cannot move three squares
        let bogus = Move::new(sq("e2"), sq("e5"));
        assert_eq!(
            pos.apply_move(&bogus),
            Err(EngineError::IllegalMove(bogus))
        );
        // The failed attempt mutated nothing
        assert_eq!(pos, before);

        // Not Black's turn
        let out_of_turn = Move::new(sq("e7"), sq("e5"));
        assert!(pos.apply_move(&out_of_turn).is_err());
        assert_eq!(pos, before);
    }

    #[test]
    fn test_apply_move_flips_turn_and_counts() {
        let mut pos = Position::default();
        assert_eq!(pos.side_to_move(), Color::White);

        pos.apply_move(&find_move(&pos, "g1f3")).unwrap();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.fullmove(), 1);
        assert_eq!(pos.halfmove(), 1);

        pos.apply_move(&find_move(&pos, "b8c6")).unwrap();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.fullmove(), 2);
        assert_eq!(pos.halfmove(), 2);
    }

    #[test]
    fn test_halfmove_clock_resets_on_capture_only() {
        let mut pos = Position::default();

        // A pawn advance does NOT reset the clock in this engine
        pos.apply_move(&find_move(&pos, "e2e4")).unwrap();
        assert_eq!(pos.halfmove(), 1);
        pos.apply_move(&find_move(&pos, "d7d5")).unwrap();
        assert_eq!(pos.halfmove(), 2);

        // A capture does
        pos.apply_move(&find_move(&pos, "e4d5")).unwrap();
        assert_eq!(pos.halfmove(), 0);
    }

    #[test]
    fn test_en_passant_full_cycle() {
        // White pawn on e5; Black about to double-push d7d5
        let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        pos.apply_move(&find_move(&pos, "d7d5")).unwrap();
        assert_eq!(pos.ep_square(), Some(sq("d6")));

        let moves = pos.legal_moves_for(Color::White);
        let ep = moves
            .iter()
            .find(|mv| mv.is_en_passant())
            .expect("en-passant capture must be offered");
        assert_eq!(ep.from(), sq("e5"));
        assert_eq!(ep.to(), sq("d6"));
        assert_eq!(ep.en_passant_victim(), Some(sq("d5")));

        let ep = *ep;
        pos.apply_move(&ep).unwrap();
        // The victim square is emptied even though it was not the destination
        assert_eq!(pos.board().piece_at(sq("d5")), None);
        assert_eq!(
            pos.board().piece_at(sq("d6")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        // En passant is a capture: the clock resets
        assert_eq!(pos.halfmove(), 0);
        // And the window has closed
        assert_eq!(pos.ep_square(), None);
    }

    #[test]
    fn test_en_passant_window_expires_after_one_ply() {
        let mut pos = Position::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1").unwrap();
        pos.apply_move(&find_move(&pos, "d7d5")).unwrap();
        assert!(pos.ep_square().is_some());

        // White declines the capture
        pos.apply_move(&find_move(&pos, "e1e2")).unwrap();
        pos.apply_move(&find_move(&pos, "e8e7")).unwrap();

        // No en-passant capture is offered any longer
        assert!(pos
            .legal_moves_for(Color::White)
            .iter()
            .all(|mv| !mv.is_en_passant()));
    }

    #[test]
    fn test_castling_present_with_clear_ranks_and_rights() {
        let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        assert_eq!(pos.castling_rights_for(Color::White), CastlingRights::BOTH);

        let moves = pos.legal_moves_for(Color::White);
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));
    }

    #[test]
    fn test_castling_blocked_by_attacked_transit_square() {
        // Black bishop on c4 covers f1, the square the king passes through
        let pos = Position::from_fen("r3k2r/8/8/8/2b5/8/8/R3K2R w KQkq - 0 1").unwrap();
        let moves = pos.legal_moves_for(Color::White);

        assert!(!moves.contains(&Move::castle(Color::White, CastleSide::Kingside)));
        // The queenside path is unaffected
        assert!(moves.contains(&Move::castle(Color::White, CastleSide::Queenside)));
    }

    #[test]
    fn test_castling_rights_forfeited_by_king_move() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        // Moving the White king should remove White's castling rights
        pos.apply_move(&find_move(&pos, "e1d1")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "kq");

        // Same for Black
        pos.apply_move(&find_move(&pos, "e8f8")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "-");

        // Moving the kings back should NOT restore castling rights
        pos.apply_move(&find_move(&pos, "d1e1")).unwrap();
        pos.apply_move(&find_move(&pos, "f8e8")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "-");
        assert!(pos
            .legal_moves_for(Color::White)
            .iter()
            .all(|mv| !mv.is_castle()));
    }

    #[test]
    fn test_castling_rights_forfeited_by_rook_move() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        // Moving a rook disables that wing only
        pos.apply_move(&find_move(&pos, "a1b1")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "Kkq");

        pos.apply_move(&find_move(&pos, "a8b8")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "Kk");

        // Returning the rooks restores nothing
        pos.apply_move(&find_move(&pos, "b1a1")).unwrap();
        pos.apply_move(&find_move(&pos, "b8a8")).unwrap();
        assert_eq!(pos.castling_rights_uci(), "Kk");
    }

    #[test]
    fn test_castling_applies_rook_and_forfeits_rights() {
        let mut pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();

        pos.apply_move(&Move::castle(Color::White, CastleSide::Kingside))
            .unwrap();
        assert_eq!(
            pos.board().piece_at(sq("g1")),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            pos.board().piece_at(sq("f1")),
            Some(Piece::new(Color::White, PieceKind::Rook))
        );
        assert_eq!(pos.castling_rights_uci(), "kq");

        pos.apply_move(&Move::castle(Color::Black, CastleSide::Queenside))
            .unwrap();
        assert_eq!(
            pos.board().piece_at(sq("c8")),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
        assert_eq!(
            pos.board().piece_at(sq("d8")),
            Some(Piece::new(Color::Black, PieceKind::Rook))
        );
        assert_eq!(pos.castling_rights_uci(), "-");
    }

    #[test]
    fn test_status_check() {
        // Black rook drops to e-file: White king on e1 is in check but can run
        let pos = Position::from_fen("4r3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        assert_eq!(pos.status(), Status::Check(Color::White));
    }

    #[test]
    fn test_status_checkmate() {
        // Back-rank mate: White king h1 boxed in by its own pawns, Black rook e1
        let pos = Position::from_fen("4k3/8/8/8/8/8/6PP/4r2K w - - 0 1").unwrap();
        assert_eq!(pos.status(), Status::Checkmate(Color::Black));
        assert!(pos.status().is_game_over());
        assert_eq!(pos.status().result_str(), Some("0-1"));
    }

    #[test]
    fn test_status_stalemate() {
        // White king a1, Black queen b3: no legal reply, not in check
        let pos = Position::from_fen("4k3/8/8/8/8/1q6/8/K7 w - - 0 1").unwrap();
        assert_eq!(pos.status(), Status::Stalemate);
        assert_eq!(pos.status().result_str(), Some("1/2-1/2"));
    }

    #[test]
    fn test_status_fifty_move_draw_precedes_everything() {
        // Ordinary position, clock expired
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 100 80").unwrap();
        assert_eq!(pos.status(), Status::FiftyMoveDraw);

        // Even a checkmate on the board yields to the expired clock
        let pos = Position::from_fen("4k3/8/8/8/8/8/6PP/4r2K w - - 100 80").unwrap();
        assert_eq!(pos.status(), Status::FiftyMoveDraw);
    }

    #[test]
    fn test_status_bare_kings_draw() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 3 40").unwrap();
        assert_eq!(pos.status(), Status::InsufficientMaterialDraw);

        // One extra pawn is still material enough to play on
        let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 3 40").unwrap();
        assert_eq!(pos.status(), Status::Normal);
    }

    #[test]
    fn test_promotion_via_tagged_move() {
        // Black king on a4, on the long diagonal from e8
        let mut pos = Position::from_fen("8/4P3/8/8/k7/8/8/4K3 w - - 0 1").unwrap();
        let push = find_move(&pos, "e7e8").with_promotion(PieceKind::Queen);

        let status = pos.apply_move(&push).unwrap();
        assert_eq!(
            pos.board().piece_at(sq("e8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
        // The fresh queen gives check along e8-a4
        assert_eq!(status, Status::Check(Color::Black));
    }

    #[test]
    fn test_promotion_via_promote_pawn() {
        let mut pos = Position::from_fen("8/4P3/8/8/8/k7/8/4K3 w - - 0 1").unwrap();
        pos.apply_move(&find_move(&pos, "e7e8")).unwrap();

        // The pawn rests on the far rank until the mover chooses
        assert_eq!(
            pos.board().piece_at(sq("e8")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        pos.promote_pawn(Color::White, PieceKind::Knight).unwrap();
        assert_eq!(
            pos.board().piece_at(sq("e8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );

        // A second promotion attempt finds nothing to promote
        assert_eq!(
            pos.promote_pawn(Color::White, PieceKind::Queen),
            Err(EngineError::NoPromotablePawn(Color::White))
        );
    }

    #[test]
    fn test_promotion_tag_rejected_off_far_rank() {
        let mut pos = Position::default();
        let tagged = Move::new(sq("e2"), sq("e4")).with_promotion(PieceKind::Queen);
        assert!(matches!(
            pos.apply_move(&tagged),
            Err(EngineError::IllegalMove(_))
        ));
    }

    #[test]
    fn test_what_if_evaluation_leaves_position_untouched() {
        let pos = Position::default();
        let fen = pos.to_fen();

        // Generating moves and probing status simulate many moves internally
        let _ = pos.legal_moves_for(Color::White);
        let _ = pos.status();
        let copy = pos.with_move_made(&Move::new(sq("e2"), sq("e4")));

        assert_eq!(pos.to_fen(), fen);
        assert_ne!(copy.to_fen(), fen);
    }
}
