/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Move, Position};

/// Counts the number of positions reachable from `position` in exactly
/// `depth` plies, by generating and applying every legal move recursively.
///
/// Perft is the standard torture test for a move generator: a single wrong
/// legality rule shifts the node count at some depth.
///
/// One caveat when comparing against published reference values: promotion
/// is a separate step in this engine, so a pawn arriving on its far rank
/// counts as one node, not four. Reference counts match only at depths where
/// no promotion can occur.
pub fn perft(position: &Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    // Recursively accumulate the nodes from the remaining depths
    position
        .legal_moves_for(position.side_to_move())
        .into_iter()
        .fold(0, |nodes, mv| {
            nodes + perft(&position.with_move_made(&mv), depth - 1)
        })
}

/// Like [`perft`], but returns the node count below each move available at
/// the root, for pinpointing which branch disagrees with a reference.
pub fn splitperft(position: &Position, depth: usize) -> Vec<(Move, u64)> {
    position
        .legal_moves_for(position.side_to_move())
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.with_move_made(&mv), depth.saturating_sub(1));
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use arbiter_types::FEN_KIWIPETE;

    use super::*;

    #[test]
    fn test_perft_startpos() {
        let pos = Position::default();
        assert_eq!(perft(&pos, 0), 1);
        assert_eq!(perft(&pos, 1), 20);
        assert_eq!(perft(&pos, 2), 400);
        assert_eq!(perft(&pos, 3), 8902);
    }

    #[test]
    fn test_perft_kiwipete() {
        // Castling, en passant, pins, and checks all live in this position
        let pos = Position::from_fen(FEN_KIWIPETE).unwrap();
        assert_eq!(perft(&pos, 1), 48);
        assert_eq!(perft(&pos, 2), 2039);
    }

    #[test]
    fn test_splitperft_sums_to_perft() {
        let pos = Position::default();
        let split = splitperft(&pos, 2);
        assert_eq!(split.len(), 20);
        let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();
        assert_eq!(total, perft(&pos, 2));
    }
}
