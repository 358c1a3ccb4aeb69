/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A random mover playing both sides of a full game, demonstrating the
//! engine's boundary: the mover picks from `legal_moves_for`, submits to
//! `apply_move`, and composes the movetext line from the SAN string, the
//! returned status, and the move counters. The engine itself never writes a
//! record or chooses a move.

use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use arbiter::{status_suffix, Color, PieceKind, Position, Status};

/// Play a random-vs-random game and print its movetext.
#[derive(Debug, Parser)]
struct Cli {
    /// Seed for the random mover, for reproducible games.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Maximum number of halfmoves before giving up on the game.
    #[arg(long, default_value = "600")]
    max_halfmoves: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Position::default();
    let mut movetext = String::new();
    let mut status = Status::Normal;

    for _ in 0..args.max_halfmoves {
        let mover = game.side_to_move();
        let moves = game.legal_moves_for(mover);

        let Some(&choice) = moves.as_slice().choose(&mut rng) else {
            break;
        };

        // Promote arriving pawns to a queen by tagging the move up front
        let choice = if is_promotion(&game, &choice) {
            choice.with_promotion(PieceKind::Queen)
        } else {
            choice
        };

        // SAN is defined against the pre-move position
        let san = game.san(&choice);

        if mover == Color::White {
            movetext.push_str(&format!("{}. ", game.fullmove()));
        }
        status = game.apply_move(&choice).expect("chosen move must be legal");

        movetext.push_str(&san);
        if choice.promotion().is_some() {
            movetext.push_str("=Q");
        }
        movetext.push_str(status_suffix(status));
        movetext.push(' ');

        if status.is_game_over() {
            break;
        }
    }

    if let Some(result) = status.result_str() {
        movetext.push_str(result);
    }

    println!("{movetext}");
    println!("\nFinal position ({status:?}):\n{}", game.board());

    Ok(())
}

fn is_promotion(game: &Position, mv: &arbiter::Move) -> bool {
    game.board()
        .piece_at(mv.from())
        .is_some_and(|piece| piece.is_pawn())
        && mv.to().rank() == game.side_to_move().promotion_rank()
}
