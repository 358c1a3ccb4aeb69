/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use clap::Parser;

use arbiter::{perft, Move, Position};

/// Compute total number of states reachable from a position, given a depth.
#[derive(Debug, Parser)]
struct Cli {
    /// Depth to run the perft.
    depth: usize,

    /// The FEN string of the position to run the perft.
    #[arg(required = false)]
    fen: Option<String>,

    /// List of long-algebraic moves to apply to the position before running
    /// the perft.
    #[arg(required = false)]
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Parse args appropriately
    let mut game = if let Some(fen) = &args.fen {
        Position::from_fen(fen)?
    } else {
        Position::default()
    };

    // Apply moves, if any were provided
    for mv_str in args.moves {
        let mv = Move::from_long_algebraic(&game, &mv_str)?;
        game.make_move(&mv);
    }

    println!(
        "Computing PERFT({}) of the following position:\n{}\n",
        args.depth,
        game.to_fen()
    );

    let now = Instant::now();
    let total_nodes = perft(&game, args.depth);
    let elapsed = now.elapsed();

    // Compute nodes-per-second metrics
    let nps = total_nodes as f32 / elapsed.as_secs_f32();
    let k_nps = nps / 1_000.0;

    println!("  Total Nodes:\t{total_nodes}");
    println!(" Elapsed Time:\t{elapsed:.1?}");
    println!("  Nodes / Sec:\t{nps:.0}");
    println!("K Nodes / Sec:\t{k_nps:.1}");

    Ok(())
}
