/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::Context;
use colored::Colorize;

use arbiter::{splitperft, Move, Position};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    // Print usage if insufficient arguments provided
    if args.len() < 2 {
        println!("Usage: {} <depth> [fen] [moves]", args[0]);
        std::process::exit(1);
    }

    // Parse args appropriately
    let depth = args[1].parse().context(format!(
        "Failed to parse {:?} as depth value. Expected integer.",
        args[1]
    ))?;
    let mut game = if let Some(fen) = args.get(2) {
        Position::from_fen(fen)?
    } else {
        Position::default()
    };

    // Apply moves, if any were provided
    if args.len() > 3 {
        for mv_str in args[3].split_ascii_whitespace() {
            let mv = Move::from_long_algebraic(&game, mv_str)?;
            game.make_move(&mv);
        }
    }

    let split = splitperft(&game, depth);
    let total: u64 = split.iter().map(|(_, nodes)| nodes).sum();

    for (mv, nodes) in split {
        println!("{}: {}", mv.to_string().cyan(), nodes);
    }
    println!("\n{}\n", total.to_string().green().bold());

    Ok(())
}
