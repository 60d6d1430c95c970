//! Output formatting for command results.
//!
//! Objects are written to stdout as pretty-printed JSON; short confirmations
//! are plain text lines.

use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use quadmaze_lib::{Game, GameStatus};

/// Write `value` as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value).context("failed to encode output")?;
    writeln!(out)?;
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    write_json(stdout.lock(), value)
}

/// One-line human summary of a game, written to stderr after moves.
pub fn game_summary(game: &Game) -> String {
    let stats = &game.player_stats;
    match game.status() {
        GameStatus::Active => format!(
            "at {} | reward {} | distance {:.2} | next: {}",
            stats.current_spot,
            stats.total_reward,
            stats.distance_covered,
            stats.allowed_movements.join(" ")
        ),
        GameStatus::Finished => format!(
            "finished at {} | reward {} | distance {:.2} (minimum {:.2})",
            stats.current_spot, stats.total_reward, stats.distance_covered, game.minimum_distance
        ),
    }
}
