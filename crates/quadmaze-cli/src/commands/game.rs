//! `game` subcommands.

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use quadmaze_lib::{Coordinate, Game, GameStatus};

use super::Workspace;
use crate::output::{game_summary, print_json};

#[derive(Subcommand, Debug)]
pub enum GameCommand {
    /// Start a game on a playable maze and print it as JSON.
    Start {
        #[arg(long)]
        maze: String,
        #[arg(long)]
        name: String,
    },
    /// Print a game as JSON.
    Get { id: String },
    /// Move the player to an adjacent spot.
    Move {
        id: String,
        /// Target coordinate as `X,Y`.
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinate,
    },
    Delete { id: String },
    /// List games whose name contains any whitespace-separated term.
    Query { pattern: String },
}

#[derive(Serialize)]
struct GameListing<'a> {
    id: &'a str,
    name: &'a str,
    maze_id: &'a str,
    status: GameStatus,
    current_spot: &'a str,
}

impl<'a> From<&'a Game> for GameListing<'a> {
    fn from(game: &'a Game) -> Self {
        Self {
            id: &game.id,
            name: &game.name,
            maze_id: &game.maze_id,
            status: game.status(),
            current_spot: &game.player_stats.current_spot,
        }
    }
}

pub fn run(workspace: &Workspace, command: GameCommand) -> Result<()> {
    let games = &workspace.games;
    match command {
        GameCommand::Start { maze, name } => {
            let game = games
                .start(&maze, &name)
                .with_context(|| format!("failed to start a game on maze {maze}"))?;
            print_json(&game)?;
            eprintln!("{}", game_summary(&game));
        }
        GameCommand::Get { id } => {
            let game = games.get(&id)?;
            print_json(&game)?;
        }
        GameCommand::Move { id, to } => {
            let game = games
                .move_to(&id, &to.key())
                .with_context(|| format!("failed to move to {to}"))?;
            print_json(&game)?;
            eprintln!("{}", game_summary(&game));
        }
        GameCommand::Delete { id } => {
            games.delete(&id)?;
            println!("deleted {id}");
        }
        GameCommand::Query { pattern } => {
            let found = games.query(&pattern)?;
            let listing: Vec<GameListing<'_>> = found.iter().map(GameListing::from).collect();
            print_json(&listing)?;
        }
    }
    Ok(())
}
