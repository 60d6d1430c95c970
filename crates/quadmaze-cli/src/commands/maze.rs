//! `maze` subcommands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::de::DeserializeOwned;
use serde::Serialize;

use quadmaze_lib::{Coordinate, Maze, MazeUpdate, NewMaze, PathRequest};

use super::Workspace;
use crate::output::print_json;

#[derive(Subcommand, Debug)]
pub enum MazeCommand {
    /// Create a maze from a JSON definition and print its id.
    Create {
        /// JSON file with `name`, optional `center`, `spots` and `paths`.
        #[arg(long)]
        file: PathBuf,
    },
    /// Print a maze as JSON.
    Get { id: String },
    /// List mazes whose name contains any whitespace-separated term.
    Query { pattern: String },
    /// Apply a JSON update (`center`, `spots`, `paths`) to an existing maze.
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete a maze. Games started from it keep their snapshot.
    Delete { id: String },
    /// Remove the spot at a coordinate together with its paths.
    DeleteSpot {
        id: String,
        /// Coordinate as `X,Y`.
        #[arg(long, allow_hyphen_values = true)]
        at: Coordinate,
    },
    /// Remove the path between two coordinates.
    DeletePath {
        id: String,
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinate,
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinate,
    },
}

/// Compact listing entry for `maze query`.
#[derive(Serialize)]
struct MazeListing<'a> {
    id: &'a str,
    name: &'a str,
    center: Coordinate,
    spots: usize,
    paths: usize,
}

impl<'a> From<&'a Maze> for MazeListing<'a> {
    fn from(maze: &'a Maze) -> Self {
        Self {
            id: &maze.id,
            name: &maze.name,
            center: maze.center(),
            spots: maze.spots().len(),
            paths: maze.paths().edge_count(),
        }
    }
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn run(workspace: &Workspace, command: MazeCommand) -> Result<()> {
    let mazes = &workspace.mazes;
    match command {
        MazeCommand::Create { file } => {
            let request: NewMaze = read_document(&file)?;
            let id = mazes.create(request).context("failed to create maze")?;
            println!("{id}");
        }
        MazeCommand::Get { id } => {
            let maze = mazes.get(&id)?;
            print_json(&maze)?;
        }
        MazeCommand::Query { pattern } => {
            let found = mazes.query(&pattern)?;
            let listing: Vec<MazeListing<'_>> = found.iter().map(MazeListing::from).collect();
            print_json(&listing)?;
        }
        MazeCommand::Update { id, file } => {
            let update: MazeUpdate = read_document(&file)?;
            let maze = mazes
                .update(&id, update)
                .with_context(|| format!("failed to update maze {id}"))?;
            print_json(&maze)?;
        }
        MazeCommand::Delete { id } => {
            mazes.delete(&id)?;
            println!("deleted {id}");
        }
        MazeCommand::DeleteSpot { id, at } => {
            mazes.delete_spot(&id, at)?;
            println!("deleted spot {at}");
        }
        MazeCommand::DeletePath { id, from, to } => {
            mazes.delete_path(&id, PathRequest::new(from, to))?;
            println!("deleted path {from} - {to}");
        }
    }
    Ok(())
}
