//! Maze and game services.
//!
//! Each operation loads a full snapshot from the repository, mutates it in
//! memory and writes it back in one pass. A failed write leaves the caller
//! with an error and nothing persisted; re-submitting is the recovery path.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::MazeConfig;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::game::{Game, Transition};
use crate::maze::Maze;
use crate::paths::PathRequest;
use crate::repository::{GameRepository, MazeRepository};
use crate::spot::Spot;

/// Definition of a new maze.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewMaze {
    pub name: String,
    /// Falls back to [`MazeConfig::default_center`] when absent.
    #[serde(default)]
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub spots: Vec<Spot>,
    #[serde(default)]
    pub paths: Vec<PathRequest>,
}

/// Changes applied to an existing maze.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MazeUpdate {
    /// New centre; `None` keeps the current one.
    #[serde(default)]
    pub center: Option<Coordinate>,
    #[serde(default)]
    pub spots: Vec<Spot>,
    #[serde(default)]
    pub paths: Vec<PathRequest>,
}

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::MissingName);
    }
    Ok(())
}

fn apply_additions(maze: &mut Maze, spots: Vec<Spot>, paths: Vec<PathRequest>) -> Result<()> {
    for spot in spots {
        maze.add_spot(spot)?;
    }
    for path in paths {
        maze.add_path(path)?;
    }
    Ok(())
}

pub struct MazeService<R> {
    repository: R,
    config: MazeConfig,
}

impl<R: MazeRepository> MazeService<R> {
    pub fn new(repository: R, config: MazeConfig) -> Self {
        Self { repository, config }
    }

    /// Build and persist a maze; any orphan path fails the whole operation.
    pub fn create(&self, request: NewMaze) -> Result<String> {
        require_name(&request.name)?;

        let center = request.center.unwrap_or(self.config.default_center);
        let mut maze = Maze::new(new_id(), request.name, center);
        apply_additions(&mut maze, request.spots, request.paths)?;

        self.repository.put_maze(&maze)?;
        info!(
            maze_id = %maze.id,
            spots = maze.spots().len(),
            paths = maze.paths().edge_count(),
            "created maze"
        );
        Ok(maze.id)
    }

    pub fn get(&self, id: &str) -> Result<Maze> {
        debug!(maze_id = %id, "loading maze");
        self.repository.get_maze(id)
    }

    /// Move the centre (if requested) and add spots and paths to a stored maze.
    pub fn update(&self, id: &str, update: MazeUpdate) -> Result<Maze> {
        let mut maze = self.repository.get_maze(id)?;

        if let Some(center) = update.center {
            maze.move_center(center);
        }
        apply_additions(&mut maze, update.spots, update.paths)?;

        self.repository.update_maze(&maze)?;
        info!(maze_id = %id, center = %maze.center(), "updated maze");
        Ok(maze)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete_maze(id)?;
        info!(maze_id = %id, "deleted maze");
        Ok(())
    }

    /// Remove a spot and every path touching it.
    pub fn delete_spot(&self, id: &str, coordinate: Coordinate) -> Result<()> {
        let mut maze = self.repository.get_maze(id)?;
        let spot = maze.delete_spot(coordinate)?;
        self.repository.update_maze(&maze)?;
        info!(maze_id = %id, spot = %spot.key(), name = %spot.name, "deleted spot");
        Ok(())
    }

    /// Remove a path and its reverse; a missing path is not an error.
    pub fn delete_path(&self, id: &str, path: PathRequest) -> Result<()> {
        let mut maze = self.repository.get_maze(id)?;
        maze.delete_path(path);
        self.repository.update_maze(&maze)?;
        info!(
            maze_id = %id,
            origin = %path.origin,
            destination = %path.destination,
            "deleted path"
        );
        Ok(())
    }

    pub fn query(&self, pattern: &str) -> Result<Vec<Maze>> {
        require_name(pattern)?;
        self.repository.query_mazes(pattern)
    }
}

pub struct GameService<R> {
    repository: R,
}

impl<R: MazeRepository + GameRepository> GameService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Snapshot a playable maze into a new game positioned at the entrance.
    pub fn start(&self, maze_id: &str, name: &str) -> Result<Game> {
        require_name(name)?;

        let maze = self.repository.get_maze(maze_id)?;
        let game = Game::start(new_id(), name, maze, Utc::now()).inspect_err(|err| {
            warn!(maze_id = %maze_id, error = %err, "refusing to start game");
        })?;

        self.repository.put_game(&game)?;
        info!(
            game_id = %game.id,
            maze_id = %maze_id,
            minimum_distance = game.minimum_distance,
            "started game"
        );
        Ok(game)
    }

    pub fn get(&self, id: &str) -> Result<Game> {
        debug!(game_id = %id, "loading game");
        self.repository.get_game(id)
    }

    /// Advance the game one step towards `target`.
    ///
    /// Finished games are returned unchanged and are not written back.
    pub fn move_to(&self, id: &str, target: &str) -> Result<Game> {
        let mut game = self.repository.get_game(id)?;

        let transition = game.move_to(target, Utc::now()).inspect_err(|err| {
            warn!(game_id = %id, error = %err, "rejected movement");
        })?;

        match transition {
            Transition::Ignored => {
                debug!(game_id = %id, "game already finished");
                return Ok(game);
            }
            Transition::Moved => {}
            Transition::Finished => {
                info!(
                    game_id = %id,
                    total_reward = game.player_stats.total_reward,
                    distance_covered = game.player_stats.distance_covered,
                    minimum_distance = game.minimum_distance,
                    "game finished"
                );
            }
        }

        self.repository.update_game(&game)?;
        Ok(game)
    }

    pub fn delete(&self, id: &str) -> Result<()> {
        self.repository.delete_game(id)?;
        info!(game_id = %id, "deleted game");
        Ok(())
    }

    pub fn query(&self, pattern: &str) -> Result<Vec<Game>> {
        require_name(pattern)?;
        self.repository.query_games(pattern)
    }
}
