//! Turn-based traversal of a maze snapshot.
//!
//! A [`Game`] owns a full copy of the maze taken when it started, so later
//! edits to the source maze never change a game in progress. Games are
//! `Active` until the player reaches the exit, then `Finished` for good.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::maze::Maze;
use crate::route::Route;

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Active,
    Finished,
}

/// Result of applying a move to a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The game was already finished; nothing changed.
    Ignored,
    /// The player moved and the game continues.
    Moved,
    /// The player reached the exit.
    Finished,
}

/// A single step from one spot to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub date: DateTime<Utc>,
    pub from: String,
    pub to: String,
}

/// Running totals and position of the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub total_reward: u64,
    pub distance_covered: f64,
    pub current_spot: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub movements: Vec<Movement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_movements: Vec<String>,
}

impl PlayerStats {
    fn at(spot: String, allowed_movements: Vec<String>) -> Self {
        Self {
            total_reward: 0,
            distance_covered: 0.0,
            current_spot: spot,
            movements: Vec::new(),
            allowed_movements,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub maze_id: String,
    pub entrance: String,
    pub exit: String,
    pub minimum_distance: f64,
    pub player_stats: PlayerStats,
    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    /// Only populated once the game is finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimum_path: Option<Vec<String>>,
    pub maze: Maze,
}

impl Game {
    /// Start a game on a snapshot of `maze`.
    ///
    /// The maze must have an entrance and an exit connected by some route.
    pub fn start(
        id: impl Into<String>,
        name: impl Into<String>,
        maze: Maze,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let route = playable_route(&maze)?;
        let (entrance, exit) = role_keys(&maze)?;
        let allowed = maze.neighbours(&entrance);

        Ok(Self {
            id: id.into(),
            name: name.into(),
            maze_id: maze.id.clone(),
            player_stats: PlayerStats::at(entrance.clone(), allowed),
            entrance,
            exit,
            minimum_distance: route.distance,
            start_date: now,
            end_date: None,
            optimum_path: None,
            maze,
        })
    }

    pub fn status(&self) -> GameStatus {
        if self.end_date.is_some() {
            GameStatus::Finished
        } else {
            GameStatus::Active
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status() == GameStatus::Finished
    }

    /// Whether `key` appears at either end of any recorded movement.
    pub fn has_visited(&self, key: &str) -> bool {
        self.player_stats
            .movements
            .iter()
            .any(|movement| movement.from == key || movement.to == key)
    }

    /// Move the player to `target`.
    ///
    /// A finished game is left untouched. A target outside the allowed
    /// movements fails without modifying the game.
    pub fn move_to(&mut self, target: &str, now: DateTime<Utc>) -> Result<Transition> {
        if self.is_finished() {
            return Ok(Transition::Ignored);
        }

        let from = self.player_stats.current_spot.clone();
        let not_allowed = || Error::MovementNotAllowed {
            from: from.clone(),
            to: target.to_string(),
        };
        if !self
            .player_stats
            .allowed_movements
            .iter()
            .any(|allowed| allowed == target)
        {
            return Err(not_allowed());
        }
        let distance = self
            .maze
            .paths()
            .weight(&from, target)
            .ok_or_else(not_allowed)?;

        // Rewards are credited once per spot per game.
        if !self.has_visited(target) {
            let reward = self.maze.find_spot(target).map_or(0, |spot| spot.reward);
            self.player_stats.total_reward =
                self.player_stats.total_reward.saturating_add(reward);
        }

        self.player_stats.distance_covered += distance;
        self.player_stats.movements.push(Movement {
            date: now,
            from: from.clone(),
            to: target.to_string(),
        });
        self.player_stats.current_spot = target.to_string();
        debug!(game_id = %self.id, %from, to = %target, distance, "player moved");

        if target == self.exit {
            self.end_date = Some(now);
            self.player_stats.allowed_movements.clear();
            self.optimum_path = self
                .maze
                .shortest_path(&self.entrance, &self.exit)
                .map(|route| route.nodes);
            return Ok(Transition::Finished);
        }

        self.player_stats.allowed_movements = self.maze.neighbours(target);
        Ok(Transition::Moved)
    }
}

fn not_playable(maze: &Maze, reason: &str) -> Error {
    Error::MazeNotPlayable {
        id: maze.id.clone(),
        reason: reason.to_string(),
    }
}

/// Keys of the entrance and exit spots.
fn role_keys(maze: &Maze) -> Result<(String, String)> {
    let entrance = maze
        .entrance()
        .ok_or_else(|| not_playable(maze, "missing entrance spot"))?;
    let exit = maze
        .exit()
        .ok_or_else(|| not_playable(maze, "missing exit spot"))?;
    Ok((entrance.key(), exit.key()))
}

/// Check that `maze` can be completed and return the optimal entrance-to-exit route.
pub fn playable_route(maze: &Maze) -> Result<Route> {
    let (entrance, exit) = role_keys(maze)?;
    maze.shortest_path(&entrance, &exit)
        .filter(|route| route.distance > 0.0)
        .ok_or_else(|| not_playable(maze, "entrance and exit are not connected"))
}
