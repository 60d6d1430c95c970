use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::paths::{PathIndex, PathRequest};
use crate::route::{find_shortest_path, Route};
use crate::spot::{Spot, SpotRegistry};

/// A navigable maze: spots partitioned into quadrants plus the paths between them.
///
/// Every path references registered spots only. Removing a spot removes every
/// path touching it, and moving the centre re-partitions spots without
/// touching the paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    pub id: String,
    pub name: String,
    quadrants: SpotRegistry,
    #[serde(default)]
    paths: PathIndex,
}

impl Maze {
    pub fn new(id: impl Into<String>, name: impl Into<String>, center: Coordinate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            quadrants: SpotRegistry::new(center),
            paths: PathIndex::new(),
        }
    }

    pub fn center(&self) -> Coordinate {
        self.quadrants.center()
    }

    pub fn spots(&self) -> &SpotRegistry {
        &self.quadrants
    }

    pub fn paths(&self) -> &PathIndex {
        &self.paths
    }

    pub fn find_spot(&self, key: &str) -> Option<&Spot> {
        self.quadrants.find(key)
    }

    pub fn entrance(&self) -> Option<&Spot> {
        self.quadrants.iter().find(|spot| spot.is_entrance())
    }

    pub fn exit(&self) -> Option<&Spot> {
        self.quadrants.iter().find(|spot| spot.is_exit())
    }

    /// Register a spot, replacing any spot already at its coordinate.
    ///
    /// A maze holds at most one entrance and one exit; a second one at a
    /// different coordinate is rejected without modifying the maze.
    pub fn add_spot(&mut self, spot: Spot) -> Result<()> {
        let key = spot.key();
        if spot.is_entrance() {
            if let Some(existing) = self.entrance().filter(|existing| existing.key() != key) {
                return Err(Error::DuplicateEntrance {
                    existing: existing.key(),
                });
            }
        }
        if spot.is_exit() {
            if let Some(existing) = self.exit().filter(|existing| existing.key() != key) {
                return Err(Error::DuplicateExit {
                    existing: existing.key(),
                });
            }
        }

        debug!(maze_id = %self.id, spot = %key, name = %spot.name, "adding spot");
        self.quadrants.insert(spot);
        Ok(())
    }

    /// Remove a spot and every path touching it.
    pub fn delete_spot(&mut self, coordinate: Coordinate) -> Result<Spot> {
        let key = coordinate.key();
        let spot = self
            .quadrants
            .remove(&key)
            .ok_or(Error::SpotNotFound { key: key.clone() })?;
        self.paths.remove_node(&key);
        Ok(spot)
    }

    /// Connect two registered spots; fails if either end is missing.
    pub fn add_path(&mut self, path: PathRequest) -> Result<()> {
        if path.origin == path.destination {
            return Err(Error::LoopPath {
                key: path.origin.key(),
            });
        }
        if !self
            .paths
            .add_edge(&self.quadrants, path.origin, path.destination)
        {
            return Err(Error::OrphanPath {
                origin: path.origin.key(),
                destination: path.destination.key(),
            });
        }
        Ok(())
    }

    /// Remove a path and its reverse; absent paths are ignored.
    pub fn delete_path(&mut self, path: PathRequest) {
        self.paths
            .remove_edge(&path.origin.key(), &path.destination.key());
    }

    /// Move the maze centre, re-partitioning every spot. Paths are unchanged.
    pub fn move_center(&mut self, center: Coordinate) {
        if center == self.center() {
            return;
        }
        debug!(maze_id = %self.id, %center, "moving maze center");
        self.quadrants.repartition(center);
    }

    /// Keys directly reachable from `key`.
    pub fn neighbours(&self, key: &str) -> Vec<String> {
        self.paths.neighbour_keys(key)
    }

    pub fn shortest_path(&self, origin: &str, destination: &str) -> Option<Route> {
        find_shortest_path(&self.paths, origin, destination)
    }
}
