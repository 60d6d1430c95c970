//! quadmaze library entry points.
//!
//! This crate models a maze as a weighted graph embedded in the plane: spots
//! are partitioned into four quadrants around a movable centre, paths form a
//! symmetric adjacency index, and Dijkstra's algorithm answers shortest-path
//! queries. On top of that sits a turn-based game that walks a snapshot of a
//! maze one spot at a time. Higher-level consumers (the CLI) should only
//! depend on the services and types exported here.
//!

#![deny(warnings)]

pub mod config;
pub mod coordinate;
pub mod error;
pub mod game;
pub mod maze;
pub mod paths;
pub mod quadrant;
pub mod repository;
pub mod route;
pub mod service;
pub mod spot;

pub use config::{default_data_dir, MazeConfig};
pub use coordinate::Coordinate;
pub use error::{Error, ErrorKind, Result};
pub use game::{playable_route, Game, GameStatus, Movement, PlayerStats, Transition};
pub use maze::Maze;
pub use paths::{Edge, PathIndex, PathRequest};
pub use quadrant::{build_quadrants, classify, Bound, Quadrant, QuadrantId, INFINITE};
pub use repository::{GameRepository, JsonFileRepository, MazeRepository, MemoryRepository};
pub use route::{find_shortest_path, Route};
pub use service::{GameService, MazeService, MazeUpdate, NewMaze};
pub use spot::{Spot, SpotRegistry, ENTRANCE_SPOT, EXIT_SPOT};
