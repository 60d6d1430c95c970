//! Common test utilities and fixture helpers.
//!
//! Builds the small mazes shared by the integration tests and wires services
//! to an in-memory repository.

#![allow(dead_code)]

use std::sync::Arc;

use quadmaze_lib::{
    Coordinate, GameService, MazeConfig, MazeService, MemoryRepository, NewMaze, PathRequest,
    Spot, ENTRANCE_SPOT, EXIT_SPOT,
};

pub fn c(x: i64, y: i64) -> Coordinate {
    Coordinate::new(x, y)
}

pub fn path(a: (i64, i64), b: (i64, i64)) -> PathRequest {
    PathRequest::new(c(a.0, a.1), c(b.0, b.1))
}

/// `entrance@(0,0) - mid@(1,0) - exit@(2,0)`, every reward zero.
pub fn line_maze(name: &str) -> NewMaze {
    NewMaze {
        name: name.to_string(),
        center: None,
        spots: vec![
            Spot::new(ENTRANCE_SPOT, c(0, 0), 0),
            Spot::new("mid", c(1, 0), 0),
            Spot::new(EXIT_SPOT, c(2, 0), 0),
        ],
        paths: vec![path((0, 0), (1, 0)), path((1, 0), (2, 0))],
    }
}

/// Services sharing one in-memory repository.
pub struct Services {
    pub repository: Arc<MemoryRepository>,
    pub mazes: MazeService<Arc<MemoryRepository>>,
    pub games: GameService<Arc<MemoryRepository>>,
}

impl Services {
    pub fn new() -> Self {
        Self::with_config(MazeConfig::default())
    }

    pub fn with_config(config: MazeConfig) -> Self {
        let repository = Arc::new(MemoryRepository::new());
        Self {
            mazes: MazeService::new(Arc::clone(&repository), config),
            games: GameService::new(Arc::clone(&repository)),
            repository,
        }
    }
}
