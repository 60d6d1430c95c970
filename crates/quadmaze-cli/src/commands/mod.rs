// Module exports for CLI subcommands
//
// Each module handles one command group. main.rs parses arguments, opens the
// storage workspace and dispatches to these handlers.

pub mod game;
pub mod maze;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use quadmaze_lib::{GameService, JsonFileRepository, MazeConfig, MazeService};

/// Services wired to the JSON repository selected for this invocation.
pub struct Workspace {
    pub mazes: MazeService<JsonFileRepository>,
    pub games: GameService<JsonFileRepository>,
}

impl Workspace {
    /// Open the workspace, preferring `data_dir` over environment and platform defaults.
    pub fn open(data_dir: Option<&Path>) -> Result<Self> {
        let mut config = MazeConfig::from_env().context("failed to read configuration")?;
        if let Some(dir) = data_dir {
            config = config.with_data_dir(dir);
        }
        let root = config
            .resolve_data_dir()
            .context("failed to resolve the storage directory")?;
        let repository = JsonFileRepository::open(&root)
            .with_context(|| format!("failed to open storage at {}", root.display()))?;
        debug!(
            root = %repository.root().display(),
            center = %config.default_center,
            "workspace ready"
        );

        Ok(Self {
            mazes: MazeService::new(repository.clone(), config),
            games: GameService::new(repository),
        })
    }
}
