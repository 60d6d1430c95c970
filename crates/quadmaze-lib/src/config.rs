use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

/// Environment variable holding the default maze centre as `x,y`.
pub const CENTER_ENV: &str = "QUADMAZE_DEFAULT_CENTER";
/// Environment variable overriding the storage directory.
pub const DATA_DIR_ENV: &str = "QUADMAZE_DATA_DIR";

/// Explicit configuration handed to the services at construction time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeConfig {
    /// Centre used for new mazes that do not specify one.
    #[serde(default)]
    pub default_center: Coordinate,
    /// Directory holding persisted documents, when file-backed.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl MazeConfig {
    /// Build configuration from environment variables.
    ///
    /// - `QUADMAZE_DEFAULT_CENTER`: default maze centre (default `0,0`)
    /// - `QUADMAZE_DATA_DIR`: storage directory (optional)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_center = match lookup(CENTER_ENV).filter(|value| !value.trim().is_empty()) {
            Some(value) => value.parse().map_err(|_| Error::InvalidConfig {
                key: CENTER_ENV.to_string(),
                value,
            })?,
            None => Coordinate::default(),
        };
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            default_center,
            data_dir,
        })
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    /// Storage directory from the configuration, falling back to the platform default.
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }
}

/// Resolve the default storage location using platform-specific project directories.
pub fn default_data_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "quadmaze", "quadmaze").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().to_path_buf())
}
