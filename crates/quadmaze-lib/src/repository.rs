//! Storage collaborators for mazes and games.
//!
//! Repositories load and save whole documents keyed by identifier. Services
//! load a snapshot, mutate it in memory and write it back; concurrent writers
//! to the same identifier are not coordinated (last write wins).

use std::collections::HashMap;
use std::fs;
use std::io::{ErrorKind as IoErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::game::Game;
use crate::maze::Maze;

pub trait MazeRepository {
    fn get_maze(&self, id: &str) -> Result<Maze>;
    fn put_maze(&self, maze: &Maze) -> Result<()>;
    /// Replace the stored document with the same identifier.
    fn update_maze(&self, maze: &Maze) -> Result<()>;
    fn delete_maze(&self, id: &str) -> Result<()>;
    /// Free-text search by name; order is unspecified.
    fn query_mazes(&self, pattern: &str) -> Result<Vec<Maze>>;
}

pub trait GameRepository {
    fn get_game(&self, id: &str) -> Result<Game>;
    fn put_game(&self, game: &Game) -> Result<()>;
    /// Replace the stored document with the same identifier.
    fn update_game(&self, game: &Game) -> Result<()>;
    fn delete_game(&self, id: &str) -> Result<()>;
    /// Free-text search by name; order is unspecified.
    fn query_games(&self, pattern: &str) -> Result<Vec<Game>>;
}

impl<R: MazeRepository + ?Sized> MazeRepository for Arc<R> {
    fn get_maze(&self, id: &str) -> Result<Maze> {
        (**self).get_maze(id)
    }

    fn put_maze(&self, maze: &Maze) -> Result<()> {
        (**self).put_maze(maze)
    }

    fn update_maze(&self, maze: &Maze) -> Result<()> {
        (**self).update_maze(maze)
    }

    fn delete_maze(&self, id: &str) -> Result<()> {
        (**self).delete_maze(id)
    }

    fn query_mazes(&self, pattern: &str) -> Result<Vec<Maze>> {
        (**self).query_mazes(pattern)
    }
}

impl<R: GameRepository + ?Sized> GameRepository for Arc<R> {
    fn get_game(&self, id: &str) -> Result<Game> {
        (**self).get_game(id)
    }

    fn put_game(&self, game: &Game) -> Result<()> {
        (**self).put_game(game)
    }

    fn update_game(&self, game: &Game) -> Result<()> {
        (**self).update_game(game)
    }

    fn delete_game(&self, id: &str) -> Result<()> {
        (**self).delete_game(id)
    }

    fn query_games(&self, pattern: &str) -> Result<Vec<Game>> {
        (**self).query_games(pattern)
    }
}

/// Case-insensitive match of any whitespace-separated term of `pattern` inside `name`.
pub fn matches_name(name: &str, pattern: &str) -> bool {
    let name = name.to_lowercase();
    pattern
        .split_whitespace()
        .any(|term| name.contains(&term.to_lowercase()))
}

/// Repository keeping every document in process memory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    mazes: Mutex<HashMap<String, Maze>>,
    games: Mutex<HashMap<String, Game>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| Error::Storage {
        message: "in-memory repository lock poisoned".to_string(),
    })
}

impl MazeRepository for MemoryRepository {
    fn get_maze(&self, id: &str) -> Result<Maze> {
        lock(&self.mazes)?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::MazeNotFound { id: id.to_string() })
    }

    fn put_maze(&self, maze: &Maze) -> Result<()> {
        let mut mazes = lock(&self.mazes)?;
        if mazes.contains_key(&maze.id) {
            return Err(Error::AlreadyExists {
                id: maze.id.clone(),
            });
        }
        mazes.insert(maze.id.clone(), maze.clone());
        Ok(())
    }

    fn update_maze(&self, maze: &Maze) -> Result<()> {
        let mut mazes = lock(&self.mazes)?;
        let stored = mazes
            .get_mut(&maze.id)
            .ok_or_else(|| Error::MazeNotFound {
                id: maze.id.clone(),
            })?;
        *stored = maze.clone();
        Ok(())
    }

    fn delete_maze(&self, id: &str) -> Result<()> {
        lock(&self.mazes)?.remove(id);
        Ok(())
    }

    fn query_mazes(&self, pattern: &str) -> Result<Vec<Maze>> {
        Ok(lock(&self.mazes)?
            .values()
            .filter(|maze| matches_name(&maze.name, pattern))
            .cloned()
            .collect())
    }
}

impl GameRepository for MemoryRepository {
    fn get_game(&self, id: &str) -> Result<Game> {
        lock(&self.games)?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::GameNotFound { id: id.to_string() })
    }

    fn put_game(&self, game: &Game) -> Result<()> {
        let mut games = lock(&self.games)?;
        if games.contains_key(&game.id) {
            return Err(Error::AlreadyExists {
                id: game.id.clone(),
            });
        }
        games.insert(game.id.clone(), game.clone());
        Ok(())
    }

    fn update_game(&self, game: &Game) -> Result<()> {
        let mut games = lock(&self.games)?;
        let stored = games
            .get_mut(&game.id)
            .ok_or_else(|| Error::GameNotFound {
                id: game.id.clone(),
            })?;
        *stored = game.clone();
        Ok(())
    }

    fn delete_game(&self, id: &str) -> Result<()> {
        lock(&self.games)?.remove(id);
        Ok(())
    }

    fn query_games(&self, pattern: &str) -> Result<Vec<Game>> {
        Ok(lock(&self.games)?
            .values()
            .filter(|game| matches_name(&game.name, pattern))
            .cloned()
            .collect())
    }
}

const MAZE_DIR: &str = "mazes";
const GAME_DIR: &str = "games";

/// Repository storing one pretty-printed JSON document per object.
///
/// Layout: `<root>/mazes/<id>.json` and `<root>/games/<id>.json`. Writes go
/// through a temporary file in the same directory and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    /// Open (creating if needed) a repository rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(MAZE_DIR))?;
        fs::create_dir_all(root.join(GAME_DIR))?;
        debug!(root = %root.display(), "opened json repository");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_path(&self, collection: &str, id: &str) -> Result<PathBuf> {
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(Error::Storage {
                message: format!("invalid document identifier '{id}'"),
            });
        }
        Ok(self.root.join(collection).join(format!("{id}.json")))
    }

    fn read<T: DeserializeOwned>(&self, collection: &str, id: &str) -> Result<Option<T>> {
        let path = self.document_path(collection, id)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write<T: Serialize>(&self, collection: &str, id: &str, document: &T) -> Result<()> {
        let destination = self.document_path(collection, id)?;
        let parent = self.root.join(collection);
        let mut tmp = NamedTempFile::new_in(&parent)?;
        serde_json::to_writer_pretty(&mut tmp, document)?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.persist(&destination).map_err(|err| err.error)?;
        debug!(path = %destination.display(), "wrote document");
        Ok(())
    }

    fn remove(&self, collection: &str, id: &str) -> Result<()> {
        let path = self.document_path(collection, id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == IoErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&self, collection: &str, id: &str) -> Result<bool> {
        Ok(self.document_path(collection, id)?.exists())
    }

    fn scan<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let mut documents = Vec::new();
        for entry in fs::read_dir(self.root.join(collection))? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path)?;
            documents.push(serde_json::from_slice(&bytes)?);
        }
        Ok(documents)
    }
}

impl MazeRepository for JsonFileRepository {
    fn get_maze(&self, id: &str) -> Result<Maze> {
        self.read(MAZE_DIR, id)?
            .ok_or_else(|| Error::MazeNotFound { id: id.to_string() })
    }

    fn put_maze(&self, maze: &Maze) -> Result<()> {
        if self.exists(MAZE_DIR, &maze.id)? {
            return Err(Error::AlreadyExists {
                id: maze.id.clone(),
            });
        }
        self.write(MAZE_DIR, &maze.id, maze)
    }

    fn update_maze(&self, maze: &Maze) -> Result<()> {
        if !self.exists(MAZE_DIR, &maze.id)? {
            return Err(Error::MazeNotFound {
                id: maze.id.clone(),
            });
        }
        self.write(MAZE_DIR, &maze.id, maze)
    }

    fn delete_maze(&self, id: &str) -> Result<()> {
        self.remove(MAZE_DIR, id)
    }

    fn query_mazes(&self, pattern: &str) -> Result<Vec<Maze>> {
        Ok(self
            .scan::<Maze>(MAZE_DIR)?
            .into_iter()
            .filter(|maze| matches_name(&maze.name, pattern))
            .collect())
    }
}

impl GameRepository for JsonFileRepository {
    fn get_game(&self, id: &str) -> Result<Game> {
        self.read(GAME_DIR, id)?
            .ok_or_else(|| Error::GameNotFound { id: id.to_string() })
    }

    fn put_game(&self, game: &Game) -> Result<()> {
        if self.exists(GAME_DIR, &game.id)? {
            return Err(Error::AlreadyExists {
                id: game.id.clone(),
            });
        }
        self.write(GAME_DIR, &game.id, game)
    }

    fn update_game(&self, game: &Game) -> Result<()> {
        if !self.exists(GAME_DIR, &game.id)? {
            return Err(Error::GameNotFound {
                id: game.id.clone(),
            });
        }
        self.write(GAME_DIR, &game.id, game)
    }

    fn delete_game(&self, id: &str) -> Result<()> {
        self.remove(GAME_DIR, id)
    }

    fn query_games(&self, pattern: &str) -> Result<Vec<Game>> {
        Ok(self
            .scan::<Game>(GAME_DIR)?
            .into_iter()
            .filter(|game| matches_name(&game.name, pattern))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_matching_uses_any_term() {
        assert!(matches_name("Castle Dungeon", "castle"));
        assert!(matches_name("Castle Dungeon", "forest dungeon"));
        assert!(!matches_name("Castle Dungeon", "forest"));
        assert!(!matches_name("Castle Dungeon", "   "));
    }

    #[test]
    fn rejects_path_like_identifiers() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonFileRepository::open(dir.path()).unwrap();
        assert!(matches!(
            repo.get_maze("../escape"),
            Err(Error::Storage { .. })
        ));
    }
}
