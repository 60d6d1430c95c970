use thiserror::Error;

/// Convenient result alias for the quadmaze library.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of [`Error`] values.
///
/// Presentation code branches on the kind (for example to pick an exit code
/// or an HTTP status) without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing input. Never retried.
    Validation,
    /// Unknown maze, game or spot identifier.
    NotFound,
    /// Movement to a spot that is not adjacent to the current one.
    IllegalTransition,
    /// Maze lacks an entrance or exit, or they are disconnected.
    Playability,
    /// Failure in the storage collaborator.
    Storage,
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a maze or game is created without a usable name.
    #[error("a non-empty name is required")]
    MissingName,

    /// Raised when a second entrance spot is added to a maze.
    #[error("multiple entrance spots not allowed (existing entrance at {existing})")]
    DuplicateEntrance { existing: String },

    /// Raised when a second exit spot is added to a maze.
    #[error("multiple exit spots not allowed (existing exit at {existing})")]
    DuplicateExit { existing: String },

    /// Raised when a path references a spot that is not registered in the maze.
    #[error("could not add path {origin}-{destination}, spot not found")]
    OrphanPath { origin: String, destination: String },

    /// Raised when a path would connect a spot to itself.
    #[error("could not add path {key}-{key}, a spot cannot be connected to itself")]
    LoopPath { key: String },

    /// Raised when a coordinate string cannot be parsed.
    #[error("invalid coordinate '{input}'; expected x,y")]
    InvalidCoordinate { input: String },

    /// Raised when a configuration value cannot be interpreted.
    #[error("invalid configuration value for {key}: {value}")]
    InvalidConfig { key: String, value: String },

    /// Raised when a maze identifier is unknown to the repository.
    #[error("maze {id} not found")]
    MazeNotFound { id: String },

    /// Raised when a game identifier is unknown to the repository.
    #[error("game {id} not found")]
    GameNotFound { id: String },

    /// Raised when a coordinate does not hold a spot.
    #[error("spot {key} not found")]
    SpotNotFound { key: String },

    /// Raised when the player selects a spot that is not adjacent to the current one.
    #[error("could not move from {from} to {to}: movement not allowed")]
    MovementNotAllowed { from: String, to: String },

    /// Raised when a game is started on a maze that cannot be completed.
    #[error("maze {id} is not ready to be played: {reason}")]
    MazeNotPlayable { id: String, reason: String },

    /// Raised when inserting a document whose identifier is already stored.
    #[error("document {id} already exists")]
    AlreadyExists { id: String },

    /// Generic storage failure reported by a repository.
    #[error("storage failure: {message}")]
    Storage { message: String },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for maze storage")]
    ProjectDirsUnavailable,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON encoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Classify the error according to the library taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingName
            | Error::DuplicateEntrance { .. }
            | Error::DuplicateExit { .. }
            | Error::OrphanPath { .. }
            | Error::LoopPath { .. }
            | Error::InvalidCoordinate { .. }
            | Error::InvalidConfig { .. } => ErrorKind::Validation,
            Error::MazeNotFound { .. }
            | Error::GameNotFound { .. }
            | Error::SpotNotFound { .. } => ErrorKind::NotFound,
            Error::MovementNotAllowed { .. } => ErrorKind::IllegalTransition,
            Error::MazeNotPlayable { .. } => ErrorKind::Playability,
            Error::AlreadyExists { .. }
            | Error::Storage { .. }
            | Error::Io(_)
            | Error::Json(_)
            | Error::ProjectDirsUnavailable => ErrorKind::Storage,
        }
    }
}
