use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use quadmaze_cli::commands::game::{self, GameCommand};
use quadmaze_cli::commands::maze::{self, MazeCommand};
use quadmaze_cli::commands::Workspace;
use quadmaze_cli::logging::{init_logging, LoggingConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Build quadrant mazes and play games on them")]
struct Cli {
    /// Override the storage directory (defaults to QUADMAZE_DATA_DIR or the platform data dir).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, inspect and edit mazes.
    #[command(subcommand)]
    Maze(MazeCommand),
    /// Start and play games.
    #[command(subcommand)]
    Game(GameCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LoggingConfig::from_env().verbose(cli.verbose));

    let workspace = Workspace::open(cli.data_dir.as_deref())?;
    match cli.command {
        Command::Maze(command) => maze::run(&workspace, command),
        Command::Game(command) => game::run(&workspace, command),
    }
}
