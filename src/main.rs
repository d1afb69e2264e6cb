//! # Gaming Den - Main Entry Point
//!
//! Parses command-line arguments, sets up file logging, opens the data
//! directory and hands control to the terminal UI.
//!
//! ## Usage
//! ```bash
//! play                          # Start at the game menu
//! play --game chess             # Jump straight into a game
//! play --seed 7 --log-file den.log
//! ```

mod tui;

use anyhow::{Context, Result};
use clap::Parser;
use den::app::App;
use den::config::{AppConfig, DEFAULT_DATA_DIR};
use den::game_wrapper::GameKind;
use den::persistence::FileStore;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Three small games behind one terminal shell
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Start directly in a game: tictactoe, pacman or chess
    #[clap(short, long)]
    game: Option<GameKind>,

    /// Directory holding saved preferences and statistics
    #[clap(long, env = "GAMING_DEN_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Seed for the arcade ghosts (random when omitted)
    #[clap(long)]
    seed: Option<u64>,

    /// Delay before the tic-tac-toe computer replies, in milliseconds
    #[clap(long, default_value_t = 500)]
    think_delay_ms: u64,

    /// Write logs to this file (logging is off otherwise)
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl From<&Args> for AppConfig {
    fn from(args: &Args) -> Self {
        AppConfig {
            data_dir: args.data_dir.clone(),
            start_game: args.game,
            seed: args.seed,
            think_delay: Duration::from_millis(args.think_delay_ms),
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = AppConfig::from(&args);
    info!(data_dir = %config.data_dir.display(), "starting gaming den");

    if config.data_dir.exists() && !config.data_dir.is_dir() {
        anyhow::bail!("data directory {} is not a directory", config.data_dir.display());
    }
    let store = FileStore::new(config.data_dir.clone());

    let mut app = App::new(config, Box::new(store), Instant::now());
    tui::run(&mut app).context("terminal session failed")?;
    Ok(())
}
