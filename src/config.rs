//! Runtime settings for the shell, built from command-line arguments.

use crate::game_wrapper::GameKind;
use crate::games::tictactoe::DEFAULT_THINK_DELAY;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory for saved preferences and statistics
pub const DEFAULT_DATA_DIR: &str = ".gaming-den";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where the JSON records live
    pub data_dir: PathBuf,
    /// Game to open at startup instead of the menu
    pub start_game: Option<GameKind>,
    /// Arcade RNG seed; drawn from entropy when None
    pub seed: Option<u64>,
    /// Delay before the tic-tac-toe computer replies
    pub think_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            start_game: None,
            seed: None,
            think_delay: DEFAULT_THINK_DELAY,
        }
    }
}
