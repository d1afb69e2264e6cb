//! # Application State and Core Components
//!
//! The shell that sits above the three engines. It owns the lazily created
//! game instances, the menu and board cursor state read by the renderer,
//! the colour theme, transient notifications, and the persisted
//! preferences and statistics.
//!
//! All input arrives through method calls from `tui::input`; all timed
//! behaviour happens in [`App::tick`].

use crate::config::AppConfig;
use crate::game_wrapper::{GameKind, GameWrapper};
use crate::games::arcade::{ArcadeState, Direction};
use crate::games::chess::{ChessState, Square};
use crate::games::tictactoe::TicTacToeState;
use crate::notifications::{NotificationKind, Notifications};
use crate::persistence::{
    self, ArcadeStats, ChessStats, KeyValueStore, Preferences, Statistics, Theme, TicTacToeStats,
    PREFERENCES_KEY, STATISTICS_KEY,
};
use crate::GameEngine;
use ratatui::widgets::ListState;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Up Up Down Down Left Right Left Right
pub const KONAMI_CODE: [Direction; 8] = [
    Direction::Up,
    Direction::Up,
    Direction::Down,
    Direction::Down,
    Direction::Left,
    Direction::Right,
    Direction::Left,
    Direction::Right,
];

pub const KONAMI_MESSAGE: &str = "Konami Code activated! You found an easter egg!";
pub const STATS_SAVED_MESSAGE: &str = "Game statistics saved!";
pub const NO_STATS_MESSAGE: &str = "No statistics found. Play some games first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    GameSelection,
    InGame,
    Statistics,
}

/// One row of the home menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Game(GameKind),
    Statistics,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Game(GameKind::TicTacToe),
        MenuItem::Game(GameKind::Arcade),
        MenuItem::Game(GameKind::Chess),
        MenuItem::Statistics,
        MenuItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Game(kind) => kind.display_name(),
            MenuItem::Statistics => "Statistics",
            MenuItem::Quit => "Quit",
        }
    }
}

/// The main application state
pub struct App {
    pub should_quit: bool,
    pub mode: AppMode,
    pub menu_state: ListState,
    /// Cursor over the tic-tac-toe or chess board, as (row, col)
    pub board_cursor: (u16, u16),
    games: HashMap<GameKind, GameWrapper>,
    current: Option<GameKind>,
    theme: Theme,
    notifications: Notifications,
    recent_arrows: VecDeque<Direction>,
    store: Box<dyn KeyValueStore>,
    /// Counters loaded at startup; seed new engines and fill gaps on save
    baseline: Statistics,
    /// Record currently shown on the statistics screen
    shown_statistics: Option<Statistics>,
    arcade_high_score: u32,
    think_delay: Duration,
    arcade_seed: u64,
}

impl App {
    pub fn new(config: AppConfig, store: Box<dyn KeyValueStore>, now: Instant) -> Self {
        let preferences = persistence::load_preferences(store.as_ref());
        let baseline = persistence::load_statistics(store.as_ref());

        let last_game = preferences
            .last_active_game
            .as_deref()
            .and_then(|slug| slug.parse::<GameKind>().ok());
        let selected = last_game
            .and_then(|kind| MenuItem::ALL.iter().position(|item| *item == MenuItem::Game(kind)))
            .unwrap_or(0);
        let mut menu_state = ListState::default();
        menu_state.select(Some(selected));

        let mut app = Self {
            should_quit: false,
            mode: AppMode::GameSelection,
            menu_state,
            board_cursor: (0, 0),
            games: HashMap::new(),
            current: None,
            theme: preferences.theme,
            notifications: Notifications::default(),
            recent_arrows: VecDeque::with_capacity(KONAMI_CODE.len()),
            store,
            arcade_high_score: baseline.arcade.high_score,
            baseline,
            shown_statistics: None,
            think_delay: config.think_delay,
            arcade_seed: config.seed.unwrap_or_else(rand::random),
        };

        if let Some(kind) = config.start_game {
            app.switch_game(kind, now);
        }
        app
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn current_kind(&self) -> Option<GameKind> {
        self.current
    }

    pub fn current_game(&self) -> Option<&GameWrapper> {
        self.current.and_then(|kind| self.games.get(&kind))
    }

    pub fn current_game_mut(&mut self) -> Option<&mut GameWrapper> {
        let kind = self.current?;
        self.games.get_mut(&kind)
    }

    /// Instance for `kind` if it was ever opened
    pub fn game(&self, kind: GameKind) -> Option<&GameWrapper> {
        self.games.get(&kind)
    }

    pub fn shown_statistics(&self) -> Option<&Statistics> {
        self.shown_statistics.as_ref()
    }

    /// Best arcade score seen, saved or from this session
    pub fn arcade_high_score(&self) -> u32 {
        self.arcade_high_score
    }

    pub fn selected_menu_item(&self) -> MenuItem {
        let index = self.menu_state.selected().unwrap_or(0);
        MenuItem::ALL.get(index).copied().unwrap_or(MenuItem::Quit)
    }

    pub fn select_next_item(&mut self) {
        let i = match self.menu_state.selected() {
            Some(i) => (i + 1) % MenuItem::ALL.len(),
            None => 0,
        };
        self.menu_state.select(Some(i));
    }

    pub fn select_prev_item(&mut self) {
        let i = match self.menu_state.selected() {
            Some(i) => (i + MenuItem::ALL.len() - 1) % MenuItem::ALL.len(),
            None => 0,
        };
        self.menu_state.select(Some(i));
    }

    pub fn activate_selected(&mut self, now: Instant) {
        match self.selected_menu_item() {
            MenuItem::Game(kind) => self.switch_game(kind, now),
            MenuItem::Statistics => self.show_statistics(now),
            MenuItem::Quit => self.should_quit = true,
        }
    }

    /// Opens `kind`, creating its engine on the first visit and resuming it
    /// afterwards.
    pub fn switch_game(&mut self, kind: GameKind, now: Instant) {
        if !self.games.contains_key(&kind) {
            let game = self.create_game(kind);
            self.games.insert(kind, game);
        }
        if self.current != Some(kind) {
            self.board_cursor = (0, 0);
        }
        self.current = Some(kind);
        self.mode = AppMode::InGame;
        if let Some(index) = MenuItem::ALL.iter().position(|item| *item == MenuItem::Game(kind)) {
            self.menu_state.select(Some(index));
        }
        info!(game = kind.slug(), "switched game");

        self.notifications.push(
            format!("Welcome to {}!", kind.display_name()),
            NotificationKind::Success,
            now,
        );
        self.save_preferences(now);
    }

    fn create_game(&self, kind: GameKind) -> GameWrapper {
        match kind {
            GameKind::TicTacToe => GameWrapper::TicTacToe(
                TicTacToeState::new(self.think_delay).with_scores(
                    self.baseline.tic_tac_toe.player_wins,
                    self.baseline.tic_tac_toe.ai_wins,
                ),
            ),
            GameKind::Arcade => GameWrapper::Arcade(ArcadeState::new(self.arcade_seed)),
            GameKind::Chess => GameWrapper::Chess(
                ChessState::new()
                    .with_record(self.baseline.chess.games_played, self.baseline.chess.wins),
            ),
        }
    }

    /// Returns to the home menu; the current game keeps its state.
    pub fn back_to_menu(&mut self) {
        self.mode = AppMode::GameSelection;
    }

    pub fn reset_current_game(&mut self) {
        if let Some(game) = self.current_game_mut() {
            game.reset();
        }
    }

    pub fn toggle_theme(&mut self, now: Instant) {
        self.theme = self.theme.toggled();
        self.save_preferences(now);
    }

    fn save_preferences(&mut self, now: Instant) {
        let preferences = Preferences {
            theme: self.theme,
            last_active_game: self.current.map(|kind| kind.slug().to_string()),
        };
        if let Err(e) = persistence::save_record(self.store.as_mut(), PREFERENCES_KEY, &preferences) {
            warn!(error = %e, "failed to save preferences");
            self.notifications
                .push("Could not save preferences", NotificationKind::Error, now);
        }
    }

    /// Snapshot of the counters: live engines where they exist, the loaded
    /// record otherwise.
    pub fn collect_statistics(&self) -> Statistics {
        let tic_tac_toe = match self.games.get(&GameKind::TicTacToe) {
            Some(GameWrapper::TicTacToe(game)) => TicTacToeStats {
                player_wins: game.player_wins(),
                ai_wins: game.ai_wins(),
            },
            _ => self.baseline.tic_tac_toe,
        };
        let arcade = match self.games.get(&GameKind::Arcade) {
            Some(GameWrapper::Arcade(game)) => ArcadeStats {
                high_score: self.arcade_high_score.max(game.score()),
                lives: game.lives(),
            },
            _ => ArcadeStats {
                high_score: self.arcade_high_score,
                ..self.baseline.arcade
            },
        };
        let chess = match self.games.get(&GameKind::Chess) {
            Some(GameWrapper::Chess(game)) => ChessStats {
                games_played: game.games_played(),
                wins: game.wins(),
            },
            _ => self.baseline.chess,
        };
        Statistics {
            tic_tac_toe,
            arcade,
            chess,
        }
    }

    pub fn save_statistics(&mut self, now: Instant) {
        let stats = self.collect_statistics();
        match persistence::save_record(self.store.as_mut(), STATISTICS_KEY, &stats) {
            Ok(()) => {
                info!("statistics saved");
                self.notifications
                    .push(STATS_SAVED_MESSAGE, NotificationKind::Success, now);
            }
            Err(e) => {
                warn!(error = %e, "failed to save statistics");
                self.notifications
                    .push("Could not save statistics", NotificationKind::Error, now);
            }
        }
    }

    /// Opens the statistics screen with the saved record, if there is one.
    pub fn show_statistics(&mut self, now: Instant) {
        match persistence::load_record::<Statistics>(self.store.as_ref(), STATISTICS_KEY) {
            Ok(Some(stats)) => {
                self.shown_statistics = Some(stats);
                self.mode = AppMode::Statistics;
            }
            Ok(None) => {
                self.notifications
                    .push(NO_STATS_MESSAGE, NotificationKind::Info, now);
            }
            Err(e) => {
                warn!(error = %e, "saved statistics unreadable");
                self.notifications
                    .push(NO_STATS_MESSAGE, NotificationKind::Info, now);
            }
        }
    }

    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss_newest();
    }

    /// Records an arrow key press for the konami sequence. Returns true
    /// when the press completed the sequence.
    pub fn record_arrow(&mut self, direction: Direction, now: Instant) -> bool {
        self.recent_arrows.push_back(direction);
        while self.recent_arrows.len() > KONAMI_CODE.len() {
            self.recent_arrows.pop_front();
        }
        let matched = self.recent_arrows.iter().eq(KONAMI_CODE.iter());
        if matched {
            info!("konami code entered");
            self.notifications
                .push(KONAMI_MESSAGE, NotificationKind::Success, now);
        }
        matched
    }

    /// Routes an arrow key to the current game: steering in the arcade,
    /// cursor movement on the boards.
    pub fn handle_arrow(&mut self, direction: Direction, now: Instant) {
        self.record_arrow(direction, now);
        if self.mode != AppMode::InGame {
            return;
        }
        let size = match self.current_game_mut() {
            Some(GameWrapper::Arcade(game)) => {
                game.set_direction(direction);
                return;
            }
            Some(GameWrapper::TicTacToe(_)) => 3,
            Some(GameWrapper::Chess(_)) => 8,
            None => return,
        };
        let (row, col) = self.board_cursor;
        self.board_cursor = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(size - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(size - 1)),
        };
    }

    /// Plays or selects at the board cursor.
    pub fn activate_cursor(&mut self, now: Instant) {
        let (row, col) = self.board_cursor;
        match self.current_game_mut() {
            Some(GameWrapper::TicTacToe(game)) => {
                game.apply_move(row as usize * 3 + col as usize, now);
            }
            Some(GameWrapper::Chess(game)) => {
                if let Some(square) = Square::new(row as u8, col as u8) {
                    game.click(square);
                }
            }
            Some(GameWrapper::Arcade(_)) | None => {}
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Per-refresh update: advances the open game, tracks the arcade high
    /// score, and expires old notifications.
    pub fn tick(&mut self, now: Instant) {
        if self.mode == AppMode::InGame {
            if let Some(game) = self.current_game_mut() {
                game.tick(now);
            }
        }
        if let Some(GameWrapper::Arcade(game)) = self.games.get(&GameKind::Arcade) {
            self.arcade_high_score = self.arcade_high_score.max(game.score());
        }
        self.notifications.expire(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn test_app() -> App {
        let config = AppConfig {
            seed: Some(42),
            think_delay: Duration::ZERO,
            ..AppConfig::default()
        };
        App::new(config, Box::new(MemoryStore::new()), Instant::now())
    }

    #[test]
    fn test_starts_in_menu() {
        let app = test_app();
        assert_eq!(app.mode, AppMode::GameSelection);
        assert_eq!(app.selected_menu_item(), MenuItem::Game(GameKind::TicTacToe));
        assert_eq!(app.theme(), Theme::Dark);
        assert!(app.current_game().is_none());
    }

    #[test]
    fn test_menu_wraps() {
        let mut app = test_app();
        app.select_prev_item();
        assert_eq!(app.selected_menu_item(), MenuItem::Quit);
        app.select_next_item();
        assert_eq!(app.selected_menu_item(), MenuItem::Game(GameKind::TicTacToe));
    }

    #[test]
    fn test_switch_game_welcomes() {
        let now = Instant::now();
        let mut app = test_app();
        app.switch_game(GameKind::Arcade, now);
        assert_eq!(app.mode, AppMode::InGame);
        assert_eq!(app.current_kind(), Some(GameKind::Arcade));
        assert_eq!(app.notifications().latest().unwrap().message, "Welcome to Pac-Man!");
    }

    #[test]
    fn test_cursor_clamped_to_board() {
        let now = Instant::now();
        let mut app = test_app();
        app.switch_game(GameKind::TicTacToe, now);
        for _ in 0..5 {
            app.handle_arrow(Direction::Right, now);
            app.handle_arrow(Direction::Down, now);
        }
        assert_eq!(app.board_cursor, (2, 2));
        app.handle_arrow(Direction::Up, now);
        assert_eq!(app.board_cursor, (1, 2));
    }

    #[test]
    fn test_cursor_plays_tictactoe() {
        let now = Instant::now();
        let mut app = test_app();
        app.switch_game(GameKind::TicTacToe, now);
        app.board_cursor = (1, 1);
        app.activate_cursor(now);
        app.tick(now);
        let Some(GameWrapper::TicTacToe(game)) = app.current_game() else {
            panic!("expected tic-tac-toe");
        };
        assert_eq!(game.board().empty_cells().count(), 7);
    }

    #[test]
    fn test_arrows_steer_arcade() {
        let now = Instant::now();
        let mut app = test_app();
        app.switch_game(GameKind::Arcade, now);
        app.handle_arrow(Direction::Up, now);
        let Some(GameWrapper::Arcade(game)) = app.current_game() else {
            panic!("expected arcade");
        };
        assert_eq!(game.player().next_direction, Direction::Up);
    }

    #[test]
    fn test_menu_does_not_tick_games() {
        let now = Instant::now();
        let mut app = test_app();
        app.switch_game(GameKind::Arcade, now);
        app.back_to_menu();
        app.tick(now);
        let Some(GameWrapper::Arcade(game)) = app.game(GameKind::Arcade) else {
            panic!("expected arcade");
        };
        assert_eq!(game.score(), 0);
    }
}
