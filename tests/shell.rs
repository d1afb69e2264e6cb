use den::app::{
    App, AppMode, MenuItem, KONAMI_CODE, KONAMI_MESSAGE, NO_STATS_MESSAGE, STATS_SAVED_MESSAGE,
};
use den::config::AppConfig;
use den::game_wrapper::{GameKind, GameWrapper};
use den::games::arcade::Direction;
use den::GameEngine;
use den::notifications::NotificationKind;
use den::persistence::{
    self, FileStore, KeyValueStore, MemoryStore, Preferences, Statistics, Theme, PREFERENCES_KEY,
    STATISTICS_KEY,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gaming-den-{}-{}", std::process::id(), name));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn config() -> AppConfig {
    AppConfig {
        seed: Some(1),
        think_delay: Duration::ZERO,
        ..AppConfig::default()
    }
}

fn memory_app() -> App {
    App::new(config(), Box::new(MemoryStore::new()), Instant::now())
}

fn count_messages(app: &App, message: &str) -> usize {
    app.notifications()
        .iter()
        .filter(|n| n.message == message)
        .count()
}

#[test]
fn test_konami_code_notifies_once() {
    let now = Instant::now();
    let mut app = memory_app();

    app.record_arrow(Direction::Left, now);
    let mut hits = 0;
    for direction in KONAMI_CODE {
        if app.record_arrow(direction, now) {
            hits += 1;
        }
    }
    assert_eq!(hits, 1);
    assert_eq!(count_messages(&app, KONAMI_MESSAGE), 1);

    // One more arrow shifts the window off the sequence
    assert!(!app.record_arrow(Direction::Up, now));
    assert_eq!(count_messages(&app, KONAMI_MESSAGE), 1);
}

#[test]
fn test_quick_switch_reuses_instance() {
    let now = Instant::now();
    let mut app = memory_app();

    app.switch_game(GameKind::TicTacToe, now);
    app.board_cursor = (0, 0);
    app.activate_cursor(now);

    app.switch_game(GameKind::Chess, now);
    assert_eq!(app.current_kind(), Some(GameKind::Chess));

    app.switch_game(GameKind::TicTacToe, now);
    let Some(GameWrapper::TicTacToe(game)) = app.current_game() else {
        panic!("expected tic-tac-toe");
    };
    assert!(!game.board().is_empty_cell(0));
    assert_eq!(count_messages(&app, "Welcome to Tic Tac Toe!"), 2);
    assert_eq!(count_messages(&app, "Welcome to Chess!"), 1);
}

#[test]
fn test_escape_to_menu_keeps_game() {
    let now = Instant::now();
    let mut app = memory_app();
    app.switch_game(GameKind::Chess, now);
    app.board_cursor = (6, 4);
    app.activate_cursor(now);
    app.board_cursor = (4, 4);
    app.activate_cursor(now);

    app.back_to_menu();
    assert_eq!(app.mode, AppMode::GameSelection);
    assert_eq!(app.selected_menu_item(), MenuItem::Game(GameKind::Chess));

    app.activate_selected(now);
    let Some(GameWrapper::Chess(game)) = app.current_game() else {
        panic!("expected chess");
    };
    assert_eq!(game.status_text(), "Black's turn");
}

#[test]
fn test_show_statistics_without_save() {
    let now = Instant::now();
    let mut app = memory_app();
    app.show_statistics(now);
    assert_eq!(app.mode, AppMode::GameSelection);
    let latest = app.notifications().latest().unwrap();
    assert_eq!(latest.message, NO_STATS_MESSAGE);
    assert_eq!(latest.kind, NotificationKind::Info);
}

#[test]
fn test_save_then_show_statistics() {
    let now = Instant::now();
    let mut app = memory_app();
    app.switch_game(GameKind::TicTacToe, now);
    // X on 0, 1 and 3 while the computer plays its replies
    for index in [0, 1, 3, 6, 7] {
        app.board_cursor = ((index / 3) as u16, (index % 3) as u16);
        app.activate_cursor(now);
        app.tick(now);
    }

    app.save_statistics(now);
    assert_eq!(app.notifications().latest().unwrap().message, STATS_SAVED_MESSAGE);

    app.show_statistics(now);
    assert_eq!(app.mode, AppMode::Statistics);
    let shown = *app.shown_statistics().unwrap();
    assert_eq!(shown, app.collect_statistics());
    assert_eq!(shown.tic_tac_toe.player_wins, 0);
    assert_eq!(shown.tic_tac_toe.ai_wins, 1);
    assert_eq!(shown.arcade.lives, 3);
}

#[test]
fn test_file_store_round_trip() {
    let dir = temp_dir("round-trip");
    let mut store = FileStore::new(&dir);
    let mut stats = Statistics::default();
    stats.arcade.high_score = 420;
    stats.chess.games_played = 2;
    persistence::save_record(&mut store, STATISTICS_KEY, &stats).unwrap();

    assert!(dir.join("statistics.json").exists());
    let reopened = FileStore::new(&dir);
    assert_eq!(persistence::load_statistics(&reopened), stats);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_corrupt_file_loads_defaults() {
    let dir = temp_dir("corrupt");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("preferences.json"), "theme = light").unwrap();
    let store = FileStore::new(&dir);
    assert_eq!(persistence::load_preferences(&store), Preferences::default());
    assert!(store.load(PREFERENCES_KEY).unwrap().is_some());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_preferences_survive_restart() {
    let dir = temp_dir("restart");
    let now = Instant::now();
    {
        let mut app = App::new(config(), Box::new(FileStore::new(&dir)), now);
        app.toggle_theme(now);
        app.switch_game(GameKind::Arcade, now);
        assert_eq!(app.theme(), Theme::Light);
    }

    let app = App::new(config(), Box::new(FileStore::new(&dir)), now);
    assert_eq!(app.theme(), Theme::Light);
    assert_eq!(app.mode, AppMode::GameSelection);
    assert_eq!(app.selected_menu_item(), MenuItem::Game(GameKind::Arcade));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_saved_scores_seed_new_games() {
    let now = Instant::now();
    let mut store = MemoryStore::new();
    let mut stats = Statistics::default();
    stats.tic_tac_toe.player_wins = 3;
    stats.tic_tac_toe.ai_wins = 5;
    persistence::save_record(&mut store, STATISTICS_KEY, &stats).unwrap();

    let mut app = App::new(config(), Box::new(store), now);
    app.switch_game(GameKind::TicTacToe, now);
    let Some(GameWrapper::TicTacToe(game)) = app.current_game() else {
        panic!("expected tic-tac-toe");
    };
    assert_eq!((game.player_wins(), game.ai_wins()), (3, 5));
}

#[test]
fn test_start_game_from_config() {
    let mut cfg = config();
    cfg.start_game = Some(GameKind::Chess);
    let app = App::new(cfg, Box::new(MemoryStore::new()), Instant::now());
    assert_eq!(app.mode, AppMode::InGame);
    assert_eq!(app.current_kind(), Some(GameKind::Chess));
}

#[test]
fn test_notifications_expire_on_tick() {
    let now = Instant::now();
    let mut app = memory_app();
    app.switch_game(GameKind::Chess, now);
    assert_eq!(app.notifications().len(), 1);
    app.tick(now + Duration::from_secs(5));
    assert!(app.notifications().is_empty());
}
