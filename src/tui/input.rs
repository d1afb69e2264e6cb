//! # Input Handling Module
//!
//! Translates key presses into shell actions. Global shortcuts are checked
//! first, then the key is routed by the current [`AppMode`].

use den::app::{App, AppMode};
use den::game_wrapper::GameKind;
use den::games::arcade::Direction;
use crossterm::event::KeyCode;
use std::time::Instant;

/// Handles a key press based on the current application mode
pub fn handle_key_press(app: &mut App, key_code: KeyCode, now: Instant) {
    if handle_global_shortcut(app, key_code, now) {
        return;
    }

    match app.mode {
        AppMode::GameSelection => handle_game_selection_input(key_code, app, now),
        AppMode::InGame => handle_ingame_input(key_code, app, now),
        AppMode::Statistics => handle_statistics_input(key_code, app, now),
    }
}

fn arrow_direction(key_code: KeyCode) -> Option<Direction> {
    match key_code {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Shortcuts available on every screen. Returns true if the key was used.
fn handle_global_shortcut(app: &mut App, key_code: KeyCode, now: Instant) -> bool {
    match key_code {
        KeyCode::Char(c @ '1'..='3') => {
            if let Some(kind) = GameKind::from_shortcut(c) {
                app.switch_game(kind, now);
            }
        }
        KeyCode::Char('t') | KeyCode::Char('T') => app.toggle_theme(now),
        KeyCode::Char('s') => app.save_statistics(now),
        KeyCode::Char('v') => app.show_statistics(now),
        KeyCode::Char('x') => app.dismiss_notification(),
        KeyCode::Char('q') => app.quit(),
        _ => return false,
    }
    true
}

fn handle_game_selection_input(key_code: KeyCode, app: &mut App, now: Instant) {
    if let Some(direction) = arrow_direction(key_code) {
        app.record_arrow(direction, now);
    }
    match key_code {
        KeyCode::Esc => app.quit(),
        KeyCode::Up => app.select_prev_item(),
        KeyCode::Down => app.select_next_item(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_selected(now),
        _ => {}
    }
}

fn handle_ingame_input(key_code: KeyCode, app: &mut App, now: Instant) {
    if let Some(direction) = arrow_direction(key_code) {
        app.handle_arrow(direction, now);
        return;
    }
    match key_code {
        KeyCode::Esc => app.back_to_menu(),
        KeyCode::Char('r') => app.reset_current_game(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate_cursor(now),
        _ => {}
    }
}

fn handle_statistics_input(key_code: KeyCode, app: &mut App, now: Instant) {
    if let Some(direction) = arrow_direction(key_code) {
        app.record_arrow(direction, now);
    }
    if let KeyCode::Esc | KeyCode::Enter = key_code {
        app.back_to_menu();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use den::app::{KONAMI_CODE, KONAMI_MESSAGE};
    use den::config::AppConfig;
    use den::persistence::MemoryStore;

    fn arrow_key(direction: Direction) -> KeyCode {
        match direction {
            Direction::Up => KeyCode::Up,
            Direction::Down => KeyCode::Down,
            Direction::Left => KeyCode::Left,
            Direction::Right => KeyCode::Right,
        }
    }

    #[test]
    fn test_statistics_screen_tracks_konami_arrows() {
        let now = Instant::now();
        let mut app = App::new(AppConfig::default(), Box::new(MemoryStore::new()), now);
        app.save_statistics(now);
        app.show_statistics(now);
        assert_eq!(app.mode, AppMode::Statistics);

        for direction in KONAMI_CODE {
            handle_key_press(&mut app, arrow_key(direction), now);
        }
        let hits = app
            .notifications()
            .iter()
            .filter(|n| n.message == KONAMI_MESSAGE)
            .count();
        assert_eq!(hits, 1);
        assert_eq!(app.mode, AppMode::Statistics);
    }
}
