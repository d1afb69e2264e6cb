//! # UI Widgets Module
//!
//! Drawing functions for the menu, the three game boards, the statistics
//! screen and the notification stack.

use crate::tui::theme::UITheme;
use den::app::{App, AppMode, MenuItem};
use den::game_wrapper::GameWrapper;
use den::games::arcade::{ArcadeState, Cell};
use den::games::chess::{ChessState, Square, BOARD_SIZE};
use den::games::tictactoe::{Mark, TicTacToeState};
use den::notifications::NotificationKind;
use den::GameEngine;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

const SHORTCUTS: &str = "1-3 switch game | t theme | s save stats | v view stats | r reset | Esc menu | q quit";

pub fn render(app: &mut App, frame: &mut Frame) {
    let theme = UITheme::for_theme(app.theme());
    let area = frame.size();
    frame.render_widget(Block::default().style(theme.base_style()), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(area);

    match app.mode {
        AppMode::GameSelection => draw_game_selection_menu(frame, app, &theme, main_layout[0]),
        AppMode::InGame => draw_game_view(frame, app, &theme, main_layout[0]),
        AppMode::Statistics => draw_statistics(frame, app, &theme, main_layout[0]),
    }

    let help = Paragraph::new(SHORTCUTS)
        .style(theme.muted_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Shortcuts"),
        );
    frame.render_widget(help, main_layout[1]);

    draw_notifications(frame, app, &theme, area);
}

fn draw_game_selection_menu(f: &mut Frame, app: &mut App, theme: &UITheme, area: Rect) {
    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            MenuItem::Game(kind) => ListItem::new(format!("{}. {}", i + 1, kind.display_name())),
            other => ListItem::new(format!("   {}", other.label())),
        })
        .collect();

    let list = List::new(items)
        .style(theme.text_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Gaming Den - Select a Game"),
        )
        .highlight_style(theme.highlighted_text_style())
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut app.menu_state);
}

fn draw_game_view(f: &mut Frame, app: &App, theme: &UITheme, area: Rect) {
    let Some(game) = app.current_game() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(game.kind().display_name());
    let inner = block.inner(chunks[0]);
    f.render_widget(block, chunks[0]);

    match game {
        GameWrapper::TicTacToe(state) => draw_tictactoe_board(f, app, state, theme, inner),
        GameWrapper::Arcade(state) => draw_arcade_board(f, state, theme, inner),
        GameWrapper::Chess(state) => draw_chess_board(f, app, state, theme, inner),
    }

    draw_game_info(f, app, game, theme, chunks[1]);
}

fn draw_game_info(f: &mut Frame, app: &App, game: &GameWrapper, theme: &UITheme, area: Rect) {
    let status_style = if game.is_over() {
        theme.highlighted_text_style()
    } else {
        theme.text_style()
    };
    let mut text = vec![
        Line::from(Span::styled(game.status_text(), status_style)),
        Line::from(""),
    ];

    match game {
        GameWrapper::TicTacToe(state) => {
            text.push(Line::from(format!("You (X): {}", state.player_wins())));
            text.push(Line::from(format!("AI (O): {}", state.ai_wins())));
            text.push(Line::from(""));
            text.push(Line::from("Arrows move the cursor, Enter/Space places X"));
        }
        GameWrapper::Arcade(state) => {
            text.push(Line::from(format!("Score: {}", state.score())));
            text.push(Line::from(format!("Lives: {}", state.lives())));
            text.push(Line::from(format!("High score: {}", app.arcade_high_score().max(state.score()))));
            text.push(Line::from(format!("Dots left: {}", state.dots_remaining())));
            text.push(Line::from(""));
            text.push(Line::from("Arrows steer"));
        }
        GameWrapper::Chess(state) => {
            text.push(Line::from(format!("Captured: {}", state.captured().len())));
            let captured: String = state.captured().iter().map(|p| p.symbol()).collect();
            if !captured.is_empty() {
                text.push(Line::from(captured));
            }
            if let Some(selection) = state.selection() {
                text.push(Line::from(format!(
                    "Selected {} ({} moves)",
                    selection.square,
                    selection.targets.len()
                )));
            }
            text.push(Line::from(""));
            text.push(Line::from("Arrows move the cursor, Enter/Space selects and moves"));
        }
    }

    if game.is_over() {
        text.push(Line::from(""));
        text.push(Line::from(Span::styled("Press 'r' to play again", theme.info_style())));
    }

    let paragraph = Paragraph::new(text)
        .style(theme.text_style())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title("Game Info"),
        );
    f.render_widget(paragraph, area);
}

fn draw_tictactoe_board(f: &mut Frame, app: &App, state: &TicTacToeState, theme: &UITheme, area: Rect) {
    let winning = state.winning_line();
    let mut lines = Vec::new();

    for row in 0..3usize {
        let mut spans = Vec::new();
        for col in 0..3usize {
            let index = row * 3 + col;
            let is_cursor = (row as u16, col as u16) == app.board_cursor;
            let (symbol, mut style) = match state.board().get(index) {
                Some(Mark::X) => (" X ", theme.x_style()),
                Some(Mark::O) => (" O ", theme.o_style()),
                None => (" · ", theme.muted_style()),
            };
            if winning.is_some_and(|line| line.contains(&index)) {
                style = theme.highlighted_text_style();
            }
            if is_cursor {
                style = theme.cursor_style();
            }
            spans.push(Span::styled(symbol, style));
            if col < 2 {
                spans.push(Span::styled("│", theme.border_style()));
            }
        }
        lines.push(Line::from(spans));
        if row < 2 {
            lines.push(Line::styled("───┼───┼───", theme.border_style()));
        }
    }

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_chess_board(f: &mut Frame, app: &App, state: &ChessState, theme: &UITheme, area: Rect) {
    let selection = state.selection();
    let mut lines = Vec::new();

    for row in 0..BOARD_SIZE {
        let rank = BOARD_SIZE - row;
        let mut spans = vec![Span::styled(format!("{} ", rank), theme.muted_style())];
        for col in 0..BOARD_SIZE {
            let Some(square) = Square::new(row as u8, col as u8) else {
                continue;
            };
            let symbol = state
                .board()
                .get(square)
                .map_or(' ', |piece| piece.symbol());

            let mut bg = theme.square_color(row, col);
            if selection.is_some_and(|s| s.targets.contains(&square)) {
                bg = theme.target_color();
            }
            let mut style = Style::default().fg(Color::Black).bg(bg);
            if selection.is_some_and(|s| s.square == square) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            if (row as u16, col as u16) == app.board_cursor {
                style = theme.cursor_style();
            }
            spans.push(Span::styled(format!(" {} ", symbol), style));
        }
        lines.push(Line::from(spans));
    }
    let files: String = (b'a'..=b'h').map(|c| format!(" {} ", c as char)).collect();
    lines.push(Line::styled(format!("  {}", files), theme.muted_style()));

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_arcade_board(f: &mut Frame, state: &ArcadeState, theme: &UITheme, area: Rect) {
    let map = state.map();
    let mut grid: Vec<Vec<Span>> = map
        .iter_rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Cell::Wall => Span::styled("██", theme.wall_style()),
                    Cell::Dot => Span::styled(" ·", theme.dot_style()),
                    Cell::PowerPellet => Span::styled(" ●", theme.dot_style()),
                    Cell::Empty => Span::raw("  "),
                })
                .collect()
        })
        .collect();

    for patrol in state.patrols() {
        if let Some((col, row)) = map.cell_at(patrol.actor.x, patrol.actor.y) {
            let (r, g, b) = patrol.color.rgb();
            let style = Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD);
            grid[row][col] = Span::styled("ᗣ ", style);
        }
    }
    let player = state.player();
    if let Some((col, row)) = map.cell_at(player.x, player.y) {
        grid[row][col] = Span::styled("ᗧ ", theme.player_style());
    }

    let lines: Vec<Line> = grid.into_iter().map(Line::from).collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_statistics(f: &mut Frame, app: &App, theme: &UITheme, area: Rect) {
    let mut text = vec![
        Line::from(Span::styled("Your Gaming Statistics", theme.highlighted_text_style())),
        Line::from(""),
    ];

    if let Some(stats) = app.shown_statistics() {
        text.extend([
            Line::from("Tic Tac Toe:"),
            Line::from(format!("  Player Wins: {}", stats.tic_tac_toe.player_wins)),
            Line::from(format!("  AI Wins: {}", stats.tic_tac_toe.ai_wins)),
            Line::from(""),
            Line::from("Pac-Man:"),
            Line::from(format!("  High Score: {}", stats.arcade.high_score)),
            Line::from(format!("  Lives: {}", stats.arcade.lives)),
            Line::from(""),
            Line::from("Chess:"),
            Line::from(format!("  Games Played: {}", stats.chess.games_played)),
            Line::from(format!("  Wins: {}", stats.chess.wins)),
        ]);
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled("Press Esc to return", theme.muted_style())));

    let paragraph = Paragraph::new(text).style(theme.text_style()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title("Statistics"),
    );
    f.render_widget(paragraph, area);
}

fn draw_notifications(f: &mut Frame, app: &App, theme: &UITheme, area: Rect) {
    let width = 48.min(area.width);
    let x = area.x + area.width - width;
    let mut y = area.y + 1;

    for notification in app.notifications().iter().rev() {
        if y + 3 > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, 3);
        let style = match notification.kind {
            NotificationKind::Info => theme.info_style(),
            NotificationKind::Success => theme.success_style(),
            NotificationKind::Error => theme.error_style(),
        };
        f.render_widget(Clear, rect);
        let toast = Paragraph::new(notification.message.as_str())
            .block(Block::default().borders(Borders::ALL).border_style(style))
            .style(theme.base_style().patch(style));
        f.render_widget(toast, rect);
        y += 3;
    }
}
