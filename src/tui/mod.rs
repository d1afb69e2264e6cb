//! # Terminal User Interface Module
//!
//! Full-screen terminal front end built on Ratatui. It owns the terminal
//! for the lifetime of the session: it polls for key presses, forwards them
//! to the shell, ticks the shell once per iteration and redraws.
//!
//! The poll timeout of roughly one display frame is what paces the arcade
//! game, which advances one fixed step per tick.

use den::app::App;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::info;

pub mod input;
pub mod theme;
pub mod widgets;

/// Target interval between shell ticks
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Runs the event loop until the shell asks to quit.
///
/// The terminal is restored even when drawing or reading input fails.
pub fn run(app: &mut App) -> io::Result<()> {
    let mut terminal = init_terminal()?;
    let result = event_loop(&mut terminal, app);
    restore_terminal(&mut terminal)?;
    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| widgets::render(app, f))?;

        let timeout = FRAME_INTERVAL.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    input::handle_key_press(app, key.code, Instant::now());
                }
            }
        }

        if last_tick.elapsed() >= FRAME_INTERVAL {
            app.tick(Instant::now());
            last_tick = Instant::now();
        }
    }

    info!("quit requested");
    Ok(())
}

fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    terminal.show_cursor()?;
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    Ok(())
}
