//! Colour palettes for the dark and light themes.

use den::persistence::Theme;
use ratatui::style::{Color, Modifier, Style};

/// Resolved colours for one theme
pub struct UITheme {
    background_color: Color,
    border_color: Color,
    text_color: Color,
    muted_color: Color,
    highlight_color: Color,
    cursor_color: Color,
    error_color: Color,
    success_color: Color,
    info_color: Color,
    // Board styling
    square_light: Color,
    square_dark: Color,
    target_color: Color,
    x_color: Color,
    o_color: Color,
    wall_color: Color,
    dot_color: Color,
    player_color: Color,
}

impl UITheme {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
        }
    }

    fn dark() -> Self {
        Self {
            background_color: Color::Black,
            border_color: Color::White,
            text_color: Color::White,
            muted_color: Color::DarkGray,
            highlight_color: Color::Yellow,
            cursor_color: Color::Yellow,
            error_color: Color::Red,
            success_color: Color::Green,
            info_color: Color::Cyan,
            square_light: Color::Rgb(100, 100, 100),
            square_dark: Color::Rgb(60, 60, 60),
            target_color: Color::Rgb(40, 110, 60),
            x_color: Color::Red,
            o_color: Color::Blue,
            wall_color: Color::Blue,
            dot_color: Color::White,
            player_color: Color::Yellow,
        }
    }

    fn light() -> Self {
        Self {
            background_color: Color::White,
            border_color: Color::DarkGray,
            text_color: Color::Black,
            muted_color: Color::Gray,
            highlight_color: Color::Magenta,
            cursor_color: Color::Magenta,
            error_color: Color::Red,
            success_color: Color::Rgb(0, 120, 0),
            info_color: Color::Blue,
            square_light: Color::Rgb(240, 217, 181),
            square_dark: Color::Rgb(181, 136, 99),
            target_color: Color::Rgb(150, 200, 120),
            x_color: Color::Red,
            o_color: Color::Blue,
            wall_color: Color::Rgb(30, 60, 200),
            dot_color: Color::Rgb(120, 80, 0),
            player_color: Color::Rgb(200, 150, 0),
        }
    }

    /// Base style painted under every screen
    pub fn base_style(&self) -> Style {
        Style::default().fg(self.text_color).bg(self.background_color)
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_color)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted_color)
    }

    pub fn highlighted_text_style(&self) -> Style {
        Style::default()
            .fg(self.highlight_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border_color)
    }

    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.background_color)
            .bg(self.cursor_color)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error_color)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success_color)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info_color)
    }

    /// Background of a chess square
    pub fn square_color(&self, row: usize, col: usize) -> Color {
        if (row + col) % 2 == 0 {
            self.square_light
        } else {
            self.square_dark
        }
    }

    pub fn target_color(&self) -> Color {
        self.target_color
    }

    pub fn x_style(&self) -> Style {
        Style::default().fg(self.x_color).add_modifier(Modifier::BOLD)
    }

    pub fn o_style(&self) -> Style {
        Style::default().fg(self.o_color).add_modifier(Modifier::BOLD)
    }

    pub fn wall_style(&self) -> Style {
        Style::default().fg(self.wall_color)
    }

    pub fn dot_style(&self) -> Style {
        Style::default().fg(self.dot_color)
    }

    pub fn player_style(&self) -> Style {
        Style::default()
            .fg(self.player_color)
            .add_modifier(Modifier::BOLD)
    }
}
