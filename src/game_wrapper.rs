//! # Game Wrapper Module - Unified Game Interface
//!
//! Lets the shell and the renderer hold any of the three engines through a
//! single enum. Lifecycle calls (reset, tick, status) are forwarded by a
//! dispatch macro; engine-specific accessors are reached by matching on the
//! variant.
//!
//! [`GameKind`] names a game without owning one: it is what the menu lists,
//! what the quick-switch keys map to, and what is persisted as the last
//! active game.

use crate::games::arcade::ArcadeState;
use crate::games::chess::ChessState;
use crate::games::tictactoe::TicTacToeState;
use crate::GameEngine;
use std::fmt;
use std::str::FromStr;

/// Identifies one of the supported games
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum GameKind {
    TicTacToe,
    Arcade,
    Chess,
}

impl GameKind {
    /// Menu order, which is also the `1`..`3` quick-switch order
    pub const ALL: [GameKind; 3] = [GameKind::TicTacToe, GameKind::Arcade, GameKind::Chess];

    /// Stable identifier used on the command line and in saved preferences
    pub const fn slug(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::Arcade => "pacman",
            GameKind::Chess => "chess",
        }
    }

    /// Name shown to the player
    pub const fn display_name(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "Tic Tac Toe",
            GameKind::Arcade => "Pac-Man",
            GameKind::Chess => "Chess",
        }
    }

    /// Game bound to a quick-switch digit key
    pub fn from_shortcut(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        GameKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.slug() == wanted)
            .ok_or_else(|| format!("unknown game `{}` (expected tictactoe, pacman or chess)", s))
    }
}

/// Wrapper enum for all supported game engines
#[derive(Debug, Clone)]
pub enum GameWrapper {
    TicTacToe(TicTacToeState),
    Arcade(ArcadeState),
    Chess(ChessState),
}

impl GameWrapper {
    pub fn kind(&self) -> GameKind {
        match self {
            GameWrapper::TicTacToe(_) => GameKind::TicTacToe,
            GameWrapper::Arcade(_) => GameKind::Arcade,
            GameWrapper::Chess(_) => GameKind::Chess,
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl GameEngine for GameWrapper {
            fn reset(&mut self) {
                match self {
                    $(GameWrapper::$variant(g) => g.reset(),)*
                }
            }

            fn tick(&mut self, now: std::time::Instant) {
                match self {
                    $(GameWrapper::$variant(g) => g.tick(now),)*
                }
            }

            fn is_over(&self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_over(),)*
                }
            }

            fn status_text(&self) -> String {
                match self {
                    $(GameWrapper::$variant(g) => g.status_text(),)*
                }
            }
        }
    };
}

impl_game_dispatch!(TicTacToe, Arcade, Chess);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for kind in GameKind::ALL {
            assert_eq!(kind.slug().parse::<GameKind>(), Ok(kind));
        }
        assert_eq!("PacMan".parse::<GameKind>(), Ok(GameKind::Arcade));
        assert!("tetris".parse::<GameKind>().is_err());
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(GameKind::from_shortcut('1'), Some(GameKind::TicTacToe));
        assert_eq!(GameKind::from_shortcut('2'), Some(GameKind::Arcade));
        assert_eq!(GameKind::from_shortcut('3'), Some(GameKind::Chess));
        assert_eq!(GameKind::from_shortcut('0'), None);
        assert_eq!(GameKind::from_shortcut('4'), None);
        assert_eq!(GameKind::from_shortcut('x'), None);
    }

    #[test]
    fn test_dispatch_forwards_status() {
        let mut game = GameWrapper::Chess(ChessState::new());
        assert_eq!(game.kind(), GameKind::Chess);
        assert_eq!(game.status_text(), "White's turn");
        assert!(!game.is_over());
        game.reset();
        assert_eq!(game.status_text(), "White's turn");
    }
}
