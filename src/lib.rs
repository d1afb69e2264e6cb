//! # Gaming Den
//!
//! Three small games behind one navigation shell:
//! - **Tic-Tac-Toe** against an exhaustive minimax computer player
//! - **Pac-Man** style arcade clone with randomly patrolling ghosts
//! - **Chess** with pseudo-legal move generation (no check enforcement)
//!
//! Every engine is a leaf that owns its own state. The [`game_wrapper`]
//! module unifies them behind one enum, [`app`] is the shell that routes
//! between them, and [`persistence`] snapshots preferences and scores.

pub mod app;
pub mod config;
pub mod error;
pub mod game_wrapper;
pub mod games;
pub mod notifications;
pub mod persistence;

use std::time::Instant;

/// Common surface every game engine exposes to the shell.
///
/// Engines never fail on user input: invalid requests are ignored, so none
/// of these methods return errors.
pub trait GameEngine {
    /// Restores the engine's initial state.
    fn reset(&mut self);

    /// Advances time-driven behaviour (frame steps, delayed replies).
    ///
    /// Called once per host refresh. Engines without timed behaviour
    /// ignore it.
    fn tick(&mut self, _now: Instant) {}

    /// Returns true once the game reached a terminal state.
    fn is_over(&self) -> bool;

    /// Human-readable status line for the current state.
    fn status_text(&self) -> String;
}
