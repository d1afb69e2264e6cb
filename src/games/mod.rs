//! # Game Implementations Module
//!
//! This module contains the three game engines driven by the shell.
//! Each engine implements the [`crate::GameEngine`] trait for the shared
//! lifecycle (reset, tick, status) and exposes its own accessors for the
//! renderer.
//!
//! ## Supported Games
//! - **Tic-Tac-Toe**: 3x3 board, human (X) against an exhaustive minimax AI (O)
//! - **Arcade**: Pac-Man style maze with dots, power pellets and patrol ghosts
//! - **Chess**: Standard 8x8 setup with pseudo-legal moves and queen promotion
//!
//! ## Adding New Games
//! To add a new game, create a new module and implement:
//! 1. A state type owning the board/actors
//! 2. The `GameEngine` trait for reset, tick and status
//! 3. A variant in `GameWrapper` and `GameKind`

pub mod arcade;
pub mod chess;
pub mod tictactoe;
