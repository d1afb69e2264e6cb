//! # Tic-Tac-Toe Game Implementation
//!
//! This module implements tic-tac-toe between a human player (X) and a
//! computer player (O) that searches the full game tree with minimax.
//!
//! ## Rules
//! - The human always moves first and plays X
//! - A row, column or diagonal owned by one mark wins the game
//! - A full board without a winning line is a draw
//!
//! ## Computer Player
//! The computer evaluates every empty cell with minimax. Terminal scores are
//! `10 - depth` for a computer win and `depth - 10` for a human win, so
//! faster wins and slower losses are preferred. The reply is played after a
//! short "thinking" delay that the host advances through [`GameEngine::tick`].

use crate::GameEngine;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Default delay before the computer replies.
pub const DEFAULT_THINK_DELAY: Duration = Duration::from_millis(500);

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A player's mark. X is the human, O the computer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Final result of a finished game.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

/// The 3x3 board as a flat row-major array of cells.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from a 9-character pattern of `X`, `O` and `.`.
    ///
    /// Any other character is read as an empty cell.
    pub fn from_pattern(pattern: &str) -> Self {
        let mut board = Self::new();
        for (i, ch) in pattern.chars().take(CELL_COUNT).enumerate() {
            board.cells[i] = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                _ => None,
            };
        }
        board
    }

    /// Returns the mark at `index`, or `None` for an empty or out-of-range cell.
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_cell(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    /// Places `mark` on an empty in-range cell. Returns false otherwise.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_empty_cell(index) {
            return false;
        }
        self.cells[index] = Some(mark);
        true
    }

    fn clear(&mut self, index: usize) {
        self.cells[index] = None;
    }

    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CELL_COUNT).filter(move |&i| self.cells[i].is_none())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns true if any winning triple is fully owned by `mark`.
    pub fn check_win(&self, mark: Mark) -> bool {
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&i| self.cells[i] == Some(mark)))
    }

    /// Returns the first completed triple and its owner.
    pub fn winning_line(&self) -> Option<(Mark, [usize; 3])> {
        WINNING_LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            line.iter()
                .all(|&i| self.cells[i] == Some(first))
                .then_some((first, *line))
        })
    }

    /// Returns the result if the board is terminal.
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some((mark, _)) = self.winning_line() {
            Some(Outcome::Win(mark))
        } else if self.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Returns a copy with every X replaced by O and vice versa.
    pub fn swapped(&self) -> Self {
        let mut cells = self.cells;
        for cell in &mut cells {
            *cell = cell.map(Mark::opponent);
        }
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                match self.cells[row * 3 + col] {
                    Some(mark) => write!(f, "{} ", mark)?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Picks the computer's (O) best reply with exhaustive minimax.
///
/// Every root child is searched with a full alpha-beta window, so root
/// scores equal plain minimax scores. Ties go to the lowest index.
/// Returns `None` when the board is already terminal.
pub fn compute_best_move(board: &Board) -> Option<usize> {
    if board.outcome().is_some() {
        return None;
    }

    let mut scratch = *board;
    let mut best: Option<(usize, i32)> = None;
    let candidates: Vec<usize> = board.empty_cells().collect();
    for index in candidates {
        scratch.place(index, Mark::O);
        let score = minimax(&mut scratch, 0, false, i32::MIN, i32::MAX);
        scratch.clear(index);

        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}

fn minimax(board: &mut Board, depth: i32, maximizing: bool, mut alpha: i32, mut beta: i32) -> i32 {
    if board.check_win(Mark::O) {
        return 10 - depth;
    }
    if board.check_win(Mark::X) {
        return depth - 10;
    }
    if board.is_full() {
        return 0;
    }

    let candidates: Vec<usize> = board.empty_cells().collect();
    if maximizing {
        let mut best = i32::MIN;
        for index in candidates {
            board.place(index, Mark::O);
            let score = minimax(board, depth + 1, false, alpha, beta);
            board.clear(index);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in candidates {
            board.place(index, Mark::X);
            let score = minimax(board, depth + 1, true, alpha, beta);
            board.clear(index);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Complete tic-tac-toe session state, including the running score.
#[derive(Debug, Clone)]
pub struct TicTacToeState {
    board: Board,
    current: Mark,
    outcome: Option<Outcome>,
    player_wins: u32,
    ai_wins: u32,
    think_delay: Duration,
    /// When the scheduled computer reply becomes due
    reply_due: Option<Instant>,
}

impl Default for TicTacToeState {
    fn default() -> Self {
        Self::new(DEFAULT_THINK_DELAY)
    }
}

impl TicTacToeState {
    pub fn new(think_delay: Duration) -> Self {
        Self {
            board: Board::new(),
            current: Mark::X,
            outcome: None,
            player_wins: 0,
            ai_wins: 0,
            think_delay,
            reply_due: None,
        }
    }

    /// Seeds the score counters, e.g. from saved statistics.
    pub fn with_scores(mut self, player_wins: u32, ai_wins: u32) -> Self {
        self.player_wins = player_wins;
        self.ai_wins = ai_wins;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Mark {
        self.current
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_active(&self) -> bool {
        self.outcome.is_none()
    }

    pub fn player_wins(&self) -> u32 {
        self.player_wins
    }

    pub fn ai_wins(&self) -> u32 {
        self.ai_wins
    }

    /// True while a computer reply is scheduled but not yet played.
    pub fn is_thinking(&self) -> bool {
        self.reply_due.is_some()
    }

    /// The completed triple to highlight, if the game was won.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        self.board.winning_line().map(|(_, line)| line)
    }

    /// Places the human's X at `index`.
    ///
    /// Ignored if the cell is occupied or out of range, the game is over,
    /// or it is not the human's turn. When the game continues, the computer
    /// reply is scheduled for `now + think_delay`. Returns whether the move
    /// was applied.
    #[instrument(skip(self, now), fields(player = %self.current))]
    pub fn apply_move(&mut self, index: usize, now: Instant) -> bool {
        if !self.is_active() || self.current != Mark::X || !self.board.is_empty_cell(index) {
            return false;
        }

        self.place_mark(index, Mark::X);
        if self.is_active() {
            self.reply_due = Some(now + self.think_delay);
        }
        true
    }

    /// Plays the computer's reply immediately. Returns the chosen cell.
    pub fn play_computer_move(&mut self) -> Option<usize> {
        self.reply_due = None;
        if !self.is_active() || self.current != Mark::O {
            return None;
        }
        let index = compute_best_move(&self.board)?;
        debug!(index, "computer reply");
        self.place_mark(index, Mark::O);
        Some(index)
    }

    fn place_mark(&mut self, index: usize, mark: Mark) {
        self.board.place(index, mark);

        match self.board.outcome() {
            Some(Outcome::Win(winner)) => {
                match winner {
                    Mark::X => self.player_wins += 1,
                    Mark::O => self.ai_wins += 1,
                }
                debug!(%winner, "tic-tac-toe won");
                self.outcome = Some(Outcome::Win(winner));
            }
            Some(Outcome::Draw) => {
                debug!("tic-tac-toe drawn");
                self.outcome = Some(Outcome::Draw);
            }
            None => self.current = mark.opponent(),
        }
    }
}

impl GameEngine for TicTacToeState {
    fn reset(&mut self) {
        self.board = Board::new();
        self.current = Mark::X;
        self.outcome = None;
        self.reply_due = None;
    }

    fn tick(&mut self, now: Instant) {
        if let Some(due) = self.reply_due {
            if now >= due {
                self.play_computer_move();
            }
        }
    }

    fn is_over(&self) -> bool {
        !self.is_active()
    }

    fn status_text(&self) -> String {
        match self.outcome {
            Some(Outcome::Win(Mark::X)) => "You win!".to_string(),
            Some(Outcome::Win(Mark::O)) => "AI wins!".to_string(),
            Some(Outcome::Draw) => "It's a draw!".to_string(),
            None => match self.current {
                Mark::X => "Your turn (X)".to_string(),
                Mark::O => "AI thinking...".to_string(),
            },
        }
    }
}
