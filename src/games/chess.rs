//! # Chess Game Implementation
//!
//! This module implements two-player chess on the standard 8x8 setup with
//! pseudo-legal move generation: every piece follows its movement pattern
//! and occupancy rules, but moves that leave the mover's own king attacked
//! are not filtered out.
//!
//! ## Rules
//! - White moves first; sides alternate after every move
//! - A pawn reaching the farthest rank becomes a queen
//! - No castling, no en-passant, no check detection
//! - A side with no pseudo-legal moves at all has lost ("checkmate")
//!
//! Row 0 is Black's back rank and row 7 is White's, matching the on-screen
//! orientation with White at the bottom.

use crate::GameEngine;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Board side length.
pub const BOARD_SIZE: usize = 8;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// A player color
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row step of a forward pawn move (White moves up the screen)
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub const fn pawn_home_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    pub const fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A piece type (without color)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Uppercase letter used in board dumps
    pub const fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

/// A colored piece
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Unicode chess glyph for this piece
    pub const fn symbol(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }

    /// Letter form: uppercase for White, lowercase for Black
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// A board coordinate. `row` 0 is the top of the screen (Black's side).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    /// Creates a square, returning None if out of range
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// The square `(dr, dc)` away, if it is still on the board
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_SIZE as u8).flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    /// Algebraic name, e.g. `e2`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col) as char;
        let rank = BOARD_SIZE as u8 - self.row;
        write!(f, "{}{}", file, rank)
    }
}

impl FromStr for Square {
    type Err = String;

    /// Parses algebraic notation such as `e2` or `H8`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("expected a square like `e2`, got `{}`", s));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(format!("square `{}` is off the board", s));
        }
        let col = file - b'a';
        let row = BOARD_SIZE as u8 - (rank - b'0');
        Square::new(row, col).ok_or_else(|| format!("square `{}` is off the board", s))
    }
}

/// Piece placement on the 8x8 grid
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// The standard starting position
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            let back = color.back_row() as usize;
            let pawns = color.pawn_home_row() as usize;
            for col in 0..BOARD_SIZE {
                board.squares[back][col] = Some(Piece::new(BACK_RANK[col], color));
                board.squares[pawns][col] = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Squares holding a piece of `color`
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.get(sq).is_some_and(|p| p.color == color))
    }

    /// Pseudo-legal destinations for the piece on `square`.
    ///
    /// Returns an empty list for an empty square.
    pub fn pseudo_legal_moves(&self, square: Square) -> Vec<Square> {
        let Some(piece) = self.get(square) else {
            return Vec::new();
        };

        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(square, piece.color),
            PieceKind::Knight => self.offset_moves(square, piece.color, &KNIGHT_OFFSETS),
            PieceKind::King => self.offset_moves(square, piece.color, &KING_OFFSETS),
            PieceKind::Rook => self.ray_moves(square, piece.color, &ROOK_DIRECTIONS),
            PieceKind::Bishop => self.ray_moves(square, piece.color, &BISHOP_DIRECTIONS),
            PieceKind::Queen => {
                let mut moves = self.ray_moves(square, piece.color, &ROOK_DIRECTIONS);
                moves.extend(self.ray_moves(square, piece.color, &BISHOP_DIRECTIONS));
                moves
            }
        }
    }

    /// Total number of pseudo-legal moves available to `color`
    pub fn count_moves(&self, color: Color) -> usize {
        self.occupied_by(color)
            .map(|sq| self.pseudo_legal_moves(sq).len())
            .sum()
    }

    fn pawn_moves(&self, square: Square, color: Color) -> Vec<Square> {
        let mut moves = Vec::new();
        let dir = color.pawn_direction();

        if let Some(one) = square.offset(dir, 0) {
            if self.get(one).is_none() {
                moves.push(one);
                if square.row == color.pawn_home_row() {
                    if let Some(two) = one.offset(dir, 0) {
                        if self.get(two).is_none() {
                            moves.push(two);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(target) = square.offset(dir, dc) {
                if self.get(target).is_some_and(|p| p.color != color) {
                    moves.push(target);
                }
            }
        }

        moves
    }

    fn offset_moves(&self, square: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| square.offset(dr, dc))
            .filter(|&target| self.get(target).map_or(true, |p| p.color != color))
            .collect()
    }

    fn ray_moves(&self, square: Square, color: Color, directions: &[(i8, i8)]) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(dr, dc) in directions {
            let mut current = square;
            while let Some(next) = current.offset(dr, dc) {
                match self.get(next) {
                    None => moves.push(next),
                    Some(occupant) => {
                        if occupant.color != color {
                            moves.push(next);
                        }
                        break;
                    }
                }
                current = next;
            }
        }
        moves
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.squares {
            for cell in row {
                match cell {
                    Some(piece) => write!(f, "{} ", piece.to_char())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of the naive end-of-game check.
///
/// `Checkmate` is declared whenever the side to move has no pseudo-legal
/// moves, without looking at whether its king is attacked. `Stalemate` is
/// kept for the status vocabulary; that rule never produces it.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Terminal {
    None,
    Checkmate,
    Stalemate,
}

/// The currently selected square and where its piece may go
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Selection {
    pub square: Square,
    pub targets: Vec<Square>,
}

/// Complete chess session state
#[derive(Debug, Clone)]
pub struct ChessState {
    board: Board,
    turn: Color,
    selection: Option<Selection>,
    captured: Vec<Piece>,
    terminal: Terminal,
    games_played: u32,
    wins: u32,
}

impl Default for ChessState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessState {
    pub fn new() -> Self {
        Self::from_board(Board::starting(), Color::White)
    }

    /// Starts from an arbitrary position with `turn` to move
    pub fn from_board(board: Board, turn: Color) -> Self {
        Self {
            board,
            turn,
            selection: None,
            captured: Vec::new(),
            terminal: Terminal::None,
            games_played: 0,
            wins: 0,
        }
    }

    /// Seeds the completed-games counters, e.g. from saved statistics.
    pub fn with_record(mut self, games_played: u32, wins: u32) -> Self {
        self.games_played = games_played;
        self.wins = wins;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }

    /// Side that won, once the game is over
    pub fn winner(&self) -> Option<Color> {
        match self.terminal {
            Terminal::Checkmate => Some(self.turn.opposite()),
            Terminal::None | Terminal::Stalemate => None,
        }
    }

    /// Completed games, counted when a game reaches a terminal state
    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Completed games won by White
    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn pseudo_legal_moves(&self, square: Square) -> Vec<Square> {
        self.board.pseudo_legal_moves(square)
    }

    /// Naive terminal check for `color`
    pub fn terminal_state(&self, color: Color) -> Terminal {
        if self.board.count_moves(color) == 0 {
            Terminal::Checkmate
        } else {
            Terminal::None
        }
    }

    /// Handles a click on `square` the way the board UI does.
    ///
    /// Clicking one of the side to move's pieces selects it; clicking a
    /// target of the current selection plays the move; anything else clears
    /// the selection. Ignored once the game is over.
    pub fn click(&mut self, square: Square) {
        if self.terminal != Terminal::None {
            return;
        }

        if self.board.get(square).is_some_and(|p| p.color == self.turn) {
            self.selection = Some(Selection {
                square,
                targets: self.board.pseudo_legal_moves(square),
            });
            return;
        }

        let chosen = self
            .selection
            .take()
            .filter(|sel| sel.targets.contains(&square));
        if let Some(sel) = chosen {
            self.apply_move(sel.square, square);
        }
    }

    /// Moves the piece on `from` to `to`.
    ///
    /// Ignored unless `from` holds a piece of the side to move and `to` is
    /// one of its pseudo-legal destinations. Captures are recorded, a pawn
    /// reaching its promotion row becomes a queen, the turn passes, and the
    /// new side to move is checked for the end of the game. Returns whether
    /// the move was applied.
    pub fn apply_move(&mut self, from: Square, to: Square) -> bool {
        if self.terminal != Terminal::None {
            return false;
        }
        let Some(mut piece) = self.board.get(from) else {
            return false;
        };
        if piece.color != self.turn || !self.board.pseudo_legal_moves(from).contains(&to) {
            return false;
        }

        if let Some(victim) = self.board.get(to) {
            debug!(%from, %to, victim = ?victim.kind, "capture");
            self.captured.push(victim);
        }
        if piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row() {
            piece.kind = PieceKind::Queen;
        }
        self.board.set(to, Some(piece));
        self.board.set(from, None);
        self.selection = None;

        self.turn = self.turn.opposite();
        self.terminal = self.terminal_state(self.turn);
        if self.terminal != Terminal::None {
            self.games_played += 1;
            if self.winner() == Some(Color::White) {
                self.wins += 1;
            }
            info!(winner = ?self.winner(), "chess game over");
        }
        true
    }
}

impl GameEngine for ChessState {
    fn reset(&mut self) {
        self.board = Board::starting();
        self.turn = Color::White;
        self.selection = None;
        self.captured.clear();
        self.terminal = Terminal::None;
    }

    fn is_over(&self) -> bool {
        self.terminal != Terminal::None
    }

    fn status_text(&self) -> String {
        match self.terminal {
            Terminal::Checkmate => format!("{} wins!", self.turn.opposite()),
            Terminal::Stalemate => "It's a draw!".to_string(),
            Terminal::None => format!("{}'s turn", self.turn),
        }
    }
}
