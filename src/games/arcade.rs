//! # Arcade Game Implementation
//!
//! A simplified Pac-Man style maze game. The player steers through a tile
//! map collecting dots and power pellets while three patrol ghosts wander
//! the corridors.
//!
//! ## Rules
//! - Dots are worth 10 points, power pellets 50 (no power mode)
//! - Touching a patrol costs a life and sends every actor back to its start
//! - The game is won when no dots or pellets remain, lost when lives run out
//!
//! Positions are continuous pixel coordinates. An actor occupies the cell
//! found by floor division of its position by [`TILE_SIZE`].

use crate::GameEngine;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Side length of one map cell in pixels.
pub const TILE_SIZE: f32 = 20.0;

pub const INITIAL_LIVES: u32 = 3;

pub const DOT_POINTS: u32 = 10;
pub const PELLET_POINTS: u32 = 50;

pub const PLAYER_SPEED: f32 = 2.0;
pub const PLAYER_RADIUS: f32 = 18.0;
pub const PATROL_RADIUS: f32 = 16.0;

/// `#` wall, `.` dot, `o` power pellet, space empty.
const CLASSIC_LAYOUT: [&str; 20] = [
    "####################",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#o##.###.##.###.##o#",
    "#..................#",
    "#.##.#.######.#.##.#",
    "#....#...##...#....#",
    "####.### ## ###.####",
    "####.#........#.####",
    "    .#.      .#.    ",
    "####.#.######.#.####",
    "####.#........#.####",
    "####.# ###### #.####",
    "#........##........#",
    "#.##.###.##.###.##.#",
    "#..#............#..#",
    "##.#.#.######.#.#.##",
    "#o...#...##...#...o#",
    "#..................#",
    "####################",
];

const PLAYER_START: (usize, usize) = (10, 15);

const PATROL_STARTS: [PatrolSpec; 3] = [
    PatrolSpec {
        cell: (10, 9),
        direction: Direction::Right,
        color: PatrolColor::Red,
        speed: 1.5,
    },
    PatrolSpec {
        cell: (9, 9),
        direction: Direction::Left,
        color: PatrolColor::Pink,
        speed: 1.3,
    },
    PatrolSpec {
        cell: (11, 9),
        direction: Direction::Down,
        color: PatrolColor::Cyan,
        speed: 1.4,
    },
];

/// Contents of one map cell
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Wall,
    Dot,
    PowerPellet,
    Empty,
}

impl Cell {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Cell::Wall),
            '.' => Some(Cell::Dot),
            'o' => Some(Cell::PowerPellet),
            ' ' => Some(Cell::Empty),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Wall => '#',
            Cell::Dot => '.',
            Cell::PowerPellet => 'o',
            Cell::Empty => ' ',
        }
    }

    pub fn is_collectible(self) -> bool {
        matches!(self, Cell::Dot | Cell::PowerPellet)
    }
}

/// Rectangular tile map, indexed `[row][col]`
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Map {
    cells: Vec<Vec<Cell>>,
}

impl Default for Map {
    fn default() -> Self {
        Self::classic()
    }
}

impl Map {
    /// The built-in 20x20 maze
    pub fn classic() -> Self {
        // The layout constant only uses known characters
        Self::parse(&CLASSIC_LAYOUT).unwrap_or_else(|| Self { cells: Vec::new() })
    }

    /// Builds a map from text rows using `#`, `.`, `o` and space.
    ///
    /// Returns None on an unknown character, ragged rows, or no rows.
    pub fn parse(rows: &[&str]) -> Option<Self> {
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.chars().map(Cell::from_char).collect::<Option<Vec<_>>>())
            .collect::<Option<_>>()?;
        let width = cells.first()?.len();
        if width == 0 || cells.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { cells })
    }

    pub fn columns(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Playfield width in pixels
    pub fn width(&self) -> f32 {
        self.columns() as f32 * TILE_SIZE
    }

    pub fn height(&self) -> f32 {
        self.rows() as f32 * TILE_SIZE
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn set(&mut self, col: usize, row: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *slot = cell;
        }
    }

    /// Cell under a pixel position, or None outside the grid
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = (x / TILE_SIZE).floor();
        let row = (y / TILE_SIZE).floor();
        if col < 0.0 || row < 0.0 {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.columns() && row < self.rows()).then_some((col, row))
    }

    /// Number of dots and pellets still on the map
    pub fn collectibles(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.is_collectible())
            .count()
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Movement direction, in the order Right, Down, Left, Up
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Unit vector in screen coordinates (y grows downward)
    pub const fn delta(self) -> (f32, f32) {
        match self {
            Direction::Right => (1.0, 0.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Up => (0.0, -1.0),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PatrolColor {
    Red,
    Pink,
    Cyan,
}

impl PatrolColor {
    /// Hex colour of the ghost sprite
    pub const fn hex(self) -> &'static str {
        match self {
            PatrolColor::Red => "#FF0000",
            PatrolColor::Pink => "#FFB8FF",
            PatrolColor::Cyan => "#00FFFF",
        }
    }

    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            PatrolColor::Red => (0xFF, 0x00, 0x00),
            PatrolColor::Pink => (0xFF, 0xB8, 0xFF),
            PatrolColor::Cyan => (0x00, 0xFF, 0xFF),
        }
    }
}

struct PatrolSpec {
    cell: (usize, usize),
    direction: Direction,
    color: PatrolColor,
    speed: f32,
}

/// A moving circle on the playfield
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub next_direction: Direction,
    pub speed: f32,
    pub radius: f32,
}

impl Actor {
    fn at_cell(cell: (usize, usize), direction: Direction, speed: f32, radius: f32) -> Self {
        let (x, y) = cell_centre(cell);
        Self {
            x,
            y,
            direction,
            next_direction: direction,
            speed,
            radius,
        }
    }

    fn advance(&mut self) {
        let (dx, dy) = self.direction.delta();
        self.x += dx * self.speed;
        self.y += dy * self.speed;
    }

    fn distance_to(&self, other: &Actor) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn touches(&self, other: &Actor) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Patrol {
    pub actor: Actor,
    pub color: PatrolColor,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArcadeStatus {
    Running,
    GameOver,
    Won,
}

/// Notable outcome of one frame step
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrameEvent {
    LifeLost,
    GameOver,
    Won,
}

fn cell_centre((col, row): (usize, usize)) -> (f32, f32) {
    (
        col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
        row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
    )
}

/// Wraps an x coordinate that left the playfield horizontally.
pub fn wrap_horizontal(x: f32, width: f32) -> f32 {
    if x < 0.0 {
        width
    } else if x > width {
        0.0
    } else {
        x
    }
}

/// Complete arcade session state
#[derive(Debug, Clone)]
pub struct ArcadeState {
    map: Map,
    initial_map: Map,
    player: Actor,
    patrols: Vec<Patrol>,
    score: u32,
    lives: u32,
    status: ArcadeStatus,
    rng: Xoshiro256PlusPlus,
}

impl ArcadeState {
    /// New game on the classic maze, patrol choices driven by `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_map(Map::classic(), seed)
    }

    /// New game on a custom map. Actors use the classic start cells, so
    /// the map must be at least 20x16 for them to land on the grid.
    pub fn with_map(map: Map, seed: u64) -> Self {
        Self {
            initial_map: map.clone(),
            map,
            player: Self::player_start(),
            patrols: Self::patrol_starts(),
            score: 0,
            lives: INITIAL_LIVES,
            status: ArcadeStatus::Running,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    fn player_start() -> Actor {
        Actor::at_cell(PLAYER_START, Direction::Right, PLAYER_SPEED, PLAYER_RADIUS)
    }

    fn patrol_starts() -> Vec<Patrol> {
        PATROL_STARTS
            .iter()
            .map(|start| Patrol {
                actor: Actor::at_cell(start.cell, start.direction, start.speed, PATROL_RADIUS),
                color: start.color,
            })
            .collect()
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn patrols(&self) -> &[Patrol] {
        &self.patrols
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn status(&self) -> ArcadeStatus {
        self.status
    }

    pub fn dots_remaining(&self) -> usize {
        self.map.collectibles()
    }

    /// Buffers a turn; it is taken as soon as the way is open.
    pub fn set_direction(&mut self, direction: Direction) {
        self.player.next_direction = direction;
    }

    /// Moves the player to a pixel position, for scripted scenarios.
    pub fn place_player(&mut self, x: f32, y: f32) {
        self.player.x = x;
        self.player.y = y;
    }

    /// Whether `actor` may not move in `direction`: the probe half a tile
    /// ahead is a wall or off the grid.
    pub fn is_blocked(&self, actor: &Actor, direction: Direction) -> bool {
        let (dx, dy) = direction.delta();
        let probe_x = actor.x + dx * TILE_SIZE / 2.0;
        let probe_y = actor.y + dy * TILE_SIZE / 2.0;
        match self.map.cell_at(probe_x, probe_y) {
            Some((col, row)) => self.map.get(col, row) == Some(Cell::Wall),
            None => true,
        }
    }

    /// Runs one fixed frame update. Ignored unless the game is running.
    ///
    /// The win check runs after collisions, so clearing the map wins even
    /// on the frame that costs the last life.
    pub fn step(&mut self) -> Option<FrameEvent> {
        if self.status != ArcadeStatus::Running {
            return None;
        }

        self.move_player();
        self.move_patrols();
        self.collect();
        let collision = self.check_collisions();

        if self.map.collectibles() == 0 {
            self.status = ArcadeStatus::Won;
            info!(score = self.score, "arcade cleared");
            return Some(FrameEvent::Won);
        }
        collision
    }

    fn move_player(&mut self) {
        let width = self.map.width();
        let mut player = self.player;
        if player.next_direction != player.direction
            && !self.is_blocked(&player, player.next_direction)
        {
            player.direction = player.next_direction;
        }
        if !self.is_blocked(&player, player.direction) {
            player.advance();
            player.x = wrap_horizontal(player.x, width);
        }
        self.player = player;
    }

    fn move_patrols(&mut self) {
        let width = self.map.width();
        for i in 0..self.patrols.len() {
            let mut actor = self.patrols[i].actor;
            if self.is_blocked(&actor, actor.direction) {
                let open: Vec<Direction> = Direction::ALL
                    .iter()
                    .copied()
                    .filter(|&d| !self.is_blocked(&actor, d))
                    .collect();
                if let Some(&choice) = open.choose(&mut self.rng) {
                    actor.direction = choice;
                    actor.next_direction = choice;
                }
            }
            if !self.is_blocked(&actor, actor.direction) {
                actor.advance();
                actor.x = wrap_horizontal(actor.x, width);
            }
            self.patrols[i].actor = actor;
        }
    }

    fn collect(&mut self) {
        let Some((col, row)) = self.map.cell_at(self.player.x, self.player.y) else {
            return;
        };
        let points = match self.map.get(col, row) {
            Some(Cell::Dot) => DOT_POINTS,
            Some(Cell::PowerPellet) => PELLET_POINTS,
            _ => return,
        };
        self.map.set(col, row, Cell::Empty);
        self.score += points;
    }

    fn check_collisions(&mut self) -> Option<FrameEvent> {
        let hit = self
            .patrols
            .iter()
            .any(|patrol| self.player.touches(&patrol.actor));
        if !hit {
            return None;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.status = ArcadeStatus::GameOver;
            info!(score = self.score, "arcade game over");
            Some(FrameEvent::GameOver)
        } else {
            debug!(lives = self.lives, "life lost");
            self.reset_positions();
            Some(FrameEvent::LifeLost)
        }
    }

    /// Sends the player home facing right. Patrols only get their start
    /// coordinates back and keep heading the way they were going.
    fn reset_positions(&mut self) {
        self.player = Self::player_start();
        for (patrol, start) in self.patrols.iter_mut().zip(PATROL_STARTS.iter()) {
            let (x, y) = cell_centre(start.cell);
            patrol.actor.x = x;
            patrol.actor.y = y;
        }
    }
}

impl GameEngine for ArcadeState {
    fn reset(&mut self) {
        self.map = self.initial_map.clone();
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.status = ArcadeStatus::Running;
        self.player = Self::player_start();
        self.patrols = Self::patrol_starts();
    }

    fn tick(&mut self, _now: Instant) {
        self.step();
    }

    fn is_over(&self) -> bool {
        self.status != ArcadeStatus::Running
    }

    fn status_text(&self) -> String {
        match self.status {
            ArcadeStatus::Running => "Use arrow keys to move".to_string(),
            ArcadeStatus::GameOver => "Game Over!".to_string(),
            ArcadeStatus::Won => "You Win!".to_string(),
        }
    }
}

impl fmt::Display for ArcadeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}  Lives: {}", self.score, self.lives)?;
        write!(f, "{}", self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_map_shape() {
        let map = Map::classic();
        assert_eq!(map.columns(), 20);
        assert_eq!(map.rows(), 20);
        assert_eq!(map.width(), 400.0);
        assert_eq!(map.get(1, 3), Some(Cell::PowerPellet));
        assert_eq!(map.get(0, 0), Some(Cell::Wall));
        assert_eq!(map.get(10, 9), Some(Cell::Empty));
        assert_eq!(map.get(20, 0), None);
    }

    #[test]
    fn test_parse_rejects_bad_rows() {
        assert!(Map::parse(&["#.#", "#."]).is_none());
        assert!(Map::parse(&["#x#"]).is_none());
        assert!(Map::parse(&[]).is_none());
    }

    #[test]
    fn test_initial_layout() {
        let game = ArcadeState::new(1);
        assert_eq!((game.player().x, game.player().y), (210.0, 310.0));
        assert_eq!(game.player().direction, Direction::Right);
        let patrols = game.patrols();
        assert_eq!((patrols[0].actor.x, patrols[0].actor.y), (210.0, 190.0));
        assert_eq!((patrols[1].actor.x, patrols[1].actor.y), (190.0, 190.0));
        assert_eq!((patrols[2].actor.x, patrols[2].actor.y), (230.0, 190.0));
        assert_eq!(patrols[1].actor.direction, Direction::Left);
        assert_eq!(patrols[2].color.hex(), "#00FFFF");
        assert_eq!(game.lives(), INITIAL_LIVES);
        assert_eq!(game.status_text(), "Use arrow keys to move");
    }

    #[test]
    fn test_probe_blocks_walls_and_edges() {
        let game = ArcadeState::new(1);
        let player = *game.player();
        // (10, 16) is a wall; (11, 15) and (10, 14) are open
        assert!(game.is_blocked(&player, Direction::Down));
        assert!(!game.is_blocked(&player, Direction::Right));
        // From a cell centre the upward probe lands on the cell's own edge
        assert!(!game.is_blocked(&player, Direction::Up));

        let mut edge = player;
        edge.x = 5.0;
        edge.y = 190.0;
        assert!(game.is_blocked(&edge, Direction::Left));
    }

    #[test]
    fn test_player_collects_dot_once() {
        let mut game = ArcadeState::new(7);
        let before = game.dots_remaining();
        game.step();
        assert_eq!(game.score(), DOT_POINTS);
        assert_eq!(game.dots_remaining(), before - 1);

        // Still inside the same cell for the next few frames
        for _ in 0..3 {
            game.step();
        }
        assert_eq!(game.score(), DOT_POINTS);

        // x reaches 220, the next cell
        game.step();
        assert_eq!(game.player().x, 220.0);
        assert_eq!(game.score(), 2 * DOT_POINTS);
    }

    #[test]
    fn test_buffered_turn_waits_for_opening() {
        let mut game = ArcadeState::new(3);
        game.set_direction(Direction::Down);
        game.step();
        // Wall below, so the player keeps heading right
        assert_eq!(game.player().direction, Direction::Right);
        assert_eq!(game.player().next_direction, Direction::Down);
    }

    #[test]
    fn test_collision_costs_life_and_resets_positions() {
        let mut game = ArcadeState::new(11);
        game.place_player(210.0, 190.0);
        assert_eq!(game.step(), Some(FrameEvent::LifeLost));
        assert_eq!(game.lives(), 2);
        assert_eq!((game.player().x, game.player().y), (210.0, 310.0));
        assert_eq!(game.patrols()[0].actor.x, 210.0);
        assert_eq!(game.status(), ArcadeStatus::Running);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut game = ArcadeState::new(11);
        for _ in 0..INITIAL_LIVES {
            game.place_player(210.0, 190.0);
            game.step();
        }
        assert_eq!(game.lives(), 0);
        assert_eq!(game.status(), ArcadeStatus::GameOver);
        assert_eq!(game.status_text(), "Game Over!");

        // Terminal: frames are ignored
        let player = *game.player();
        assert_eq!(game.step(), None);
        assert_eq!(*game.player(), player);
    }

    #[test]
    fn test_clearing_map_wins() {
        let mut map = Map::classic();
        for row in 0..map.rows() {
            for col in 0..map.columns() {
                if map.get(col, row).is_some_and(Cell::is_collectible) && (col, row) != (10, 15) {
                    map.set(col, row, Cell::Empty);
                }
            }
        }
        let mut game = ArcadeState::with_map(map, 5);
        assert_eq!(game.dots_remaining(), 1);
        assert_eq!(game.step(), Some(FrameEvent::Won));
        assert_eq!(game.status_text(), "You Win!");
        assert!(game.is_over());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut game = ArcadeState::new(2);
        let full = game.dots_remaining();
        for _ in 0..40 {
            game.step();
        }
        game.place_player(210.0, 190.0);
        game.step();
        game.reset();
        assert_eq!(game.score(), 0);
        assert_eq!(game.lives(), INITIAL_LIVES);
        assert_eq!(game.dots_remaining(), full);
        assert_eq!((game.player().x, game.player().y), (210.0, 310.0));
    }

    /// One patrol at the centre of `cell` on a custom map
    fn lone_patrol(rows: &[&str], cell: (usize, usize), direction: Direction, seed: u64) -> ArcadeState {
        let map = Map::parse(rows).unwrap();
        let mut game = ArcadeState::with_map(map, seed);
        game.patrols = vec![Patrol {
            actor: Actor::at_cell(cell, direction, 1.5, PATROL_RADIUS),
            color: PatrolColor::Red,
        }];
        game
    }

    #[test]
    fn test_blocked_patrol_turns_into_opening() {
        // Walls right of and below (1, 1); the left and up checks land in (1, 1) itself
        let rows = ["###", "# #", "###"];
        let mut seen = Vec::new();
        for seed in 0..64 {
            let mut game = lone_patrol(&rows, (1, 1), Direction::Right, seed);
            game.move_patrols();
            let actor = game.patrols()[0].actor;
            assert!(
                matches!(actor.direction, Direction::Left | Direction::Up),
                "turned {:?} into a wall",
                actor.direction
            );
            assert_eq!(actor.next_direction, actor.direction);
            let moved = match actor.direction {
                Direction::Left => (28.5, 30.0),
                _ => (30.0, 28.5),
            };
            assert_eq!((actor.x, actor.y), moved);
            if !seen.contains(&actor.direction) {
                seen.push(actor.direction);
            }
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_walled_in_patrol_keeps_direction() {
        let rows = ["###", "###", "###"];
        let mut game = lone_patrol(&rows, (1, 1), Direction::Down, 9);
        for _ in 0..10 {
            game.move_patrols();
        }
        let actor = game.patrols()[0].actor;
        assert_eq!(actor.direction, Direction::Down);
        assert_eq!((actor.x, actor.y), (30.0, 30.0));
    }

    #[test]
    fn test_open_patrol_never_turns() {
        let rows = [
            "############",
            "#          #",
            "#          #",
            "#          #",
            "############",
        ];
        let mut game = lone_patrol(&rows, (1, 2), Direction::Right, 13);
        for frame in 1..=100 {
            game.move_patrols();
            let actor = game.patrols()[0].actor;
            assert_eq!(actor.direction, Direction::Right);
            assert_eq!((actor.x, actor.y), (30.0 + 1.5 * frame as f32, 50.0));
        }
    }

    /// Classic maze with a single dot left at the red patrol's start cell
    fn one_dot_under_red_patrol() -> ArcadeState {
        let mut map = Map::classic();
        for row in 0..map.rows() {
            for col in 0..map.columns() {
                if map.get(col, row).is_some_and(Cell::is_collectible) {
                    map.set(col, row, Cell::Empty);
                }
            }
        }
        map.set(10, 9, Cell::Dot);
        ArcadeState::with_map(map, 17)
    }

    #[test]
    fn test_last_dot_wins_in_collision_frame() {
        let mut game = one_dot_under_red_patrol();
        game.place_player(210.0, 190.0);
        assert_eq!(game.step(), Some(FrameEvent::Won));
        assert_eq!(game.lives(), INITIAL_LIVES - 1);
        assert_eq!(game.dots_remaining(), 0);
        assert_eq!(game.status(), ArcadeStatus::Won);
    }

    #[test]
    fn test_last_dot_beats_last_life() {
        let mut game = one_dot_under_red_patrol();
        for _ in 1..INITIAL_LIVES {
            // The pink patrol's cell holds nothing
            game.place_player(190.0, 190.0);
            assert_eq!(game.step(), Some(FrameEvent::LifeLost));
        }
        game.place_player(210.0, 190.0);
        assert_eq!(game.step(), Some(FrameEvent::Won));
        assert_eq!(game.lives(), 0);
        assert_eq!(game.status_text(), "You Win!");
    }

    #[test]
    fn test_life_loss_keeps_patrol_headings() {
        let mut game = ArcadeState::new(11);
        game.patrols[0].actor.direction = Direction::Up;
        game.set_direction(Direction::Left);
        game.place_player(210.0, 190.0);
        assert_eq!(game.step(), Some(FrameEvent::LifeLost));

        let red = game.patrols()[0].actor;
        assert_eq!((red.x, red.y), (210.0, 190.0));
        assert_eq!(red.direction, Direction::Up);
        assert_eq!(game.patrols()[1].actor.direction, Direction::Left);
        assert_eq!(game.player().direction, Direction::Right);
        assert_eq!(game.player().next_direction, Direction::Right);

        // A full reset restores the starting headings too
        game.reset();
        assert_eq!(game.patrols()[0].actor.direction, Direction::Right);
    }

    #[test]
    fn test_wrap_horizontal() {
        assert_eq!(wrap_horizontal(-0.5, 400.0), 400.0);
        assert_eq!(wrap_horizontal(400.5, 400.0), 0.0);
        assert_eq!(wrap_horizontal(200.0, 400.0), 200.0);
    }
}
