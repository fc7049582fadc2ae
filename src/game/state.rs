use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::action::Direction;

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction, without wrapping
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold each axis back into `[0, grid_size)`
    pub fn wrapped(&self, grid_size: usize) -> Self {
        let n = grid_side(grid_size);
        Self {
            x: self.x.rem_euclid(n),
            y: self.y.rem_euclid(n),
        }
    }

    /// Plain Manhattan distance; does not look across the wrap seam
    pub fn manhattan_distance(&self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Side length of a board as a coordinate; saturates for boards no config accepts
pub(crate) fn grid_side(grid_size: usize) -> i32 {
    i32::try_from(grid_size).unwrap_or(i32::MAX)
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: VecDeque<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// A single-segment snake at `head`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
        }
    }

    /// Build a snake from explicit head-first segments
    ///
    /// # Panics
    ///
    /// Panics if `segments` is empty; a snake always has a head.
    pub fn from_segments(segments: impl IntoIterator<Item = Position>, direction: Direction) -> Self {
        let body: VecDeque<Position> = segments.into_iter().collect();
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Body segments excluding the head
    pub fn body_segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter().skip(1)
    }

    /// True if `pos` is on a segment other than the head
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().any(|&segment| segment == pos)
    }

    /// True if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Prepend a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.push_front(new_head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub game_over: bool,
    pub autopilot_enabled: bool,
}

impl GameState {
    /// Create a fresh game state
    pub fn new(snake: Snake, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            food,
            grid_size,
            score: 0,
            steps: 0,
            game_over: false,
            autopilot_enabled: false,
        }
    }

    /// Literal fixture: head-first segments, heading, food and grid size
    pub fn from_parts(
        segments: impl IntoIterator<Item = Position>,
        direction: Direction,
        food: Position,
        grid_size: usize,
    ) -> Self {
        Self::new(Snake::from_segments(segments, direction), food, grid_size)
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn head(&self) -> Position {
        self.snake.head()
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let n = grid_side(self.grid_size);
        (0..n).contains(&pos.x) && (0..n).contains(&pos.y)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Hand steering to the autopilot; a no-op if it already steers
    pub fn enable_autopilot(&mut self) {
        self.autopilot_enabled = true;
    }

    /// Return steering to manual input; a no-op if already manual
    pub fn disable_autopilot(&mut self) {
        self.autopilot_enabled = false;
    }
}
