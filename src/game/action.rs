use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Raised when a raw (dx, dy) pair is not one of the four unit vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("({dx}, {dy}) is not a cardinal unit vector")]
pub struct InvalidDirection {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    /// Candidate order used by the autopilot; earlier entries win distance ties.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// The reversal of this direction
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = InvalidDirection;

    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Down),
            (-1, 0) => Ok(Direction::Left),
            (1, 0) => Ok(Direction::Right),
            _ => Err(InvalidDirection { dx, dy }),
        }
    }
}

/// Action that can be taken in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Request a turn toward a specific direction
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl Action {
    /// The direction change this action requests, if any
    pub fn requested(self) -> Option<Direction> {
        match self {
            Action::Move(direction) => Some(direction),
            Action::Continue => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}
