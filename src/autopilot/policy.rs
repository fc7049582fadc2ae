use crate::game::{Direction, GameState, Position};

/// Something that can steer the snake for a tick
pub trait DirectionPolicy {
    /// Pick the heading for the next step given the current state
    fn choose_direction(&mut self, state: &GameState) -> Direction;
}

/// The greedy, safety-first autopilot
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl DirectionPolicy for Autopilot {
    fn choose_direction(&mut self, state: &GameState) -> Direction {
        choose_direction(state)
    }
}

/// One scored move considered by the autopilot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    /// Destination cell after wrapping
    pub destination: Position,
    /// Manhattan distance from the wrapped destination to the food
    pub distance: u32,
    /// False if the destination is on any current segment
    pub safe: bool,
}

/// Score every non-reversing move, best first.
///
/// Ordering is safe-before-unsafe, then nearest-first. The sort is stable, so
/// exact ties keep the order of [`Direction::ALL`].
pub fn evaluate_candidates(state: &GameState) -> Vec<Candidate> {
    let current = state.direction();
    let head = state.head();

    let mut candidates: Vec<Candidate> = Direction::ALL
        .into_iter()
        .filter(|&direction| !current.is_opposite(direction))
        .map(|direction| {
            let destination = head.moved_in_direction(direction).wrapped(state.grid_size);
            Candidate {
                direction,
                destination,
                distance: destination.manhattan_distance(state.food),
                // The tail is treated as staying put even though it may move away
                safe: !state.snake.occupies(destination),
            }
        })
        .collect();

    candidates.sort_by_key(|candidate| (!candidate.safe, candidate.distance));
    candidates
}

/// Next heading for the snake under autopilot control.
///
/// Never returns the reversal of the current direction.
pub fn choose_direction(state: &GameState) -> Direction {
    match evaluate_candidates(state).first() {
        Some(best) => best.direction,
        None => unreachable!("only one of four directions is a reversal"),
    }
}
