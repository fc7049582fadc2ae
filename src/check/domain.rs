//! Generators for game values
//!
//! Snakes are drawn as self-avoiding walks on the torus, so consecutive
//! segments are neighbours and the heading points away from the neck, the
//! same shapes the engine produces during play.

use rand::{Rng, seq::SliceRandom};

use super::generator::{Generator, boolean, constant_from, integer, nat, record};
use crate::game::state::grid_side;
use crate::game::{Direction, GameState, MAX_GRID_SIZE, Position, Snake};

/// Any cell on an `n`x`n` board
pub fn position(grid_size: usize) -> Generator<Position> {
    assert!(grid_size <= MAX_GRID_SIZE, "board too large: {grid_size}");
    let max = grid_side(grid_size) - 1;
    record(integer(0, max), integer(0, max), Position::new)
}

pub fn direction() -> Generator<Direction> {
    constant_from(Direction::ALL.to_vec())
}

/// A snake of `min_len..=max_len` distinct, adjacent segments.
///
/// The walk may end early if it boxes itself in, but never below one segment.
pub fn snake(min_len: usize, max_len: usize, grid_size: usize) -> Generator<Snake> {
    assert!(min_len >= 1 && min_len <= max_len);
    let head = position(grid_size);
    let heading = direction();

    Generator::new(move |rng| {
        let target = rng.gen_range(min_len..=max_len);
        let mut body = vec![head.generate(rng)];

        while body.len() < target {
            let last = body[body.len() - 1];
            let mut options: Vec<Position> = Direction::ALL
                .iter()
                .map(|&d| last.moved_in_direction(d).wrapped(grid_size))
                .filter(|pos| !body.contains(pos))
                .collect();
            options.shuffle(rng);
            match options.first() {
                Some(&next) => body.push(next),
                None => break,
            }
        }

        let direction = match body.get(1) {
            Some(&neck) => heading_from(neck, body[0], grid_size),
            None => heading.generate(rng),
        };
        Snake::from_segments(body, direction)
    })
}

/// A live game with food off the snake and a random steering mode
pub fn game_state(grid_size: usize) -> Generator<GameState> {
    assert!(grid_size >= 4, "board too small for generated snakes");
    let snakes = snake(1, 8, grid_size);
    let cells = position(grid_size);
    let scores = nat(100);
    let autopilot = boolean();

    Generator::new(move |rng| {
        let snake = snakes.generate(rng);
        let food = loop {
            let pos = cells.generate(rng);
            if !snake.occupies(pos) {
                break pos;
            }
        };

        let mut state = GameState::new(snake, food, grid_size);
        state.score = scores.generate(rng);
        state.autopilot_enabled = autopilot.generate(rng);
        state
    })
}

/// Direction that carries `from` onto `to` in one wrapped step
fn heading_from(from: Position, to: Position, grid_size: usize) -> Direction {
    Direction::ALL
        .into_iter()
        .find(|&d| from.moved_in_direction(d).wrapped(grid_size) == to)
        .unwrap_or(Direction::Right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn adjacent(a: Position, b: Position, grid_size: usize) -> bool {
        Direction::ALL
            .into_iter()
            .any(|d| a.moved_in_direction(d).wrapped(grid_size) == b)
    }

    #[test]
    fn test_positions_in_bounds() {
        let generator = position(7);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..300 {
            let pos = generator.generate(&mut rng);
            assert!((0..7).contains(&pos.x) && (0..7).contains(&pos.y));
        }
    }

    #[test]
    fn test_snakes_are_connected_and_distinct() {
        let generator = snake(1, 12, 10);
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let snake = generator.generate(&mut rng);
            assert!(!snake.is_empty() && snake.len() <= 12);

            let body: Vec<Position> = snake.body.iter().copied().collect();
            for (i, segment) in body.iter().enumerate() {
                assert!(!body[i + 1..].contains(segment));
            }
            for pair in body.windows(2) {
                assert!(adjacent(pair[0], pair[1], 10));
            }
            if body.len() > 1 {
                // Heading points away from the neck
                assert_eq!(
                    body[1].moved_in_direction(snake.direction).wrapped(10),
                    body[0]
                );
            }
        }
    }

    #[test]
    fn test_game_states_are_live_with_free_food() {
        let generator = game_state(20);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let state = generator.generate(&mut rng);
            assert!(!state.game_over);
            assert!(!state.is_occupied_by_snake(state.food));
            assert!(state.is_in_bounds(state.food));
        }
    }
}
