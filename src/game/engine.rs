use rand::{Rng, SeedableRng, rngs::StdRng};
use thiserror::Error;
use tracing::{debug, info, trace};

use super::{
    action::Direction,
    config::{ConfigError, GameConfig},
    state::{GameState, Position, Snake, grid_side},
};
use crate::autopilot::{Autopilot, DirectionPolicy};

/// Errors raised by the simulation engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Every cell is covered by the snake, so food has nowhere to go
    #[error("no free cell left on a {grid_size}x{grid_size} board")]
    BoardFull { grid_size: usize },
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The game was already over; nothing changed
    Halted,
    /// The snake moved one cell without eating
    Moved,
    /// The snake ate, grew by one segment and food respawned
    Ate,
    /// The new head landed on the body; the game is over
    Collided,
    /// The snake ate the last food the board can hold; the game is over
    BoardFilled,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the game is over after this step
    pub terminated: bool,
    /// What happened during the step
    pub outcome: StepOutcome,
    /// Heading in effect after the step
    pub direction: Direction,
}

impl StepResult {
    pub fn ate_food(&self) -> bool {
        matches!(self.outcome, StepOutcome::Ate | StepOutcome::BoardFilled)
    }
}

/// The game engine that handles all game logic.
///
/// Food placement is the only randomness the engine consumes, so a seeded
/// `R` makes a run reproducible for a fixed sequence of direction requests.
pub struct GameEngine<R: Rng = StdRng, P: DirectionPolicy = Autopilot> {
    config: GameConfig,
    rng: R,
    policy: P,
}

impl GameEngine {
    /// Create an engine; food placement is seeded from `config.seed` when set
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine that draws food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            policy: Autopilot,
        })
    }
}

impl<R: Rng, P: DirectionPolicy> GameEngine<R, P> {
    /// Swap the controller used while autopilot is enabled
    pub fn with_policy<Q: DirectionPolicy>(self, policy: Q) -> GameEngine<R, Q> {
        GameEngine {
            config: self.config,
            rng: self.rng,
            policy,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a new game: a one-segment snake at the origin heading right
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(self.config.start, Direction::Right);
        let food = match self.spawn_food(&snake, self.config.grid_size) {
            Ok(food) => food,
            Err(_) => unreachable!("a validated grid has at least four cells"),
        };

        let mut state = GameState::new(snake, food, self.config.grid_size);
        state.autopilot_enabled = self.config.autopilot;
        debug!(?food, grid_size = state.grid_size, "new game");
        state
    }

    /// Execute one step of the game.
    ///
    /// `requested` is honoured only under manual control and only when it is
    /// not a reversal of the current heading. A finished game is left untouched.
    pub fn step(&mut self, state: &mut GameState, requested: Option<Direction>) -> StepResult {
        if state.game_over {
            return StepResult {
                terminated: true,
                outcome: StepOutcome::Halted,
                direction: state.direction(),
            };
        }

        let wanted = if state.autopilot_enabled {
            Some(self.policy.choose_direction(state))
        } else {
            requested
        };

        if let Some(direction) = wanted {
            if state.snake.direction.is_opposite(direction) {
                trace!(?direction, "ignoring reversal");
            } else {
                state.snake.direction = direction;
            }
        }

        let direction = state.direction();
        let new_head = state
            .head()
            .moved_in_direction(direction)
            .wrapped(state.grid_size);

        if state.snake.collides_with_body(new_head) {
            state.game_over = true;
            state.steps += 1;
            info!(score = state.score, steps = state.steps, ?new_head, "self collision");
            return StepResult {
                terminated: true,
                outcome: StepOutcome::Collided,
                direction,
            };
        }

        let ate_food = new_head == state.food;
        state.snake.advance(new_head, ate_food);
        state.steps += 1;

        if !ate_food {
            return StepResult {
                terminated: false,
                outcome: StepOutcome::Moved,
                direction,
            };
        }

        state.score += 1;
        match self.spawn_food(&state.snake, state.grid_size) {
            Ok(food) => {
                debug!(score = state.score, ?food, "food eaten");
                state.food = food;
                StepResult {
                    terminated: false,
                    outcome: StepOutcome::Ate,
                    direction,
                }
            }
            Err(err) => {
                state.game_over = true;
                info!(score = state.score, %err, "board filled");
                StepResult {
                    terminated: true,
                    outcome: StepOutcome::BoardFilled,
                    direction,
                }
            }
        }
    }

    /// Pure form of [`step`](Self::step): the input state is left as it was
    pub fn next_state(
        &mut self,
        state: &GameState,
        requested: Option<Direction>,
    ) -> (GameState, StepResult) {
        let mut next = state.clone();
        let result = self.step(&mut next, requested);
        (next, result)
    }

    /// Pick a uniformly random cell not covered by `snake`.
    ///
    /// Samples and rejects until a free cell turns up. With
    /// `max_food_attempts` set, gives up sampling after that many draws and
    /// picks uniformly among the free cells instead.
    pub fn spawn_food(&mut self, snake: &Snake, grid_size: usize) -> Result<Position, EngineError> {
        if snake.len() >= grid_size.saturating_mul(grid_size) {
            return Err(EngineError::BoardFull { grid_size });
        }

        let n = grid_side(grid_size);
        let attempts = self.config.max_food_attempts;
        let mut tries = 0u32;

        while attempts.is_none_or(|cap| tries < cap) {
            let pos = Position::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            if !snake.occupies(pos) {
                return Ok(pos);
            }
            tries += 1;
        }

        let free: Vec<Position> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Position::new(x, y)))
            .filter(|&pos| !snake.occupies(pos))
            .collect();

        if free.is_empty() {
            return Err(EngineError::BoardFull { grid_size });
        }

        debug!(tries, free = free.len(), "falling back to free-cell scan");
        Ok(free[self.rng.gen_range(0..free.len())])
    }
}
