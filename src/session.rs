//! A running game as seen by whatever drives the clock
//!
//! The session owns the engine, the current state and a single pending
//! direction request. Hosts call [`GameSession::tick`] at their own cadence;
//! nothing here knows about timers.

use rand::{Rng, rngs::StdRng};
use tracing::info;

use crate::autopilot::{Autopilot, DirectionPolicy};
use crate::game::{ConfigError, Direction, GameConfig, GameEngine, GameState, StepResult};

pub struct GameSession<R: Rng = StdRng, P: DirectionPolicy = Autopilot> {
    engine: GameEngine<R, P>,
    state: GameState,
    pending_direction: Option<Direction>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_engine(GameEngine::new(config)?))
    }
}

impl<R: Rng, P: DirectionPolicy> GameSession<R, P> {
    /// Start a fresh game on an existing engine
    pub fn from_engine(mut engine: GameEngine<R, P>) -> Self {
        let state = engine.reset();
        Self {
            engine,
            state,
            pending_direction: None,
        }
    }

    /// Resume from a given state, e.g. a hand-built fixture
    pub fn with_state(engine: GameEngine<R, P>, state: GameState) -> Self {
        Self {
            engine,
            state,
            pending_direction: None,
        }
    }

    /// Read-only view for renderers and tests
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Record a manual turn for the next tick; a later request replaces it.
    ///
    /// Ignored while the autopilot steers.
    pub fn request_direction(&mut self, direction: Direction) {
        if !self.state.autopilot_enabled {
            self.pending_direction = Some(direction);
        }
    }

    /// Advance one tick, consuming any pending request
    pub fn tick(&mut self) -> StepResult {
        let requested = self.pending_direction.take();
        self.engine.step(&mut self.state, requested)
    }

    pub fn enable_autopilot(&mut self) {
        if !self.state.autopilot_enabled {
            info!("autopilot engaged");
        }
        self.state.enable_autopilot();
        self.pending_direction = None;
    }

    pub fn disable_autopilot(&mut self) {
        if self.state.autopilot_enabled {
            info!("manual control");
        }
        self.state.disable_autopilot();
    }

    /// Replace the current game with a new one, keeping the steering mode
    pub fn restart(&mut self) {
        let autopilot = self.state.autopilot_enabled;
        self.state = self.engine.reset();
        self.state.autopilot_enabled = autopilot;
        self.pending_direction = None;
    }

    pub fn is_over(&self) -> bool {
        self.state.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Position, StepOutcome};

    fn session() -> GameSession {
        GameSession::new(GameConfig::default().with_seed(11)).unwrap()
    }

    #[test]
    fn test_new_session_starts_manual_at_origin() {
        let session = session();
        assert_eq!(session.state().head(), Position::new(10, 10));
        assert!(!session.state().autopilot_enabled);
        assert_eq!(session.pending_direction(), None);
    }

    #[test]
    fn test_latest_request_wins_and_is_consumed() {
        let mut session = session();
        session.request_direction(Direction::Up);
        session.request_direction(Direction::Down);

        session.tick();
        assert_eq!(session.state().direction(), Direction::Down);
        assert_eq!(session.pending_direction(), None);

        // Nothing pending: keep heading down
        session.tick();
        assert_eq!(session.state().head(), Position::new(10, 12));
    }

    #[test]
    fn test_requests_ignored_under_autopilot() {
        let mut session = session();
        session.enable_autopilot();
        session.request_direction(Direction::Up);
        assert_eq!(session.pending_direction(), None);
    }

    #[test]
    fn test_enabling_autopilot_drops_pending_request() {
        let mut session = session();
        session.request_direction(Direction::Up);
        session.enable_autopilot();
        assert_eq!(session.pending_direction(), None);
    }

    #[test]
    fn test_mode_switch_does_not_touch_game() {
        let mut session = session();
        session.tick();
        let snake = session.state().snake.clone();
        let food = session.state().food;
        let score = session.state().score;

        session.enable_autopilot();
        session.disable_autopilot();
        session.enable_autopilot();

        assert_eq!(session.state().snake, snake);
        assert_eq!(session.state().food, food);
        assert_eq!(session.state().score, score);
    }

    #[test]
    fn test_restart_keeps_mode() {
        let mut session = session();
        session.enable_autopilot();
        for _ in 0..5 {
            session.tick();
        }

        session.restart();

        assert!(session.state().autopilot_enabled);
        assert_eq!(session.state().steps, 0);
        assert_eq!(session.state().snake.len(), 1);
        assert!(!session.is_over());
    }

    #[test]
    fn test_autopilot_session_scores() {
        let mut session = session();
        session.enable_autopilot();

        // A lone segment cannot collide, and the greedy walk reaches any
        // food on a 20x20 board in well under 60 moves.
        let mut ate = false;
        for _ in 0..60 {
            if session.tick().outcome == StepOutcome::Ate {
                ate = true;
                break;
            }
        }
        assert!(ate);
        assert_eq!(session.state().score, 1);
    }
}
