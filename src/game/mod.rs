//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The board is a torus: leaving one edge re-enters from the opposite one, so the
//! only way to lose is running into your own body.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction, InvalidDirection};
pub use config::{ConfigError, ConfigOverrides, GameConfig, MAX_GRID_SIZE};
pub use engine::{EngineError, GameEngine, StepOutcome, StepResult};
pub use state::{GameState, Position, Snake};
