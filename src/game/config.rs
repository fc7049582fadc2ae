use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::state::{Position, grid_side};

/// Largest board the engine and renderer accept
pub const MAX_GRID_SIZE: usize = 1024;

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    GridTooSmall(usize),
    #[error("grid size must be at most {max}, got {grid_size}")]
    GridTooLarge { grid_size: usize, max: usize },
    #[error("start position ({x}, {y}) lies outside a {grid_size}x{grid_size} grid")]
    OriginOutOfBounds { x: i32, y: i32, grid_size: usize },
    #[error("tick interval must be positive")]
    ZeroTickInterval,
    #[error("max_food_attempts must be positive when set")]
    ZeroFoodAttempts,
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Cells per side of the square, toroidal grid
    pub grid_size: usize,
    /// Pixel size of a cell; only meaningful to graphical front ends
    pub cell_size: u32,
    /// Milliseconds between ticks when a real-time host drives the game
    pub tick_interval_ms: u64,
    /// Where the length-1 snake starts
    pub start: Position,
    /// Whether new games start under autopilot control
    pub autopilot: bool,
    /// Seed for food placement; entropy is used when absent
    pub seed: Option<u64>,
    /// Random food placement retries before falling back to a free-cell scan
    pub max_food_attempts: Option<u32>,
}

/// Values given on the command line; `None`/`false` leaves the file's value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub grid_size: Option<usize>,
    pub tick_interval_ms: Option<u64>,
    pub seed: Option<u64>,
    /// Only switches the autopilot on; there is no flag to force manual
    pub autopilot: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            cell_size: 20,
            tick_interval_ms: 200,
            start: Position::new(10, 10),
            autopilot: false,
            seed: None,
            max_food_attempts: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size, starting in the middle
    pub fn new(grid_size: usize) -> Self {
        let middle = grid_side(grid_size / 2);
        Self {
            grid_size,
            start: Position::new(middle, middle),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Fix the food placement seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Start from `path` (or the defaults), apply `overrides`, then validate.
    ///
    /// The file is only checked after the overrides land, so a flag can
    /// repair a value the file gets wrong.
    pub fn resolve(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line values. A new grid size recentres `start`.
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(grid_size) = overrides.grid_size {
            let middle = grid_side(grid_size / 2);
            self.grid_size = grid_size;
            self.start = Position::new(middle, middle);
        }
        if let Some(tick_ms) = overrides.tick_interval_ms {
            self.tick_interval_ms = tick_ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        if overrides.autopilot {
            self.autopilot = true;
        }
        self
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check that all parameters describe a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge {
                grid_size: self.grid_size,
                max: MAX_GRID_SIZE,
            });
        }

        let n = grid_side(self.grid_size);
        if !(0..n).contains(&self.start.x) || !(0..n).contains(&self.start.y) {
            return Err(ConfigError::OriginOutOfBounds {
                x: self.start.x,
                y: self.start.y,
                grid_size: self.grid_size,
            });
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.max_food_attempts == Some(0) {
            return Err(ConfigError::ZeroFoodAttempts);
        }

        Ok(())
    }

    /// Total number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }
}
