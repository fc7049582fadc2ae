//! Aggregate statistics over many autopilot games
//!
//! Used by the headless simulator to summarise how well the greedy policy
//! does on a given board.

use serde::Serialize;

use crate::game::StepOutcome;

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEnd {
    Collided,
    BoardFilled,
    /// Stopped by the tick cap while still alive
    TickLimit,
}

impl GameEnd {
    /// Terminal outcome for a step, if the step ended the game
    pub fn from_outcome(outcome: StepOutcome) -> Option<Self> {
        match outcome {
            StepOutcome::Collided => Some(GameEnd::Collided),
            StepOutcome::BoardFilled => Some(GameEnd::BoardFilled),
            StepOutcome::Halted | StepOutcome::Moved | StepOutcome::Ate => None,
        }
    }
}

/// One finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    pub score: u32,
    pub ticks: u32,
    pub end: GameEnd,
}

/// Totals over a batch of games
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    games: Vec<GameRecord>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: GameRecord) {
        self.games.push(record);
    }

    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    pub fn total_games(&self) -> usize {
        self.games.len()
    }

    pub fn total_ticks(&self) -> u64 {
        self.games.iter().map(|g| u64::from(g.ticks)).sum()
    }

    pub fn best_score(&self) -> u32 {
        self.games.iter().map(|g| g.score).max().unwrap_or(0)
    }

    /// Mean score, or 0.0 before any game finished
    pub fn mean_score(&self) -> f64 {
        if self.games.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.games.iter().map(|g| u64::from(g.score)).sum();
        sum as f64 / self.games.len() as f64
    }

    pub fn count_ended_by(&self, end: GameEnd) -> usize {
        self.games.iter().filter(|g| g.end == end).count()
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Ticks: {} | Best: {} | Mean: {:.2} | Collided: {} | Filled: {} | Capped: {}",
            self.total_games(),
            self.total_ticks(),
            self.best_score(),
            self.mean_score(),
            self.count_ended_by(GameEnd::Collided),
            self.count_ended_by(GameEnd::BoardFilled),
            self.count_ended_by(GameEnd::TickLimit),
        )
    }
}
