//! Headless autopilot runs
//!
//! Plays whole games back to back with the autopilot steering and no timer:
//! each loop iteration is one tick. Useful for checking how the greedy policy
//! fares on a board size, and reproducible when the config carries a seed.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::game::GameConfig;
use crate::metrics::{GameEnd, GameRecord, RunStats};
use crate::session::GameSession;

/// Configuration for a batch of headless games
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    /// Number of games to play
    pub games: usize,
    /// Stop a game that is still alive after this many ticks
    pub max_ticks: u32,
    /// Board and seed
    pub game_config: GameConfig,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            games: 100,
            max_ticks: 10_000,
            game_config: GameConfig::default(),
        }
    }
}

pub struct SimulateMode {
    config: SimulateConfig,
    session: GameSession,
    stats: RunStats,
}

impl SimulateMode {
    pub fn new(config: SimulateConfig) -> Result<Self> {
        let session =
            GameSession::new(config.game_config.clone()).context("Invalid game configuration")?;
        Ok(Self {
            config,
            session,
            stats: RunStats::new(),
        })
    }

    /// Play every game and return the collected statistics
    pub fn run(mut self) -> RunStats {
        info!(
            games = self.config.games,
            grid_size = self.config.game_config.grid_size,
            seed = ?self.config.game_config.seed,
            "starting headless run"
        );

        for game in 0..self.config.games {
            let record = self.play_one();
            debug!(game, score = record.score, ticks = record.ticks, end = ?record.end, "game finished");
            self.stats.record(record);
        }

        info!(summary = %self.stats.format_summary(), "headless run complete");
        self.stats
    }

    fn play_one(&mut self) -> GameRecord {
        self.session.restart();
        self.session.enable_autopilot();

        let mut ticks = 0;
        while ticks < self.config.max_ticks {
            let result = self.session.tick();
            ticks += 1;
            if let Some(end) = GameEnd::from_outcome(result.outcome) {
                return GameRecord {
                    score: self.session.state().score,
                    ticks,
                    end,
                };
            }
        }

        GameRecord {
            score: self.session.state().score,
            ticks,
            end: GameEnd::TickLimit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> SimulateConfig {
        SimulateConfig {
            games: 4,
            max_ticks: 2_000,
            game_config: GameConfig::small().with_seed(seed),
        }
    }

    #[test]
    fn test_plays_requested_number_of_games() {
        let stats = SimulateMode::new(config(1)).unwrap().run();

        assert_eq!(stats.total_games(), 4);
        for game in stats.games() {
            assert!(game.ticks >= 1);
            assert!(game.ticks <= 2_000);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let a = SimulateMode::new(config(99)).unwrap().run();
        let b = SimulateMode::new(config(99)).unwrap().run();
        assert_eq!(a.games(), b.games());
    }

    #[test]
    fn test_autopilot_scores_on_small_board() {
        let stats = SimulateMode::new(config(3)).unwrap().run();
        // The first food is always reachable before any collision is possible
        assert!(stats.games().iter().all(|g| g.score >= 1));
    }

    #[test]
    fn test_tick_cap_stops_long_games() {
        let config = SimulateConfig {
            games: 1,
            max_ticks: 1,
            game_config: GameConfig::small().with_seed(8),
        };
        let stats = SimulateMode::new(config).unwrap().run();
        let game = stats.games()[0];
        assert_eq!(game.ticks, 1);
        assert_eq!(game.end, GameEnd::TickLimit);
    }

    #[test]
    fn test_rejects_invalid_board() {
        let config = SimulateConfig {
            game_config: GameConfig::new(1),
            ..SimulateConfig::default()
        };
        assert!(SimulateMode::new(config).is_err());
    }
}
