use std::time::{Duration, Instant};

/// Session-wide numbers shown next to the board
#[derive(Debug, Clone)]
pub struct GameMetrics {
    game_started: Instant,
    /// Cleared at game over so the clock stops on the end screen
    clock_running: bool,
    /// Wall time spent in the current game, refreshed by [`update`](Self::update)
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    /// Ticks driven in the current game
    pub ticks: u64,
    /// How many of those ticks the autopilot steered
    pub autopilot_ticks: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            game_started: Instant::now(),
            clock_running: true,
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            ticks: 0,
            autopilot_ticks: 0,
        }
    }

    pub fn update(&mut self) {
        if self.clock_running {
            self.elapsed_time = self.game_started.elapsed();
        }
    }

    pub fn on_tick(&mut self, autopilot: bool) {
        self.ticks += 1;
        if autopilot {
            self.autopilot_ticks += 1;
        }
    }

    pub fn on_game_start(&mut self) {
        self.game_started = Instant::now();
        self.clock_running = true;
        self.elapsed_time = Duration::ZERO;
        self.ticks = 0;
        self.autopilot_ticks = 0;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.clock_running = false;
        self.games_played += 1;
        self.high_score = self.high_score.max(final_score);
    }

    /// Percentage of this game's ticks steered by the autopilot
    pub fn autopilot_share(&self) -> u64 {
        if self.ticks == 0 {
            return 0;
        }
        self.autopilot_ticks * 100 / self.ticks
    }

    /// Elapsed time as `MM:SS`; minutes keep counting past an hour
    pub fn format_time(&self) -> String {
        let secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
