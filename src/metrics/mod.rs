pub mod game_metrics;
pub mod run_stats;

pub use game_metrics::GameMetrics;
pub use run_stats::{GameEnd, GameRecord, RunStats};
