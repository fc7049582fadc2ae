use anyhow::{Context, Result};
use auto_snake::game::{ConfigOverrides, GameConfig};
use auto_snake::modes::{PlayMode, SimulateConfig, SimulateMode};
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

#[derive(Parser)]
#[command(name = "auto_snake")]
#[command(version, about = "Snake on a wrapping board, with an optional autopilot")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "play")]
    mode: Mode,

    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the board; also moves the start to the board centre
    #[arg(long)]
    grid_size: Option<usize>,

    /// Milliseconds between ticks in play mode
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Start with the autopilot steering
    #[arg(long)]
    autopilot: bool,

    /// Number of games to simulate
    #[arg(long, default_value = "100")]
    games: usize,

    /// Tick cap per simulated game
    #[arg(long, default_value = "10000")]
    max_ticks: u32,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print simulation results as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play in the terminal with keyboard controls
    Play,
    /// Run autopilot games headless and report statistics
    Simulate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The play screen is drawn on stderr, so only log there when headless
    match (&cli.log_file, &cli.mode) {
        (Some(path), _) => init_tracing_to_file(path)?,
        (None, Mode::Simulate) => init_tracing(),
        (None, Mode::Play) => {}
    }

    let config = build_config(&cli)?;

    match cli.mode {
        Mode::Play => {
            let mut play_mode = PlayMode::new(config)?;
            play_mode.run().await?;
        }
        Mode::Simulate => {
            let simulate = SimulateMode::new(SimulateConfig {
                games: cli.games,
                max_ticks: cli.max_ticks,
                game_config: config,
            })?;
            let stats = simulate.run();

            if cli.json {
                let json = serde_json::to_string_pretty(&stats)
                    .context("Failed to serialize run statistics")?;
                println!("{json}");
            } else {
                println!("{}", stats.format_summary());
            }
        }
    }

    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

fn init_tracing_to_file(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let overrides = ConfigOverrides {
        grid_size: cli.grid_size,
        tick_interval_ms: cli.tick_ms,
        seed: cli.seed,
        autopilot: cli.autopilot,
    };
    let config = GameConfig::resolve(cli.config.as_deref(), &overrides)
        .context("Invalid game configuration")?;
    info!(?config, "configuration resolved");
    Ok(config)
}
