//! Interactive terminal play
//!
//! A tokio interval is the tick scheduler: every `tick_interval_ms` the session
//! advances one step, consuming the most recent key press. Drawing runs on its
//! own faster timer so the screen stays responsive between ticks.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::game::{GameConfig, StepOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{RenderSink, TerminalSink};
use crate::session::GameSession;

const RENDER_INTERVAL: Duration = Duration::from_millis(33);

pub struct PlayMode {
    session: GameSession,
    metrics: GameMetrics,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);
        let session = GameSession::new(config).context("Invalid game configuration")?;

        Ok(Self {
            session,
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stderr)).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let mut sink = TerminalSink::new(terminal);
        let result = self.run_game_loop(&mut sink).await;

        // Restore the terminal even if the loop failed
        cleanup_terminal(sink.terminal_mut())?;

        result
    }

    async fn run_game_loop<S: RenderSink>(&mut self, sink: &mut S) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval);
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut render_timer = interval(RENDER_INTERVAL);

        info!(
            tick_ms = self.tick_interval.as_millis() as u64,
            autopilot = self.session.state().autopilot_enabled,
            "starting interactive game"
        );

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    sink.present(self.session.state(), &self.metrics)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "leaving interactive game"
        );
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::GameAction(action) => {
                if let Some(direction) = action.requested() {
                    self.session.request_direction(direction);
                }
            }
            KeyAction::None => {}
            KeyAction::EnableAutopilot => self.session.enable_autopilot(),
            KeyAction::DisableAutopilot => self.session.disable_autopilot(),
            KeyAction::Restart => {
                self.session.restart();
                self.metrics.on_game_start();
            }
            KeyAction::Quit => self.should_quit = true,
        }
    }

    fn update_game(&mut self) {
        let steered = self.session.state().autopilot_enabled;
        let result = self.session.tick();
        if result.outcome == StepOutcome::Halted {
            return;
        }

        self.metrics.on_tick(steered);
        if result.terminated {
            self.metrics.on_game_over(self.session.state().score);
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}
