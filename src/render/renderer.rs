use anyhow::{Context, Result};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::state::grid_side;
use crate::game::{GameState, MAX_GRID_SIZE, Position};
use crate::metrics::GameMetrics;

/// Anything that can show a game state once per tick
pub trait RenderSink {
    fn present(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()>;
}

/// Draws the board into a ratatui terminal
pub struct TerminalSink<B: Backend> {
    terminal: Terminal<B>,
    renderer: Renderer,
}

impl<B: Backend> TerminalSink<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            renderer: Renderer::new(),
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

impl<B: Backend> RenderSink for TerminalSink<B> {
    fn present(&mut self, state: &GameState, metrics: &GameMetrics) -> Result<()> {
        let renderer = &self.renderer;
        self.terminal
            .draw(|frame| renderer.render(frame, state, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(state, metrics), chunks[0]);

        let board = if state.game_over {
            self.render_game_over(state, metrics)
        } else {
            self.render_grid(state)
        };
        frame.render_widget(board, chunks[1]);

        frame.render_widget(self.render_controls(state), chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let head = state.head();
        let n = grid_side(state.grid_size.min(MAX_GRID_SIZE));

        let lines: Vec<Line> = (0..n)
            .map(|y| {
                let spans: Vec<Span> = (0..n)
                    .map(|x| {
                        let pos = Position::new(x, y);
                        if pos == head {
                            Span::styled(
                                "■ ",
                                Style::default()
                                    .fg(Color::Cyan)
                                    .add_modifier(Modifier::BOLD),
                            )
                        } else if state.snake.occupies(pos) {
                            Span::styled("□ ", Style::default().fg(Color::Green))
                        } else if pos == state.food {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled("· ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let (mode, mode_style) = mode_badge(state);

        let text = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.high_score.max(state.score).to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled(mode, mode_style),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let bold = |color| Style::default().fg(color).add_modifier(Modifier::BOLD);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("GAME OVER", bold(Color::Red))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.score.to_string(), bold(Color::White)),
                Span::styled(
                    format!("  after {} steps", state.steps),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(vec![
                Span::styled("Games played: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.games_played.to_string(), bold(Color::White)),
                Span::styled("   Autopilot: ", Style::default().fg(Color::Yellow)),
                Span::styled(format!("{}%", metrics.autopilot_share()), bold(Color::White)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled("R", bold(Color::Green)),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled("Q", bold(Color::Red)),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, state: &GameState) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let mut spans = Vec::new();

        if state.autopilot_enabled {
            spans.push(Span::styled("M", key));
            spans.push(Span::raw(" manual | "));
        } else {
            spans.push(Span::styled("↑↓←→", key));
            spans.push(Span::raw(" or "));
            spans.push(Span::styled("WASD", key));
            spans.push(Span::raw(" to move | "));
            spans.push(Span::styled("P", key));
            spans.push(Span::raw(" autopilot | "));
        }
        spans.push(Span::styled("R", key));
        spans.push(Span::raw(" restart | "));
        spans.push(Span::styled("Q", Style::default().fg(Color::Red)));
        spans.push(Span::raw(" quit"));

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

fn mode_badge(state: &GameState) -> (&'static str, Style) {
    if state.autopilot_enabled {
        (
            "[AUTOPILOT]",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("[MANUAL]", Style::default().fg(Color::Black).bg(Color::Gray))
    }
}
