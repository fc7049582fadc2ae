//! Auto Snake - Snake on a wrapping board with a greedy autopilot
//!
//! This library provides:
//! - Core game logic (game module)
//! - The autopilot steering policy (autopilot module)
//! - A seeded property-checking harness (check module)
//! - TUI rendering, input and metrics for the terminal front end
//! - Interactive and headless execution modes (modes module)

pub mod autopilot;
pub mod check;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
