//! Built-in steering for autonomous play
//!
//! The autopilot is a one-step greedy heuristic: of the three moves that do
//! not reverse the snake, prefer one whose destination is free, then the one
//! whose destination is closest to the food.

pub mod policy;

pub use policy::{Autopilot, Candidate, DirectionPolicy, choose_direction, evaluate_candidates};
