//! Grid Snake - a terminal snake game with a persisted leaderboard
//!
//! This library provides:
//! - The deterministic snake state engine (game module)
//! - A JSON-file leaderboard (leaderboard module)
//! - TUI rendering and key mapping (render, input modules)
//! - The interactive and command-line front ends (modes module)

pub mod game;
pub mod input;
pub mod leaderboard;
pub mod metrics;
pub mod modes;
pub mod render;
