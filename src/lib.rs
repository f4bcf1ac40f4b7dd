//! Q-Snake - tabular Q-learning on the classic Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - The learning environment, state encoding and Q-learning agent (rl module)
//! - Per-episode metrics and rolling statistics (metrics module)
//! - Headless and terminal-visualized training runs (modes module)
//! - TUI rendering and keyboard handling (render, input modules)

pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod rl;

pub use error::ConfigError;
