//! Reinforcement learning for the Snake game
//!
//! Provides:
//! - 11-feature boolean observations (danger, heading, food direction)
//! - The RL environment interface (reset, observe, step)
//! - A sparse Q-table and an epsilon-greedy Q-learning agent
//! - Seeded random streams for reproducible runs

pub mod agent;
pub mod config;
pub mod environment;
pub mod observation;
pub mod q_table;
pub mod rng;

pub use agent::QLearningAgent;
pub use config::QLearningConfig;
pub use environment::SnakeEnvironment;
pub use observation::{FEATURE_COUNT, StateEncoding, create_observation};
pub use q_table::QTable;
pub use rng::{RngStream, entropy_seed, rng_from_seed};
