use serde::{Deserialize, Serialize};

use super::state::Position;
use crate::error::ConfigError;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Side length of the square grid
    pub tile_count: usize,
    /// Where the single-segment snake spawns on reset
    pub start_position: Position,
    /// Steps allowed per episode before it is cut off
    pub max_steps: u32,

    // Rewards (for RL)
    /// Reward for eating food
    pub food_reward: f32,
    /// Reward for an ordinary move
    pub step_penalty: f32,
    /// Penalty for dying
    pub death_penalty: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: 20,
            start_position: Position::new(10, 10),
            max_steps: 200,
            food_reward: 10.0,
            step_penalty: -1.0,
            death_penalty: -10.0,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    ///
    /// The snake starts on the center tile, which is (10, 10) for the
    /// default 20x20 grid.
    pub fn new(tile_count: usize) -> Self {
        let center = (tile_count / 2) as i32;
        Self {
            tile_count,
            start_position: Position::new(center, center),
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    /// Check that a run can be started with this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tile_count < 2 {
            return Err(ConfigError::GridTooSmall(self.tile_count));
        }

        let n = self.tile_count as i32;
        let Position { x, y } = self.start_position;
        if x < 0 || x >= n || y < 0 || y >= n {
            return Err(ConfigError::StartOutOfBounds {
                x,
                y,
                tile_count: self.tile_count,
            });
        }

        if self.max_steps == 0 {
            return Err(ConfigError::ZeroStepBudget);
        }

        Ok(())
    }
}
