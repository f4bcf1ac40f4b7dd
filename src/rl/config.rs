//! Q-learning hyperparameter configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the tabular Q-learning agent
///
/// All values are fixed for the lifetime of a run.
///
/// # Example
///
/// ```rust
/// use q_snake::rl::QLearningConfig;
///
/// // Use default hyperparameters
/// let config = QLearningConfig::default();
///
/// // Or customize specific parameters
/// let config = QLearningConfig {
///     exploration_rate: 0.0,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Step size (alpha) of the value update
    ///
    /// Default: 0.1
    pub learning_rate: f32,

    /// Discount factor for future rewards (gamma)
    ///
    /// Values closer to 1.0 make the agent more far-sighted.
    ///
    /// Default: 0.9
    pub discount_factor: f32,

    /// Probability of taking a uniformly random action (epsilon)
    ///
    /// Default: 0.1
    pub exploration_rate: f32,

    /// Optional cap on the number of (state, action) entries
    ///
    /// `None` lets the table grow without bound, which is fine for the
    /// 11-feature encoding (at most 2^11 * 3 keys). Once a cap is reached,
    /// existing entries keep learning but new keys are not stored.
    ///
    /// Default: None
    pub max_table_entries: Option<usize>,
}

impl QLearningConfig {
    /// Create a new configuration with default hyperparameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(ConfigError::LearningRate(self.learning_rate));
        }

        if !(0.0..=1.0).contains(&self.discount_factor) {
            return Err(ConfigError::DiscountFactor(self.discount_factor));
        }

        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(ConfigError::ExplorationRate(self.exploration_rate));
        }

        if self.max_table_entries == Some(0) {
            return Err(ConfigError::ZeroTableCap);
        }

        Ok(())
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 0.1,
            max_table_entries: None,
        }
    }
}
