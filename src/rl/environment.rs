use rand::Rng;

use super::observation::{StateEncoding, create_observation};
use crate::error::ConfigError;
use crate::game::{Action, GameConfig, GameEngine, GameState};

/// Snake environment for reinforcement learning
///
/// Wraps the game engine and provides the RL interface:
/// - 11-feature boolean observations
/// - Discrete relative action space (Straight, TurnRight, TurnLeft)
/// - Standard RL interface (reset, observe, step)
///
/// The caller owns the random stream and passes it in, so the environment
/// holds no hidden randomness of its own.
#[derive(Debug, Clone)]
pub struct SnakeEnvironment {
    engine: GameEngine,
    state: GameState,
}

impl SnakeEnvironment {
    /// Create a new Snake environment, already reset
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, ConfigError> {
        let engine = GameEngine::new(config)?;
        let state = engine.reset(rng);
        Ok(Self { engine, state })
    }

    /// Reset the environment and return the initial observation
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> StateEncoding {
        self.state = self.engine.reset(rng);
        self.observe()
    }

    /// Current observation without stepping
    pub fn observe(&self) -> StateEncoding {
        create_observation(&self.state)
    }

    /// Step the environment with a relative action
    ///
    /// Returns: (observation, reward, done)
    /// - observation: encoding of the state after the move
    /// - reward: food_reward, step_penalty, or death_penalty
    /// - done: collision, full board, or step budget exceeded
    pub fn step<R: Rng + ?Sized>(&mut self, action: Action, rng: &mut R) -> (StateEncoding, f32, bool) {
        let result = self.engine.step(&mut self.state, action, rng);

        (self.observe(), result.reward, result.terminated)
    }

    /// Whether the current episode has ended
    pub fn is_done(&self) -> bool {
        !self.state.is_alive
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Get reference to current game state (for rendering/testing)
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable access for setting up specific scenarios in tests
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
