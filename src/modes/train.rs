//! Training mode for the Q-learning agent
//!
//! This module implements the episode loop: the environment's observation is
//! fed to the agent, the chosen action is stepped, and the agent learns from
//! the transition before the next action is chosen. Everything runs on one
//! thread, strictly in sequence.
//!
//! The loop talks to the outside world through three seams:
//! - [`TrainingObserver`] receives per-episode metrics and the final summary
//! - [`FrameRenderer`] is shown every step; its errors never affect training
//! - [`CancellationSignal`] is polled once per step, before the agent acts
//!
//! # Example
//!
//! ```rust
//! use q_snake::game::GameConfig;
//! use q_snake::modes::{CollectingObserver, NeverCancel, TrainConfig, Trainer, TrainingOutcome};
//!
//! let config = TrainConfig {
//!     seed: Some(7),
//!     game_config: GameConfig::small(),
//!     ..TrainConfig::new(5)
//! };
//!
//! let mut trainer = Trainer::new(config).unwrap();
//! let mut observer = CollectingObserver::default();
//! let outcome = trainer.run(&mut observer, &mut NeverCancel, None);
//!
//! assert!(matches!(outcome, TrainingOutcome::Completed(_)));
//! assert_eq!(observer.episodes.len(), 5);
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::game::{GameConfig, GameState};
use crate::metrics::{EpisodeMetrics, TrainingStats, TrainingSummary};
use crate::rl::{
    QLearningAgent, QLearningConfig, RngStream, SnakeEnvironment, entropy_seed, rng_from_seed,
};

/// Configuration for a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub episodes: usize,

    /// Seed for the run's random stream; drawn from OS entropy when `None`
    pub seed: Option<u64>,

    /// Log a progress line every N episodes
    pub log_frequency: usize,

    /// Episodes averaged in the rolling statistics
    pub stats_window: usize,

    /// Game configuration (grid size, start, step budget, rewards)
    pub game_config: GameConfig,

    /// Q-learning hyperparameters
    pub q_config: QLearningConfig,
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    pub fn new(episodes: usize) -> Self {
        Self {
            episodes,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.episodes == 0 {
            return Err(ConfigError::ZeroEpisodes);
        }
        self.game_config.validate()?;
        self.q_config.validate()
    }
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            episodes: 1000,
            seed: None,
            log_frequency: 1,
            stats_window: 100,
            game_config: GameConfig::default(),
            q_config: QLearningConfig::default(),
        }
    }
}

/// Read-only view handed to a renderer once per step
pub struct TrainingFrame<'a> {
    pub state: &'a GameState,
    /// 1-based number of the episode in progress
    pub episode: usize,
    pub total_episodes: usize,
    pub stats: &'a TrainingStats,
    pub table_size: usize,
}

/// Draws the environment; called once per step
pub trait FrameRenderer {
    fn render(&mut self, frame: &TrainingFrame<'_>) -> Result<()>;
}

/// External request to stop training between steps
pub trait CancellationSignal {
    fn is_cancelled(&mut self) -> bool;
}

impl<F: FnMut() -> bool> CancellationSignal for F {
    fn is_cancelled(&mut self) -> bool {
        self()
    }
}

/// A signal that never fires, for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSignal for NeverCancel {
    fn is_cancelled(&mut self) -> bool {
        false
    }
}

/// Receives training progress
pub trait TrainingObserver {
    fn on_episode_end(&mut self, metrics: &EpisodeMetrics);

    fn on_training_complete(&mut self, _summary: &TrainingSummary) {}
}

/// Keeps every report in memory
#[derive(Debug, Clone, Default)]
pub struct CollectingObserver {
    pub episodes: Vec<EpisodeMetrics>,
    pub summary: Option<TrainingSummary>,
}

impl TrainingObserver for CollectingObserver {
    fn on_episode_end(&mut self, metrics: &EpisodeMetrics) {
        self.episodes.push(metrics.clone());
    }

    fn on_training_complete(&mut self, summary: &TrainingSummary) {
        self.summary = Some(summary.clone());
    }
}

/// Emits reports through `tracing`
#[derive(Debug, Clone)]
pub struct LoggingObserver {
    log_frequency: usize,
}

impl LoggingObserver {
    pub fn new(log_frequency: usize) -> Self {
        Self {
            log_frequency: log_frequency.max(1),
        }
    }
}

impl TrainingObserver for LoggingObserver {
    fn on_episode_end(&mut self, metrics: &EpisodeMetrics) {
        if metrics.episode % self.log_frequency == 0 {
            info!(steps = metrics.steps, q_entries = metrics.table_size, "{metrics}");
        } else {
            debug!(steps = metrics.steps, q_entries = metrics.table_size, "{metrics}");
        }
    }

    fn on_training_complete(&mut self, summary: &TrainingSummary) {
        info!("{summary}");
        info!("Training complete.");
    }
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    /// Every configured episode finished
    Completed(TrainingSummary),
    /// Stopped by the cancellation signal during `episode`
    Cancelled {
        episode: usize,
        summary: TrainingSummary,
    },
}

/// Drives the environment and the agent through a fixed number of episodes
pub struct Trainer {
    env: SnakeEnvironment,
    agent: QLearningAgent,
    rng: RngStream,
    stats: TrainingStats,
    config: TrainConfig,
    seed: u64,
    render_failures: usize,
}

impl Trainer {
    /// Validate the configuration and build the environment and agent
    pub fn new(config: TrainConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(entropy_seed);
        let mut rng = rng_from_seed(seed);

        let env = SnakeEnvironment::new(config.game_config.clone(), &mut rng)?;
        let agent = QLearningAgent::new(config.q_config.clone())?;
        let stats = TrainingStats::new(config.stats_window);

        Ok(Self {
            env,
            agent,
            rng,
            stats,
            config,
            seed,
            render_failures: 0,
        })
    }

    /// The seed this run's random stream started from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Frames the renderer failed to draw so far
    pub fn render_failures(&self) -> usize {
        self.render_failures
    }

    /// Run every episode, or stop early when `cancel` fires
    pub fn run(
        &mut self,
        observer: &mut dyn TrainingObserver,
        cancel: &mut dyn CancellationSignal,
        mut renderer: Option<&mut dyn FrameRenderer>,
    ) -> TrainingOutcome {
        info!(
            seed = self.seed,
            episodes = self.config.episodes,
            tile_count = self.config.game_config.tile_count,
            "starting Q-learning run"
        );

        for episode in 1..=self.config.episodes {
            let Some(metrics) = self.run_episode(episode, cancel, &mut renderer) else {
                info!(episode, "training cancelled");
                return TrainingOutcome::Cancelled {
                    episode,
                    summary: self.stats.summary(),
                };
            };

            self.stats.record_episode(&metrics);
            observer.on_episode_end(&metrics);
        }

        let summary = self.stats.summary();
        observer.on_training_complete(&summary);
        TrainingOutcome::Completed(summary)
    }

    /// Play one episode to termination, learning from every transition
    ///
    /// Returns `None` if the episode was cancelled part-way.
    fn run_episode(
        &mut self,
        episode: usize,
        cancel: &mut dyn CancellationSignal,
        renderer: &mut Option<&mut dyn FrameRenderer>,
    ) -> Option<EpisodeMetrics> {
        let mut state = self.env.reset(&mut self.rng);
        let mut total_reward = 0.0;
        let mut done = false;

        while !done {
            if cancel.is_cancelled() {
                return None;
            }

            let action = self.agent.choose_action(&state, &mut self.rng);
            let (next_state, reward, terminated) = self.env.step(action, &mut self.rng);
            self.agent.learn(&state, action, reward, &next_state);

            state = next_state;
            total_reward += reward;
            done = terminated;

            if let Some(renderer) = renderer.as_deref_mut() {
                self.render(renderer, episode);
            }
        }

        Some(EpisodeMetrics {
            episode,
            total_reward,
            score: self.env.score(),
            steps: self.env.state().steps,
            table_size: self.agent.table_len(),
        })
    }

    fn render(&mut self, renderer: &mut (dyn FrameRenderer + '_), episode: usize) {
        let frame = TrainingFrame {
            state: self.env.state(),
            episode,
            total_episodes: self.config.episodes,
            stats: &self.stats,
            table_size: self.agent.table_len(),
        };

        if let Err(err) = renderer.render(&frame) {
            self.render_failures += 1;
            if self.render_failures == 1 {
                warn!("rendering failed, training continues: {err:#}");
            } else {
                debug!(failures = self.render_failures, "rendering failed: {err:#}");
            }
        }
    }
}
