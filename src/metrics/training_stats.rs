//! Training statistics tracking for Q-learning
//!
//! This module provides utilities for tracking and monitoring training progress,
//! including episode rewards, lengths, scores, and Q-table growth.

use std::collections::VecDeque;

use super::episode::{EpisodeMetrics, TrainingSummary};

/// Training statistics tracker with rolling averages
///
/// Tracks episode-level metrics (rewards, lengths, scores) over a rolling
/// window, plus running totals over the whole run.
///
/// # Example
///
/// ```rust
/// use q_snake::metrics::{EpisodeMetrics, TrainingStats};
///
/// let mut stats = TrainingStats::new(100);
///
/// stats.record_episode(&EpisodeMetrics {
///     episode: 1,
///     total_reward: 15.5,
///     score: 5,
///     steps: 150,
///     table_size: 42,
/// });
///
/// assert_eq!(stats.total_episodes(), 1);
/// println!("{}", stats.summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<u32>,

    /// Episode scores (food eaten) (rolling window)
    episode_scores: VecDeque<u32>,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Highest score seen in any episode
    best_score: u32,

    /// Q-table size after the latest episode
    table_size: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a new training statistics tracker
    ///
    /// # Arguments
    ///
    /// * `window_size` - Number of recent values to keep for rolling averages
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            best_score: 0,
            table_size: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    pub fn record_episode(&mut self, metrics: &EpisodeMetrics) {
        Self::push_deque(&mut self.episode_rewards, metrics.total_reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, metrics.steps, self.window_size);
        Self::push_deque(&mut self.episode_scores, metrics.score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += metrics.steps as usize;
        self.best_score = self.best_score.max(metrics.score);
        self.table_size = metrics.table_size;
    }

    /// Get the mean episode reward over the rolling window
    ///
    /// # Returns
    ///
    /// The average reward, or 0.0 if no episodes have been recorded
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    /// Get the mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        let sum: u32 = self.episode_lengths.iter().sum();
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Get the mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        let sum: u32 = self.episode_scores.iter().sum();
        if self.episode_scores.is_empty() {
            0.0
        } else {
            sum as f32 / self.episode_scores.len() as f32
        }
    }

    /// Get the total number of episodes completed
    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    /// Get the total number of environment steps taken
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    /// Get the window size for rolling averages
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Snapshot of the run so far
    pub fn summary(&self) -> TrainingSummary {
        TrainingSummary {
            episodes: self.total_episodes,
            total_steps: self.total_steps,
            best_score: self.best_score,
            mean_reward: self.mean_episode_reward(),
            mean_score: self.mean_episode_score(),
            table_size: self.table_size,
        }
    }

    /// Helper function to push to a deque with size limit
    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
