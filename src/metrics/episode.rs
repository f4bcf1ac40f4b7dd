use std::fmt;

use serde::Serialize;

/// Outcome of one finished training episode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EpisodeMetrics {
    /// 1-based episode number
    pub episode: usize,
    /// Sum of rewards collected during the episode
    pub total_reward: f32,
    /// Food eaten before the episode ended
    pub score: u32,
    /// Steps taken, including the terminating one
    pub steps: u32,
    /// Q-table entries after the episode
    pub table_size: usize,
}

impl fmt::Display for EpisodeMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Episode {}, Total Reward: {}, Score: {}",
            self.episode, self.total_reward, self.score
        )
    }
}

/// Final report emitted once every episode has run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub total_steps: usize,
    pub best_score: u32,
    /// Mean reward over the trailing window
    pub mean_reward: f32,
    /// Mean score over the trailing window
    pub mean_score: f32,
    pub table_size: usize,
}

impl fmt::Display for TrainingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Episodes: {} | Steps: {} | Best score: {} | Reward: {:.2} | Score: {:.2} | Q-entries: {}",
            self.episodes,
            self.total_steps,
            self.best_score,
            self.mean_reward,
            self.mean_score,
            self.table_size,
        )
    }
}
