pub mod episode;
pub mod game_metrics;
pub mod training_stats;

pub use episode::{EpisodeMetrics, TrainingSummary};
pub use game_metrics::GameMetrics;
pub use training_stats::TrainingStats;
