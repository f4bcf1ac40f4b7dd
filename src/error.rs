use thiserror::Error;

/// A configuration value that cannot be used to start a run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("tile_count must be at least 2, got {0}")]
    GridTooSmall(usize),

    #[error("start position ({x}, {y}) is outside the {tile_count}x{tile_count} grid")]
    StartOutOfBounds { x: i32, y: i32, tile_count: usize },

    #[error("max_steps must be at least 1")]
    ZeroStepBudget,

    #[error("episodes must be at least 1")]
    ZeroEpisodes,

    #[error("learning_rate must be in (0, 1], got {0}")]
    LearningRate(f32),

    #[error("discount_factor must be in [0, 1], got {0}")]
    DiscountFactor(f32),

    #[error("exploration_rate must be in [0, 1], got {0}")]
    ExplorationRate(f32),

    #[error("max_table_entries must be at least 1 when set")]
    ZeroTableCap,
}
