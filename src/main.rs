use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use q_snake::game::GameConfig;
use q_snake::modes::{
    DEFAULT_FRAME_DELAY, LoggingObserver, NeverCancel, TrainConfig, Trainer, VisualizeMode,
};
use q_snake::rl::QLearningConfig;

#[derive(Parser)]
#[command(name = "q_snake")]
#[command(version, about = "Snake game learned with tabular Q-learning")]
struct Cli {
    /// Run headless or draw every step in the terminal
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Number of training episodes
    #[arg(long, default_value = "1000")]
    episodes: usize,

    /// Side length of the square grid
    #[arg(long, default_value = "20")]
    tile_count: usize,

    /// Steps allowed per episode
    #[arg(long, default_value = "200")]
    max_steps: u32,

    /// Seed for a reproducible run (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Learning rate (alpha)
    #[arg(long, default_value = "0.1")]
    learning_rate: f32,

    /// Discount factor (gamma)
    #[arg(long, default_value = "0.9")]
    discount: f32,

    /// Exploration rate (epsilon)
    #[arg(long, default_value = "0.1")]
    exploration: f32,

    /// Stop adding Q-table entries past this many
    #[arg(long)]
    max_table_entries: Option<usize>,

    /// Log a progress line every N episodes
    #[arg(long, default_value = "1")]
    log_every: usize,

    /// Episodes averaged in the rolling statistics
    #[arg(long, default_value = "100")]
    stats_window: usize,

    /// Pause between rendered steps in visualize mode (0 disables)
    #[arg(long, default_value_t = DEFAULT_FRAME_DELAY.as_millis() as u64)]
    frame_delay_ms: u64,

    /// Print the resolved configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train without a display, logging progress
    Train,
    /// Train while drawing the board in the terminal
    Visualize,
}

impl Cli {
    fn train_config(&self) -> TrainConfig {
        TrainConfig {
            episodes: self.episodes,
            seed: self.seed,
            log_frequency: self.log_every,
            stats_window: self.stats_window,
            game_config: GameConfig {
                max_steps: self.max_steps,
                ..GameConfig::new(self.tile_count)
            },
            q_config: QLearningConfig {
                learning_rate: self.learning_rate,
                discount_factor: self.discount,
                exploration_rate: self.exploration,
                max_table_entries: self.max_table_entries,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = cli.train_config();
    config.validate().context("Invalid configuration")?;

    if cli.print_config {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(());
    }

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Train => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
                )
                .init();

            let mut trainer = Trainer::new(config).context("Invalid configuration")?;
            let mut observer = LoggingObserver::new(cli.log_every);
            trainer.run(&mut observer, &mut NeverCancel, None);
        }
        Mode::Visualize => {
            let frame_delay = Duration::from_millis(cli.frame_delay_ms);
            let mut visualize_mode = VisualizeMode::new(config, frame_delay)?;
            // Stopping from the keyboard is a normal exit
            visualize_mode.run()?;
        }
    }

    Ok(())
}
