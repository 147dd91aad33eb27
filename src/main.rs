use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wrap_snake::game::{GameConfig, ObstaclePolicy};
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wrap-around field, with food and an obstacle")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field width in pixels
    #[arg(long)]
    width: Option<i32>,

    /// Field height in pixels
    #[arg(long)]
    height: Option<i32>,

    /// Cell size in pixels
    #[arg(long)]
    cell_size: Option<i32>,

    /// Starting ticks per second
    #[arg(long)]
    speed: Option<u32>,

    /// What hitting the obstacle at length 1 does
    #[arg(long)]
    obstacle_policy: Option<Policy>,

    /// First body segment checked for self-collision
    #[arg(long)]
    self_collision_from: Option<usize>,

    /// Seed for reproducible boards
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Clear the board and start over
    Reset,
    /// End the game
    Terminate,
}

impl From<Policy> for ObstaclePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Reset => ObstaclePolicy::Reset,
            Policy::Terminate => ObstaclePolicy::Terminate,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.field_width = width;
        }
        if let Some(height) = self.height {
            config.field_height = height;
        }
        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(speed) = self.speed {
            config.base_tick_rate = speed;
        }
        if let Some(policy) = self.obstacle_policy {
            config.obstacle_policy = policy.into();
        }
        if let Some(index) = self.self_collision_from {
            config.self_collision_from = index;
        }
        if self.seed.is_some() {
            config.rng_seed = self.seed;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_tracing(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_deref())?;

    let config = cli.game_config()?;

    let mut human_mode = HumanMode::new(config);
    let summary = human_mode.run().await?;

    println!(
        "Game over after {} ticks: best length {}, {} resets",
        summary.ticks, summary.best_length, summary.resets
    );

    Ok(())
}
