use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::GameError;
use super::grid::GridWorld;

/// An RGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used to paint the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgb,
    /// Outline drawn around every occupied cell
    pub border: Rgb,
    pub food: Rgb,
    pub obstacle: Rgb,
    pub snake: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb(0, 0, 0),
            border: Rgb(93, 216, 228),
            food: Rgb(255, 0, 0),
            obstacle: Rgb(128, 128, 128),
            snake: Rgb(0, 255, 0),
        }
    }
}

/// What happens when a length-1 snake runs into the obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstaclePolicy {
    /// Clear the board and start over
    #[default]
    Reset,
    /// End the session
    Terminate,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the playing field in pixels
    pub field_width: i32,
    /// Height of the playing field in pixels
    pub field_height: i32,
    /// Edge length of one cell in pixels
    pub cell_size: i32,

    /// Ticks per second at the start of a board
    pub base_tick_rate: u32,
    /// Amount the tick rate changes when food or the obstacle is consumed
    pub tick_rate_step: u32,
    pub min_tick_rate: u32,
    pub max_tick_rate: u32,

    pub palette: Palette,
    pub obstacle_policy: ObstaclePolicy,
    /// First body index checked for self-collision; 1 means any segment
    pub self_collision_from: usize,
    /// Random draws tried before falling back to a scan for a free cell
    pub max_placement_attempts: u32,
    /// Seed for reproducible boards
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: 640,
            field_height: 480,
            cell_size: 20,
            base_tick_rate: 10,
            tick_rate_step: 1,
            min_tick_rate: 1,
            max_tick_rate: 60,
            palette: Palette::default(),
            obstacle_policy: ObstaclePolicy::default(),
            self_collision_from: 1,
            max_placement_attempts: 1024,
            rng_seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field size in pixels
    pub fn new(field_width: i32, field_height: i32) -> Self {
        Self {
            field_width,
            field_height,
            ..Default::default()
        }
    }

    /// Create a small field for testing
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to deserialize config")?;
        Ok(config)
    }

    /// Number of cell columns
    pub fn columns(&self) -> i32 {
        self.field_width / self.cell_size
    }

    /// Number of cell rows
    pub fn rows(&self) -> i32 {
        self.field_height / self.cell_size
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));

        GridWorld::new(self.field_width, self.field_height, self.cell_size)?;
        // Snake, food and obstacle each need a cell of their own.
        if (self.columns() as i64) * (self.rows() as i64) < 3 {
            return invalid("field must hold at least 3 cells");
        }
        if self.min_tick_rate == 0 {
            return invalid("min_tick_rate must be at least 1");
        }
        if self.min_tick_rate > self.max_tick_rate {
            return invalid("min_tick_rate must not exceed max_tick_rate");
        }
        if !(self.min_tick_rate..=self.max_tick_rate).contains(&self.base_tick_rate) {
            return invalid("base_tick_rate must lie between min_tick_rate and max_tick_rate");
        }
        if self.self_collision_from == 0 {
            return invalid("self_collision_from must be at least 1");
        }
        if self.max_placement_attempts == 0 {
            return invalid("max_placement_attempts must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.field_width, 640);
        assert_eq!(config.field_height, 480);
        assert_eq!(config.cell_size, 20);
        assert_eq!(config.columns(), 32);
        assert_eq!(config.rows(), 24);
        assert_eq!(config.obstacle_policy, ObstaclePolicy::Reset);
        assert_eq!(config.self_collision_from, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 100);
        assert_eq!(config.columns(), 15);
        assert_eq!(config.rows(), 5);
        assert_eq!(config.base_tick_rate, 10);
    }

    #[test]
    fn test_rejects_misaligned_field() {
        let config = GameConfig::new(650, 480);
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_tiny_field() {
        let config = GameConfig {
            field_width: 40,
            field_height: 20,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_tick_bounds() {
        let config = GameConfig {
            base_tick_rate: 100,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            min_tick_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_collision_index() {
        let config = GameConfig {
            self_collision_from: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "cell_size": 10, "obstacle_policy": "terminate", "rng_seed": 7 }}"#
        )
        .unwrap();

        let config = GameConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.field_width, 640);
        assert_eq!(config.obstacle_policy, ObstaclePolicy::Terminate);
        assert_eq!(config.rng_seed, Some(7));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(GameConfig::from_json_file(&dir.path().join("nope.json")).is_err());
    }
}
