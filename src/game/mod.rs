//! Core game logic module for Snake
//!
//! This module contains all the game rules without any terminal or rendering
//! dependencies. The [`Driver`] trait is the only seam to the outside world.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod game_loop;
pub mod grid;
pub mod sprite;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Input, TURN_TABLE};
pub use config::{GameConfig, ObstaclePolicy, Palette, Rgb};
pub use engine::{
    BoardStatus, GameEngine, Phase, ResetCause, StepResult, TerminationCause, TickOutcome,
};
pub use error::GameError;
pub use food::{FoodSpawner, Item, ItemKind};
pub use game_loop::{Driver, GameLoop, RunSummary};
pub use grid::GridWorld;
pub use sprite::Sprite;
pub use state::{Position, Snake};
