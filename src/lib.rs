//! Wrap Snake - a toroidal Snake game with food and an obstacle
//!
//! This library provides:
//! - Core game logic and the fixed-timestep loop (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - Terminal play (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
