use std::time::{Duration, Instant};

use crate::game::BoardStatus;

/// Session statistics shown in the header
pub struct GameMetrics {
    /// When the current board started
    pub start_time: Instant,
    pub elapsed_time: Duration,
    /// Longest snake seen this session
    pub best_length: usize,
    resets_seen: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 1,
            resets_seen: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Fold in the board status after a tick
    pub fn record(&mut self, status: &BoardStatus) {
        self.best_length = self.best_length.max(status.length);

        if status.resets > self.resets_seen {
            self.resets_seen = status.resets;
            self.on_board_start();
        }
    }

    pub fn on_board_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
