//! Fixed-timestep loop tying the engine to a display/input driver.

use anyhow::Result;
use tracing::info;

use super::{
    action::Input,
    config::Rgb,
    engine::{BoardStatus, GameEngine, TerminationCause, TickOutcome},
    state::Position,
};

/// The display and input side of the game
///
/// Implementations own the window (or terminal) and its event source. The
/// loop only paints cells, clears the board, drains input and waits for ticks.
#[allow(async_fn_in_trait)]
pub trait Driver {
    /// Paint the whole board in `color`
    fn clear(&mut self, color: Rgb);

    /// Paint one cell, optionally outlined
    fn draw_cell(&mut self, cell: Position, fill: Rgb, outline: Option<Rgb>);

    /// Inputs received since the previous call, oldest first
    fn poll_input(&mut self) -> Vec<Input>;

    /// Wait until the next tick at `tick_rate` ticks per second
    async fn wait_for_tick(&mut self, tick_rate: u32) -> Result<()>;

    /// Show what has been painted so far
    fn present(&mut self, status: &BoardStatus) -> Result<()>;
}

/// Totals of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub resets: u32,
    pub best_length: usize,
    pub termination: TerminationCause,
}

pub struct GameLoop {
    engine: GameEngine,
    best_length: usize,
}

impl GameLoop {
    pub fn new(engine: GameEngine) -> Self {
        Self {
            engine,
            best_length: 1,
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Run ticks until quit input or a terminating obstacle hit
    pub async fn run<D: Driver>(&mut self, driver: &mut D) -> Result<RunSummary> {
        self.redraw(driver);
        driver.present(&self.engine.status())?;

        loop {
            driver.wait_for_tick(self.engine.tick_rate()).await?;

            for input in driver.poll_input() {
                self.engine.apply_input(input);
            }

            let result = self.engine.step()?;
            self.best_length = self.best_length.max(self.engine.snake().len());

            match result.outcome {
                TickOutcome::Terminated(cause) => return Ok(self.summary(cause)),
                TickOutcome::Reset(_) => self.redraw(driver),
                TickOutcome::Continued => {
                    let background = self.engine.config().palette.background;
                    for cell in &result.erased {
                        driver.draw_cell(*cell, background, None);
                    }
                    self.draw_sprites(driver);
                }
            }

            driver.present(&self.engine.status())?;
        }
    }

    fn redraw<D: Driver>(&self, driver: &mut D) {
        driver.clear(self.engine.config().palette.background);
        self.draw_sprites(driver);
    }

    fn draw_sprites<D: Driver>(&self, driver: &mut D) {
        let palette = &self.engine.config().palette;
        for sprite in self.engine.sprites() {
            driver.draw_cell(sprite.position(), sprite.fill(palette), Some(palette.border));
        }
    }

    fn summary(&self, termination: TerminationCause) -> RunSummary {
        let status = self.engine.status();
        info!(
            ticks = status.ticks,
            resets = status.resets,
            best_length = self.best_length,
            "run finished"
        );
        RunSummary {
            ticks: status.ticks,
            resets: status.resets,
            best_length: self.best_length,
            termination,
        }
    }
}
