use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, error};

use crate::game::{
    BoardStatus, Driver, GameConfig, GameEngine, GameLoop, GridWorld, Input, Position, Rgb,
    RunSummary,
};
use crate::input::InputHandler;
use crate::metrics::GameMetrics;
use crate::render::{Canvas, Renderer};

type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;

/// Raw-mode alternate screen held for the length of a run
pub struct TerminalSession {
    terminal: CrosstermTerminal,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self { terminal })
    }

    pub fn leave(mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Length of one tick at `tick_rate` ticks per second
pub fn tick_period(tick_rate: u32) -> Duration {
    Duration::from_secs(1) / tick_rate.max(1)
}

/// [`Driver`] backed by a crossterm terminal
pub struct TerminalDriver<'a> {
    terminal: &'a mut CrosstermTerminal,
    grid: GridWorld,
    canvas: Canvas,
    renderer: Renderer,
    metrics: GameMetrics,
    input_handler: InputHandler,
    events: EventStream,
    pending: Vec<Input>,
    last_tick: Instant,
}

impl<'a> TerminalDriver<'a> {
    pub fn new(terminal: &'a mut CrosstermTerminal, grid: GridWorld, background: Rgb) -> Self {
        Self {
            terminal,
            canvas: Canvas::new(grid.columns() as usize, grid.rows() as usize, background),
            grid,
            renderer: Renderer::new(),
            metrics: GameMetrics::new(),
            input_handler: InputHandler::new(),
            events: EventStream::new(),
            pending: Vec::new(),
            last_tick: Instant::now(),
        }
    }
}

/// Translate a terminal event; only key presses count, not releases
fn translate(handler: &InputHandler, event: Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handler.handle_key_event(key),
        _ => None,
    }
}

impl Driver for TerminalDriver<'_> {
    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn draw_cell(&mut self, cell: Position, fill: Rgb, outline: Option<Rgb>) {
        let (column, row) = self.grid.cell_index(cell);
        self.canvas.paint(column, row, fill, outline);
    }

    fn poll_input(&mut self) -> Vec<Input> {
        std::mem::take(&mut self.pending)
    }

    async fn wait_for_tick(&mut self, tick_rate: u32) -> Result<()> {
        let deadline = self.last_tick + tick_period(tick_rate);
        let Self {
            events,
            pending,
            input_handler,
            ..
        } = self;

        loop {
            tokio::select! {
                _ = sleep_until(deadline) => break,

                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        if let Some(input) = translate(input_handler, event) {
                            debug!(?input, "input");
                            pending.push(input);
                            if input == Input::Quit {
                                break;
                            }
                        }
                    }
                    Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                    None => {
                        pending.push(Input::Quit);
                        break;
                    }
                },

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    pending.push(Input::Quit);
                    break;
                }
            }
        }

        self.last_tick = Instant::now();
        Ok(())
    }

    fn present(&mut self, status: &BoardStatus) -> Result<()> {
        self.metrics.record(status);
        self.metrics.update();

        let Self {
            terminal,
            canvas,
            renderer,
            metrics,
            ..
        } = self;
        terminal
            .draw(|frame| renderer.render(frame, canvas, status, metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }
}

/// Play on the terminal with the keyboard
pub struct HumanMode {
    config: GameConfig,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self { config }
    }

    pub async fn run(&mut self) -> Result<RunSummary> {
        let engine = GameEngine::new(self.config.clone()).context("Failed to set up the board")?;
        let mut game = GameLoop::new(engine);

        let grid = *game.engine().grid();
        let mut session = TerminalSession::enter()?;
        let mut driver =
            TerminalDriver::new(&mut session.terminal, grid, self.config.palette.background);

        // Run game loop with cleanup
        let result = game.run(&mut driver).await;
        drop(driver);

        settle(result, session.leave())
    }
}

/// Combine the game's outcome with terminal teardown
///
/// A failed run keeps its own error; a teardown failure on top of it is only
/// logged.
fn settle(result: Result<RunSummary>, teardown: Result<()>) -> Result<RunSummary> {
    match (result, teardown) {
        (Ok(summary), Ok(())) => Ok(summary),
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(teardown_err)) => {
            error!(error = %teardown_err, "failed to restore terminal");
            Err(err)
        }
    }
}
