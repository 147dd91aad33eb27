use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{
    action::{Direction, Input},
    config::{GameConfig, ObstaclePolicy},
    error::GameError,
    food::{FoodSpawner, Item, ItemKind},
    grid::GridWorld,
    sprite::Sprite,
    state::{Position, Snake},
};

/// Where the game loop stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    /// Board being cleared and the snake restarted; never observed between ticks
    Resetting,
    Terminated,
}

/// Why the board was reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetCause {
    /// Head ran into the body
    SelfCollision,
    /// Length-1 snake hit the obstacle under [`ObstaclePolicy::Reset`]
    ObstacleAtMinimum,
    /// Player asked for a fresh board
    Restart,
    /// No free cell was left to re-place an item
    BoardFull,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCause {
    Quit,
    /// Length-1 snake hit the obstacle under [`ObstaclePolicy::Terminate`]
    ObstacleAtMinimum,
}

/// How a tick ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continued,
    Reset(ResetCause),
    Terminated(TerminationCause),
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the head reached the obstacle this step
    pub hit_obstacle: bool,
    pub outcome: TickOutcome,
    /// Tail cells vacated by this step
    pub erased: Vec<Position>,
}

impl StepResult {
    fn with_outcome(outcome: TickOutcome) -> Self {
        Self {
            ate_food: false,
            hit_obstacle: false,
            outcome,
            erased: Vec::new(),
        }
    }
}

/// Snapshot shown next to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStatus {
    pub length: usize,
    pub target_length: usize,
    pub tick_rate: u32,
    pub resets: u32,
    pub ticks: u64,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    grid: GridWorld,
    spawner: FoodSpawner,
    snake: Snake,
    food: Item,
    obstacle: Item,
    tick_rate: u32,
    phase: Phase,
    termination: Option<TerminationCause>,
    restart_requested: bool,
    resets: u32,
    ticks: u64,
    rng: StdRng,
}

impl GameEngine {
    /// Create a board with a length-1 snake in the centre and both items placed
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;

        let grid = GridWorld::new(config.field_width, config.field_height, config.cell_size)?;
        let spawner = FoodSpawner::new(grid, config.max_placement_attempts);
        let mut rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let snake = Snake::new(grid.center(), Direction::Right);
        let food = spawner.place(ItemKind::Food, &mut rng, &snake.body)?;
        let mut occupied = snake.body.clone();
        occupied.push(food.position);
        let obstacle = spawner.place(ItemKind::Obstacle, &mut rng, &occupied)?;

        info!(
            columns = grid.columns(),
            rows = grid.rows(),
            tick_rate = config.base_tick_rate,
            policy = ?config.obstacle_policy,
            "board ready"
        );

        Ok(Self {
            tick_rate: config.base_tick_rate,
            config,
            grid,
            spawner,
            snake,
            food,
            obstacle,
            phase: Phase::Running,
            termination: None,
            restart_requested: false,
            resets: 0,
            ticks: 0,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &GridWorld {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Item {
        self.food
    }

    pub fn obstacle(&self) -> Item {
        self.obstacle
    }

    /// Put an item at a chosen cell, replacing the current one of its kind
    ///
    /// Used to stage scripted boards. A cell under the snake is refused; if the
    /// other item sits on the cell it is moved to a random free one.
    #[doc(hidden)]
    pub fn set_item(&mut self, item: Item) -> Result<(), GameError> {
        if self.snake.body.contains(&item.position) {
            return Err(GameError::CellTaken(item.position));
        }

        match item.kind {
            ItemKind::Food => self.food = item,
            ItemKind::Obstacle => self.obstacle = item,
        }

        let displaced = match item.kind {
            ItemKind::Food => self.obstacle,
            ItemKind::Obstacle => self.food,
        };
        if displaced.position == item.position {
            let occupied = self.occupied_for(displaced.kind);
            let moved = self.spawner.place(displaced.kind, &mut self.rng, &occupied)?;
            match moved.kind {
                ItemKind::Food => self.food = moved,
                ItemKind::Obstacle => self.obstacle = moved,
            }
        }
        Ok(())
    }

    /// Current ticks per second
    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn termination(&self) -> Option<TerminationCause> {
        self.termination
    }

    pub fn is_terminated(&self) -> bool {
        self.phase == Phase::Terminated
    }

    pub fn status(&self) -> BoardStatus {
        BoardStatus {
            length: self.snake.len(),
            target_length: self.snake.target_length(),
            tick_rate: self.tick_rate,
            resets: self.resets,
            ticks: self.ticks,
        }
    }

    /// Feed one input received since the last tick
    pub fn apply_input(&mut self, input: Input) {
        if self.is_terminated() {
            return;
        }

        match input {
            Input::Turn(direction) => {
                if !self.snake.set_pending_direction(direction) {
                    debug!(?direction, current = ?self.snake.direction, "turn ignored");
                }
            }
            Input::Restart => self.restart_requested = true,
            Input::Quit => self.terminate(TerminationCause::Quit),
        }
    }

    /// Execute one tick: advance, then food, obstacle and self-collision in that order
    pub fn step(&mut self) -> Result<StepResult, GameError> {
        if let Some(cause) = self.termination {
            return Ok(StepResult::with_outcome(TickOutcome::Terminated(cause)));
        }

        self.ticks += 1;

        if self.restart_requested {
            self.restart_requested = false;
            self.reset_board(ResetCause::Restart)?;
            return Ok(StepResult::with_outcome(TickOutcome::Reset(
                ResetCause::Restart,
            )));
        }

        self.snake.advance(&self.grid);
        let head = self.snake.head();

        let mut result = StepResult::with_outcome(TickOutcome::Continued);
        result.erased = self.snake.erase_hints().to_vec();

        if head == self.food.position {
            result.ate_food = true;
            self.snake.grow();
            self.speed_up();
            debug!(
                target_length = self.snake.target_length(),
                tick_rate = self.tick_rate,
                "food eaten"
            );

            if let Some(cause) = self.respawn(ItemKind::Food)? {
                result.outcome = TickOutcome::Reset(cause);
                return Ok(result);
            }
        }

        if head == self.obstacle.position {
            result.hit_obstacle = true;

            if self.snake.target_length() == 1 {
                match self.config.obstacle_policy {
                    ObstaclePolicy::Reset => {
                        self.reset_board(ResetCause::ObstacleAtMinimum)?;
                        result.outcome = TickOutcome::Reset(ResetCause::ObstacleAtMinimum);
                    }
                    ObstaclePolicy::Terminate => {
                        self.terminate(TerminationCause::ObstacleAtMinimum);
                        result.outcome =
                            TickOutcome::Terminated(TerminationCause::ObstacleAtMinimum);
                    }
                }
                return Ok(result);
            }

            self.snake.shrink();
            self.slow_down();
            debug!(
                target_length = self.snake.target_length(),
                tick_rate = self.tick_rate,
                "obstacle hit"
            );

            if let Some(cause) = self.respawn(ItemKind::Obstacle)? {
                result.outcome = TickOutcome::Reset(cause);
                return Ok(result);
            }
        }

        if self
            .snake
            .occupies_beyond_head(self.config.self_collision_from)
        {
            self.reset_board(ResetCause::SelfCollision)?;
            result.outcome = TickOutcome::Reset(ResetCause::SelfCollision);
        }

        Ok(result)
    }

    /// Everything on the board, in paint order: items first, snake head last
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(self.snake.len() + 2);
        sprites.push(Sprite::from(self.food));
        sprites.push(Sprite::from(self.obstacle));
        sprites.extend(
            self.snake
                .body
                .iter()
                .enumerate()
                .rev()
                .map(|(index, position)| Sprite::SnakeSegment {
                    position: *position,
                    is_head: index == 0,
                }),
        );
        sprites
    }

    fn speed_up(&mut self) {
        self.tick_rate = self
            .tick_rate
            .saturating_add(self.config.tick_rate_step)
            .min(self.config.max_tick_rate);
    }

    fn slow_down(&mut self) {
        self.tick_rate = self
            .tick_rate
            .saturating_sub(self.config.tick_rate_step)
            .max(self.config.min_tick_rate);
    }

    fn terminate(&mut self, cause: TerminationCause) {
        info!(?cause, ticks = self.ticks, resets = self.resets, "game terminated");
        self.phase = Phase::Terminated;
        self.termination = Some(cause);
    }

    /// Cells an item of `kind` must avoid: the snake and the other item
    fn occupied_for(&self, kind: ItemKind) -> Vec<Position> {
        let other = match kind {
            ItemKind::Food => self.obstacle.position,
            ItemKind::Obstacle => self.food.position,
        };
        let mut occupied = self.snake.body.clone();
        occupied.push(other);
        occupied
    }

    /// Move a consumed item; a full board resets instead
    fn respawn(&mut self, kind: ItemKind) -> Result<Option<ResetCause>, GameError> {
        let occupied = self.occupied_for(kind);
        match self.spawner.place(kind, &mut self.rng, &occupied) {
            Ok(item) => {
                match kind {
                    ItemKind::Food => self.food = item,
                    ItemKind::Obstacle => self.obstacle = item,
                }
                Ok(None)
            }
            Err(GameError::BoardFull { attempts }) => {
                warn!(?kind, attempts, length = self.snake.len(), "board full, resetting");
                self.reset_board(ResetCause::BoardFull)?;
                Ok(Some(ResetCause::BoardFull))
            }
            Err(err) => Err(err),
        }
    }

    fn reset_board(&mut self, cause: ResetCause) -> Result<(), GameError> {
        self.phase = Phase::Resetting;
        info!(?cause, length = self.snake.len(), "resetting board");

        let direction = Direction::ALL[self.rng.gen_range(0..Direction::ALL.len())];
        self.snake.reset(self.grid.center(), direction);
        self.tick_rate = self.config.base_tick_rate;

        let occupied = self.occupied_for(ItemKind::Food);
        self.food = self.spawner.place(ItemKind::Food, &mut self.rng, &occupied)?;
        let occupied = self.occupied_for(ItemKind::Obstacle);
        self.obstacle = self
            .spawner
            .place(ItemKind::Obstacle, &mut self.rng, &occupied)?;

        self.resets += 1;
        self.phase = Phase::Running;
        Ok(())
    }
}
