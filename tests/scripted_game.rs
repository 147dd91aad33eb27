use anyhow::Result;
use std::collections::{HashMap, VecDeque};
use wrap_snake::game::{
    BoardStatus, Direction, Driver, GameConfig, GameEngine, GameLoop, Input, Item, ItemKind,
    ObstaclePolicy, Position, Rgb, TerminationCause,
};

/// Headless driver: one batch of inputs per tick, quits when the script runs out
struct RecordingDriver {
    script: VecDeque<Vec<Input>>,
    framebuffer: HashMap<Position, Rgb>,
    statuses: Vec<BoardStatus>,
}

impl RecordingDriver {
    fn new(script: Vec<Vec<Input>>) -> Self {
        Self {
            script: script.into(),
            framebuffer: HashMap::new(),
            statuses: Vec::new(),
        }
    }
}

impl Driver for RecordingDriver {
    fn clear(&mut self, _color: Rgb) {
        self.framebuffer.clear();
    }

    fn draw_cell(&mut self, cell: Position, fill: Rgb, _outline: Option<Rgb>) {
        self.framebuffer.insert(cell, fill);
    }

    fn poll_input(&mut self) -> Vec<Input> {
        self.script.pop_front().unwrap_or_else(|| vec![Input::Quit])
    }

    async fn wait_for_tick(&mut self, _tick_rate: u32) -> Result<()> {
        Ok(())
    }

    fn present(&mut self, status: &BoardStatus) -> Result<()> {
        self.statuses.push(*status);
        Ok(())
    }
}

fn seeded(config: GameConfig) -> GameEngine {
    GameEngine::new(GameConfig {
        rng_seed: Some(2024),
        ..config
    })
    .unwrap()
}

#[tokio::test]
async fn eating_food_grows_snake_over_following_ticks() {
    let mut engine = seeded(GameConfig::default());
    engine.set_item(Item::new(ItemKind::Food, Position::new(340, 240))).unwrap();
    engine.set_item(Item::new(ItemKind::Obstacle, Position::new(0, 460))).unwrap();
    let mut game = GameLoop::new(engine);
    let mut driver = RecordingDriver::new(vec![vec![], vec![]]);

    let summary = game.run(&mut driver).await.unwrap();

    let after_meal = driver.statuses[1];
    assert_eq!(after_meal.length, 1);
    assert_eq!(after_meal.target_length, 2);
    assert_eq!(after_meal.tick_rate, 11);

    let next = driver.statuses[2];
    assert_eq!(next.length, 2);
    assert_eq!(summary.best_length, 2);

    let engine = game.engine();
    assert!(!engine.snake().body.contains(&engine.food().position));
    assert_ne!(engine.food().position, engine.obstacle().position);
}

#[tokio::test]
async fn framebuffer_matches_board_after_long_run() {
    let engine = seeded(GameConfig::small());
    let mut game = GameLoop::new(engine);

    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];
    let script: Vec<Vec<Input>> = (0..500)
        .map(|tick| {
            if tick % 4 == 0 {
                vec![Input::Turn(turns[(tick / 4) % turns.len()])]
            } else {
                vec![]
            }
        })
        .collect();
    let mut driver = RecordingDriver::new(script);

    let summary = game.run(&mut driver).await.unwrap();
    assert_eq!(summary.termination, TerminationCause::Quit);
    assert_eq!(summary.ticks, 500);

    // Every cell painted non-background must be something on the board.
    let engine = game.engine();
    let palette = engine.config().palette;
    for (cell, color) in &driver.framebuffer {
        if *color == palette.background {
            continue;
        }
        let on_board = engine.snake().body.contains(cell)
            || *cell == engine.food().position
            || *cell == engine.obstacle().position;
        assert!(on_board, "stale paint at {:?}", cell);
    }
    for segment in &engine.snake().body {
        assert_eq!(driver.framebuffer[segment], palette.snake);
    }
}

#[tokio::test]
async fn fatal_obstacle_ends_session() {
    let mut engine = seeded(GameConfig {
        obstacle_policy: ObstaclePolicy::Terminate,
        ..Default::default()
    });
    engine.set_item(Item::new(ItemKind::Food, Position::new(0, 0))).unwrap();
    engine.set_item(Item::new(ItemKind::Obstacle, Position::new(320, 260))).unwrap();
    let mut game = GameLoop::new(engine);
    let mut driver = RecordingDriver::new(vec![vec![Input::Turn(Direction::Down)], vec![], vec![]]);

    let summary = game.run(&mut driver).await.unwrap();

    assert_eq!(summary.termination, TerminationCause::ObstacleAtMinimum);
    assert_eq!(summary.ticks, 1);
    assert!(game.engine().is_terminated());
}

#[tokio::test]
async fn restart_restores_base_speed() {
    let mut engine = seeded(GameConfig::default());
    engine.set_item(Item::new(ItemKind::Food, Position::new(340, 240))).unwrap();
    engine.set_item(Item::new(ItemKind::Obstacle, Position::new(0, 460))).unwrap();
    let mut game = GameLoop::new(engine);
    let mut driver = RecordingDriver::new(vec![vec![], vec![Input::Restart]]);

    let summary = game.run(&mut driver).await.unwrap();

    assert_eq!(driver.statuses[1].tick_rate, 11);
    assert_eq!(driver.statuses[2].tick_rate, 10);
    assert_eq!(driver.statuses[2].length, 1);
    assert_eq!(driver.statuses[2].resets, 1);
    assert_eq!(summary.resets, 1);
}
