use rand::Rng;

use super::config::{Palette, Rgb};
use super::error::GameError;
use super::grid::GridWorld;
use super::state::Position;

/// What a board item does when the snake's head reaches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Grows the snake and speeds up the game
    Food,
    /// Shrinks the snake and slows the game; fatal at minimum length
    Obstacle,
}

/// A single-cell item lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    pub position: Position,
}

impl Item {
    pub fn new(kind: ItemKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn color(&self, palette: &Palette) -> Rgb {
        match self.kind {
            ItemKind::Food => palette.food,
            ItemKind::Obstacle => palette.obstacle,
        }
    }
}

/// Places items on free cells of a grid
#[derive(Debug, Clone, Copy)]
pub struct FoodSpawner {
    grid: GridWorld,
    max_attempts: u32,
}

impl FoodSpawner {
    pub fn new(grid: GridWorld, max_attempts: u32) -> Self {
        Self { grid, max_attempts }
    }

    /// Spawn an item of `kind` on a random cell outside `occupied`
    ///
    /// `occupied` must be the full union of cells taken by the snake and the
    /// other item at the time of the call.
    pub fn place<R: Rng>(
        &self,
        kind: ItemKind,
        rng: &mut R,
        occupied: &[Position],
    ) -> Result<Item, GameError> {
        let position = self.grid.random_cell(rng, occupied, self.max_attempts)?;
        Ok(Item::new(kind, position))
    }
}
