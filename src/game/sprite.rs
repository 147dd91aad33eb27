use super::config::{Palette, Rgb};
use super::food::{Item, ItemKind};
use super::state::Position;

/// Anything that occupies a cell and gets painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Food(Position),
    Obstacle(Position),
    SnakeSegment { position: Position, is_head: bool },
}

impl Sprite {
    pub fn position(&self) -> Position {
        match self {
            Sprite::Food(position) | Sprite::Obstacle(position) => *position,
            Sprite::SnakeSegment { position, .. } => *position,
        }
    }

    pub fn fill(&self, palette: &Palette) -> Rgb {
        match self {
            Sprite::Food(_) => palette.food,
            Sprite::Obstacle(_) => palette.obstacle,
            Sprite::SnakeSegment { .. } => palette.snake,
        }
    }
}

impl From<Item> for Sprite {
    fn from(item: Item) -> Self {
        match item.kind {
            ItemKind::Food => Sprite::Food(item.position),
            ItemKind::Obstacle => Sprite::Obstacle(item.position),
        }
    }
}
