use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Every legal (current, pressed) -> resulting transition.
///
/// Only the eight 90-degree turns are listed. Pressing the current direction
/// again or its opposite has no entry, so a reversal can never be applied.
pub const TURN_TABLE: [((Direction, Direction), Direction); 8] = [
    ((Direction::Up, Direction::Left), Direction::Left),
    ((Direction::Up, Direction::Right), Direction::Right),
    ((Direction::Down, Direction::Left), Direction::Left),
    ((Direction::Down, Direction::Right), Direction::Right),
    ((Direction::Left, Direction::Up), Direction::Up),
    ((Direction::Left, Direction::Down), Direction::Down),
    ((Direction::Right, Direction::Up), Direction::Up),
    ((Direction::Right, Direction::Down), Direction::Down),
];

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Looks up the direction a key press leads to while moving in `self`
    pub fn turn(self, pressed: Direction) -> Option<Direction> {
        TURN_TABLE
            .iter()
            .find(|((current, key), _)| *current == self && *key == pressed)
            .map(|(_, result)| *result)
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Discrete input delivered to the game between ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Request a turn, validated against the turn table
    Turn(Direction),
    /// Start over from a fresh board
    Restart,
    /// End the session
    Quit,
}

impl From<Direction> for Input {
    fn from(direction: Direction) -> Self {
        Input::Turn(direction)
    }
}
