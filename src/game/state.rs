use super::action::Direction;
use super::grid::GridWorld;

/// A position on the game field, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Most tail cells remembered for erasing after one advance
pub const MAX_ERASE_HINTS: usize = 2;

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
    /// Turn to commit at the start of the next advance
    pending_direction: Option<Direction>,
    /// Length the body grows or shrinks toward
    target_length: usize,
    /// Tail cells dropped by the latest advance, newest last
    erase_hints: Vec<Position>,
}

impl Snake {
    /// Create a length-1 snake at `head`
    pub fn new(head: Position, direction: Direction) -> Self {
        Self {
            body: vec![head],
            direction,
            pending_direction: None,
            target_length: 1,
            erase_hints: Vec::new(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn target_length(&self) -> usize {
        self.target_length
    }

    pub fn erase_hints(&self) -> &[Position] {
        &self.erase_hints
    }

    /// Queue a turn for the next advance
    ///
    /// The press is checked against the current direction through the turn
    /// table; presses without an entry are dropped. Returns whether the press
    /// was accepted.
    pub fn set_pending_direction(&mut self, pressed: Direction) -> bool {
        match self.direction.turn(pressed) {
            Some(next) => {
                self.pending_direction = Some(next);
                true
            }
            None => false,
        }
    }

    /// Move one cell forward, trimming the tail down to the target length
    pub fn advance(&mut self, grid: &GridWorld) {
        if let Some(next) = self.pending_direction.take() {
            self.direction = next;
        }

        let new_head = grid.step(self.head(), self.direction);
        self.body.insert(0, new_head);

        self.erase_hints.clear();
        while self.body.len() > self.target_length {
            if let Some(tail) = self.body.pop() {
                if self.erase_hints.len() == MAX_ERASE_HINTS {
                    self.erase_hints.remove(0);
                }
                self.erase_hints.push(tail);
            }
        }
    }

    /// Check if the head overlaps a body segment at or after `from_index`
    pub fn occupies_beyond_head(&self, from_index: usize) -> bool {
        let head = self.head();
        self.body
            .iter()
            .skip(from_index.max(1))
            .any(|segment| *segment == head)
    }

    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Shorten the target length; never goes below 1
    pub fn shrink(&mut self) {
        self.target_length = self.target_length.saturating_sub(1).max(1);
    }

    /// Back to a single segment at `head`
    pub fn reset(&mut self, head: Position, direction: Direction) {
        self.body.clear();
        self.body.push(head);
        self.direction = direction;
        self.pending_direction = None;
        self.target_length = 1;
        self.erase_hints.clear();
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
