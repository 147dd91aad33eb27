use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, Input};

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Map a key press to a game input; unbound keys give `None`
    pub fn handle_key_event(&self, key: KeyEvent) -> Option<Input> {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Input::Quit);
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => Some(Input::Turn(Direction::Up)),
            KeyCode::Down => Some(Input::Turn(Direction::Down)),
            KeyCode::Left => Some(Input::Turn(Direction::Left)),
            KeyCode::Right => Some(Input::Turn(Direction::Right)),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Some(Input::Turn(Direction::Up)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(Input::Turn(Direction::Down)),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(Input::Turn(Direction::Left)),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(Input::Turn(Direction::Right)),

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('r') | KeyCode::Char('R') => Some(Input::Restart),

            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
