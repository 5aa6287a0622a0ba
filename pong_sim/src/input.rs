//! Human paddle input.
//!
//! The frontend owns a [`KeyState`] and flips it on key events; the driver
//! reads it once per tick. Presses that begin and end between two ticks are
//! never seen.

use crate::types::*;

/// Logical keys for the human paddle
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
}

/// Which paddle keys are currently held
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyState {
    pub up: bool,
    pub down: bool,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set(key, false);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Map held keys to an intent for a paddle at `paddle_y`.
    ///
    /// A key pushing into a wall is ignored; both or neither held is `Hold`.
    pub fn intent(&self, paddle_y: Fx) -> Intent {
        let paddle = Paddle::new(paddle_y);
        let up = self.up && !paddle.at_top();
        let down = self.down && !paddle.at_bottom();

        match (up, down) {
            (true, false) if !self.down => Intent::MoveUp,
            (false, true) if !self.up => Intent::MoveDown,
            _ => Intent::Hold,
        }
    }
}
