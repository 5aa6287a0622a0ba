//! Turns terminal key events into the paddle's held-key state.

use pong_sim::{Key, KeyState};
use ratatui::crossterm::event::{KeyCode, KeyEventKind};
use std::time::{Duration, Instant};

/// How long a press counts as held when the terminal never reports releases.
/// Longer than the typical auto-repeat interval so a held key stays held.
pub const LATCH_WINDOW: Duration = Duration::from_millis(150);

/// Game key mapping for cleaner input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameKey {
    Paddle(Key),
    /// Start or restart the match
    Action,
}

pub fn map_keycode_to_game_key(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameKey::Paddle(Key::Up)),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameKey::Paddle(Key::Down))
        }
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameKey::Action),
        _ => None,
    }
}

/// Common trait for paddle key tracking
pub trait PaddleInput {
    fn handle(&mut self, key: Key, kind: KeyEventKind, now: Instant);
    fn key_state(&self, now: Instant) -> KeyState;
    fn reset(&mut self);
}

/// Press/release tracking for terminals that report key releases
#[derive(Debug, Default)]
pub struct EnhancedPaddleInput {
    keys: KeyState,
}

impl PaddleInput for EnhancedPaddleInput {
    fn handle(&mut self, key: Key, kind: KeyEventKind, _now: Instant) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.keys.press(key),
            KeyEventKind::Release => self.keys.release(key),
        }
    }

    fn key_state(&self, _now: Instant) -> KeyState {
        self.keys
    }

    fn reset(&mut self) {
        self.keys.clear();
    }
}

/// Press-only tracking: each press holds the key for [`LATCH_WINDOW`]
#[derive(Debug, Default)]
pub struct LatchedPaddleInput {
    up_until: Option<Instant>,
    down_until: Option<Instant>,
}

impl PaddleInput for LatchedPaddleInput {
    fn handle(&mut self, key: Key, kind: KeyEventKind, now: Instant) {
        if kind == KeyEventKind::Release {
            return;
        }

        // Pressing one direction lets go of the other immediately
        let until = Some(now + LATCH_WINDOW);
        match key {
            Key::Up => {
                self.up_until = until;
                self.down_until = None;
            }
            Key::Down => {
                self.down_until = until;
                self.up_until = None;
            }
        }
    }

    fn key_state(&self, now: Instant) -> KeyState {
        let held = |until: Option<Instant>| until.is_some_and(|t| now < t);
        KeyState {
            up: held(self.up_until),
            down: held(self.down_until),
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Input system that adapts to terminal capabilities
pub struct InputSystem {
    paddle: Box<dyn PaddleInput>,
    is_enhanced: bool,
}

impl InputSystem {
    pub fn new(is_enhanced: bool) -> Self {
        let paddle: Box<dyn PaddleInput> = if is_enhanced {
            Box::new(EnhancedPaddleInput::default())
        } else {
            Box::new(LatchedPaddleInput::default())
        };

        Self {
            paddle,
            is_enhanced,
        }
    }

    pub fn mode_description(&self) -> &'static str {
        if self.is_enhanced {
            "Enhanced (hold keys)"
        } else {
            "Latched (tap or hold keys)"
        }
    }

    pub fn handle_key(&mut self, key: Key, kind: KeyEventKind, now: Instant) {
        self.paddle.handle(key, kind, now);
    }

    pub fn key_state(&self, now: Instant) -> KeyState {
        self.paddle.key_state(now)
    }

    pub fn reset(&mut self) {
        self.paddle.reset();
    }
}
