//! Core types for the deterministic Pong engine.

use crate::consts::*;

/// Fixed-point type using 16.16 format (16 integer bits, 16 fractional bits)
pub type Fx = i32;

/// One unit in fixed-point format
pub const FX_ONE: Fx = 1 << 16;

/// Tick counter type
pub type Tick = u64;

/// Player/paddle side
///
/// The left paddle (player 1) belongs to the computer, the right paddle
/// (player 2) to the human.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Index into per-side arrays (`paddles`, `score`)
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Player number as shown on the scoreboard
    pub fn player_number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Match phase
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Waiting for the start command
    #[default]
    Idle,
    /// Ball in motion, ticks are being applied
    Playing,
    /// Someone reached the winning score
    Ended,
}

/// Normalized paddle command for one tick
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Intent {
    MoveUp,
    MoveDown,
    #[default]
    Hold,
}

impl Intent {
    /// Signed paddle displacement for this intent (Y grows downward)
    pub fn displacement(self) -> Fx {
        match self {
            Intent::MoveUp => -PADDLE_SPEED,
            Intent::MoveDown => PADDLE_SPEED,
            Intent::Hold => 0,
        }
    }
}

/// Intents for both paddles on a specific tick
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct IntentPair {
    pub left: Intent,
    pub right: Intent,
}

impl IntentPair {
    pub fn new(left: Intent, right: Intent) -> Self {
        IntentPair { left, right }
    }
}

/// 2D vector in fixed-point
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: Fx,
    pub y: Fx,
}

impl Vec2 {
    pub fn new(x: Fx, y: Fx) -> Self {
        Vec2 { x, y }
    }
}

/// Paddle state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Paddle {
    /// Y position of the top edge
    pub y: Fx,
}

impl Paddle {
    pub fn new(y: Fx) -> Self {
        Paddle { y }
    }

    /// Paddle vertically centered in the field
    pub fn centered() -> Self {
        Paddle::new(FIELD_HEIGHT / 2 - PADDLE_HEIGHT / 2)
    }

    /// Y of the paddle's vertical midpoint
    pub fn center(&self) -> Fx {
        self.y + PADDLE_HEIGHT / 2
    }

    /// True when the paddle cannot move further up
    pub fn at_top(&self) -> bool {
        self.y <= PADDLE_MIN_Y
    }

    /// True when the paddle cannot move further down
    pub fn at_bottom(&self) -> bool {
        self.y >= PADDLE_MAX_Y
    }

    /// Whether `y` lies within the paddle's vertical span (edges inclusive)
    pub fn spans(&self, y: Fx) -> bool {
        self.y <= y && y <= self.y + PADDLE_HEIGHT
    }
}

/// Ball state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ball {
    /// Top-left corner
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Ball { pos, vel }
    }

    /// Position that centers the ball in the field
    pub fn center_pos() -> Vec2 {
        Vec2::new(
            FIELD_WIDTH / 2 - BALL_SIZE / 2,
            FIELD_HEIGHT / 2 - BALL_SIZE / 2,
        )
    }

    /// Opening serve: centered, heading right and down
    pub fn opening() -> Self {
        Ball::new(Ball::center_pos(), Vec2::new(BALL_SPEED, BALL_SPEED))
    }
}

/// Complete simulation state
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimState {
    /// `[left, right]` paddles
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    /// `[left, right]` scores
    pub score: [u8; 2],
    pub phase: Phase,
}

impl SimState {
    /// State at process start and after every restart
    pub fn initial() -> Self {
        SimState {
            paddles: [Paddle::centered(), Paddle::centered()],
            ball: Ball::opening(),
            score: [0, 0],
            phase: Phase::Idle,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn score_of(&self, side: Side) -> u8 {
        self.score[side.index()]
    }

    /// Side holding the winning score, if any
    pub fn winner(&self) -> Option<Side> {
        [Side::Left, Side::Right]
            .into_iter()
            .find(|&side| self.score_of(side) >= WINNING_SCORE)
    }
}

impl Default for SimState {
    fn default() -> Self {
        SimState::initial()
    }
}

/// View data for rendering
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct View {
    pub tick: Tick,
    pub phase: Phase,
    pub left_y: Fx,     // Left paddle top edge
    pub right_y: Fx,    // Right paddle top edge
    pub ball_pos: Vec2, // Ball top-left corner
    pub score: [u8; 2], // [left, right] scores
    pub winner: Option<Side>,
}

/// Game events that can occur during a tick
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// A point that leaves the match running
    Scored {
        scorer: Side,
        score: [u8; 2], // New score after this point
    },
    /// The point that ends the match
    MatchWon { winner: Side, score: [u8; 2] },
}

/// Fixed-point utility functions
pub mod fx {
    use super::{Fx, FX_ONE};

    /// Convert from an integer
    pub const fn from_int(i: i32) -> Fx {
        i * FX_ONE
    }

    /// Convert to an integer, truncating toward negative infinity
    pub fn to_int(value: Fx) -> i32 {
        value >> 16
    }

    /// Convert to floating point
    pub fn to_f32(value: Fx) -> f32 {
        (value as f32) / (FX_ONE as f32)
    }

    /// Clamp between min and max
    pub fn clamp_fx(value: Fx, min: Fx, max: Fx) -> Fx {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }
}
