//! Fixed playfield geometry and timing.
//!
//! All lengths are in field units, stored as 16.16 fixed point. The origin is
//! the top-left corner of the field and Y grows downward.

use crate::types::{Fx, Tick, FX_ONE};
use std::time::Duration;

/// Field width
pub const FIELD_WIDTH: Fx = 600 * FX_ONE;
/// Field height
pub const FIELD_HEIGHT: Fx = 400 * FX_ONE;

/// Paddle width (paddles hug the left and right walls)
pub const PADDLE_WIDTH: Fx = 100 * FX_ONE;
/// Paddle height
pub const PADDLE_HEIGHT: Fx = 80 * FX_ONE;

/// Side length of the square ball
pub const BALL_SIZE: Fx = 10 * FX_ONE;

/// Paddle travel per tick
pub const PADDLE_SPEED: Fx = 5 * FX_ONE;
/// Ball travel per tick on each axis
pub const BALL_SPEED: Fx = 3 * FX_ONE;

/// Lowest legal paddle top edge
pub const PADDLE_MIN_Y: Fx = 0;
/// Highest legal paddle top edge
pub const PADDLE_MAX_Y: Fx = FIELD_HEIGHT - PADDLE_HEIGHT;

/// Points needed to win a match
pub const WINNING_SCORE: u8 = 5;

/// Simulation cadence (~60 Hz)
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Most ticks a single [`crate::TickDriver::advance`] call will run
pub const MAX_CATCH_UP_TICKS: Tick = 8;
