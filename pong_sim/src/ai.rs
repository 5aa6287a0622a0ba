//! Computer opponent.
//!
//! The tracker only looks at where the ball is right now. It never predicts
//! the ball's path, so steep vertical motion can outrun it.

use crate::types::*;

/// Something that decides a paddle's intent each tick
pub trait Controller {
    /// Intent for the paddle on `side` given the current state
    fn intent(&mut self, state: &SimState, side: Side) -> Intent;
}

/// Chase the ball's Y with the paddle's center
pub fn track(ball_y: Fx, paddle_y: Fx) -> Intent {
    let paddle = Paddle::new(paddle_y);

    if ball_y < paddle.center() && !paddle.at_top() {
        Intent::MoveUp
    } else if ball_y > paddle.center() && !paddle.at_bottom() {
        Intent::MoveDown
    } else {
        Intent::Hold
    }
}

/// Default computer controller
#[derive(Debug, Default, Clone, Copy)]
pub struct Tracker;

impl Controller for Tracker {
    fn intent(&mut self, state: &SimState, side: Side) -> Intent {
        track(state.ball.pos.y, state.paddle(side).y)
    }
}
