//! Deterministic physics engine for Pong.
//!
//! [`Physics::step`] is the whole per-tick rule set. The individual phases are
//! exposed so tests can exercise them in isolation, but callers should only
//! ever go through `step`, which applies them in a fixed order:
//!
//! 1. paddles move by their intents, clamped to the field
//! 2. the ball advances by its velocity, unconditionally
//! 3. top/bottom walls flip the vertical velocity
//! 4. each paddle independently flips the horizontal velocity
//! 5. a ball at either goal line scores and is re-served or ends the match
//!
//! No phase repositions the ball after a bounce, so the ball may overlap a
//! wall or paddle for a tick before moving away.

use crate::consts::*;
use crate::types::{fx, *};

/// Physics calculations for game simulation
pub struct Physics;

impl Physics {
    /// Advance `state` by one tick.
    ///
    /// Pure: the same state and intents always produce the same result. The
    /// caller is responsible for only stepping while the match is playing.
    pub fn step(state: &SimState, intents: IntentPair) -> (SimState, Option<Event>) {
        let mut next = *state;

        Self::move_paddle(&mut next.paddles[0], intents.left);
        Self::move_paddle(&mut next.paddles[1], intents.right);

        Self::advance_ball(&mut next.ball);
        Self::bounce_walls(&mut next.ball);
        Self::bounce_paddles(&mut next.ball, &next.paddles);

        let event =
            Self::check_scoring(&next.ball).map(|scorer| Self::award_point(&mut next, scorer));

        (next, event)
    }

    /// Move a paddle one increment in the intent's direction, clamped to the field
    pub fn move_paddle(paddle: &mut Paddle, intent: Intent) {
        paddle.y = fx::clamp_fx(paddle.y + intent.displacement(), PADDLE_MIN_Y, PADDLE_MAX_Y);
    }

    /// Move the ball by its velocity
    pub fn advance_ball(ball: &mut Ball) {
        ball.pos.x += ball.vel.x;
        ball.pos.y += ball.vel.y;
    }

    /// Flip vertical velocity at the top or bottom wall
    pub fn bounce_walls(ball: &mut Ball) -> bool {
        if ball.pos.y <= 0 || ball.pos.y >= FIELD_HEIGHT - BALL_SIZE {
            ball.vel.y = -ball.vel.y;
            return true;
        }
        false
    }

    /// Flip horizontal velocity for each paddle the ball is touching.
    ///
    /// Both paddles are checked; if both match in one tick the flips cancel.
    /// With the reference field width that cannot happen.
    pub fn bounce_paddles(ball: &mut Ball, paddles: &[Paddle; 2]) -> u8 {
        let mut hits = 0;

        if Self::touches_paddle(ball, &paddles[0], Side::Left) {
            ball.vel.x = -ball.vel.x;
            hits += 1;
        }
        if Self::touches_paddle(ball, &paddles[1], Side::Right) {
            ball.vel.x = -ball.vel.x;
            hits += 1;
        }

        hits
    }

    /// Ball is at or past the paddle's inner face and within its vertical span
    pub fn touches_paddle(ball: &Ball, paddle: &Paddle, side: Side) -> bool {
        let at_face = match side {
            Side::Left => ball.pos.x <= PADDLE_WIDTH,
            Side::Right => ball.pos.x >= FIELD_WIDTH - PADDLE_WIDTH - BALL_SIZE,
        };

        at_face && paddle.spans(ball.pos.y)
    }

    /// Check if ball reached a goal line (scoring condition)
    pub fn check_scoring(ball: &Ball) -> Option<Side> {
        if ball.pos.x <= 0 {
            Some(Side::Right) // Right player scored
        } else if ball.pos.x >= FIELD_WIDTH - BALL_SIZE {
            Some(Side::Left) // Left player scored
        } else {
            None
        }
    }

    /// Credit `scorer` and either end the match or re-serve from the center
    fn award_point(state: &mut SimState, scorer: Side) -> Event {
        state.score[scorer.index()] += 1;

        if state.score[scorer.index()] == WINNING_SCORE {
            // Ball stays where it crossed the line
            state.phase = Phase::Ended;
            return Event::MatchWon {
                winner: scorer,
                score: state.score,
            };
        }

        Self::serve_ball(&mut state.ball);
        Event::Scored {
            scorer,
            score: state.score,
        }
    }

    /// Re-center the ball and reverse its horizontal direction
    pub fn serve_ball(ball: &mut Ball) {
        ball.pos = Ball::center_pos();
        ball.vel.x = -ball.vel.x;
    }
}
