//! Fixed-cadence tick scheduling.
//!
//! The driver owns the [`Game`] and turns wall-clock time into whole ticks.
//! Frontends call [`TickDriver::advance`] once per rendered frame with the
//! time since the previous call; the simulation runs at [`TICK_INTERVAL`]
//! regardless of how often that happens.

use crate::ai::{Controller, Tracker};
use crate::consts::{MAX_CATCH_UP_TICKS, TICK_INTERVAL};
use crate::game::Game;
use crate::input::KeyState;
use crate::types::*;
use log::debug;
use std::time::Duration;

/// Owns the match and feeds it intents at a fixed cadence
pub struct TickDriver<C: Controller = Tracker> {
    game: Game,
    /// Drives the left paddle
    opponent: C,
    /// Time banked toward the next tick
    accumulator: Duration,
}

impl TickDriver<Tracker> {
    /// Driver with the default computer opponent
    pub fn new() -> Self {
        Self::with_opponent(Tracker)
    }
}

impl Default for TickDriver<Tracker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controller> TickDriver<C> {
    /// Driver with a custom controller for the left paddle
    pub fn with_opponent(opponent: C) -> Self {
        Self {
            game: Game::new(),
            opponent,
            accumulator: Duration::ZERO,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Snapshot for the presentation layer
    pub fn view(&self) -> View {
        self.game.view()
    }

    pub fn start(&mut self) -> bool {
        self.accumulator = Duration::ZERO;
        self.game.start()
    }

    pub fn restart(&mut self) -> bool {
        self.accumulator = Duration::ZERO;
        self.game.restart()
    }

    /// Run exactly one tick with the given key state
    ///
    /// Returns `None` without touching the match unless it is playing.
    pub fn tick(&mut self, keys: &KeyState) -> Option<Event> {
        if !self.game.is_active() {
            return None;
        }

        let state = &self.game.state;
        let intents = IntentPair::new(
            self.opponent.intent(state, Side::Left),
            keys.intent(state.paddle(Side::Right).y),
        );

        self.game.step(intents)
    }

    /// Account for `elapsed` wall-clock time and run the ticks it covers.
    ///
    /// Stops as soon as the match leaves `Playing`, discarding leftover time.
    /// At most [`MAX_CATCH_UP_TICKS`] run per call; older time is dropped.
    pub fn advance(&mut self, elapsed: Duration, keys: &KeyState) -> Vec<Event> {
        let mut events = Vec::new();

        if !self.game.is_active() {
            self.accumulator = Duration::ZERO;
            return events;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= TICK_INTERVAL && ticks < MAX_CATCH_UP_TICKS {
            self.accumulator -= TICK_INTERVAL;
            ticks += 1;

            if let Some(event) = self.tick(keys) {
                events.push(event);
            }

            if !self.game.is_active() {
                self.accumulator = Duration::ZERO;
                return events;
            }
        }

        if self.accumulator >= TICK_INTERVAL {
            debug!(
                "dropping {:?} of simulation time after {} catch-up ticks",
                self.accumulator, ticks
            );
            self.accumulator = Duration::ZERO;
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    #[test]
    fn test_idle_driver_ignores_time() {
        let mut driver = TickDriver::new();

        let events = driver.advance(Duration::from_secs(5), &KeyState::default());

        assert!(events.is_empty());
        assert_eq!(driver.view().tick, 0);
        assert_eq!(driver.game().state, SimState::initial());
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut driver = TickDriver::new();
        driver.start();
        let keys = KeyState::default();

        driver.advance(Duration::from_millis(40), &keys);
        assert_eq!(driver.view().tick, 2);

        // 8 ms left over plus 8 ms makes a third tick
        driver.advance(Duration::from_millis(8), &keys);
        assert_eq!(driver.view().tick, 3);
    }

    #[test]
    fn test_advance_caps_catch_up() {
        let mut driver = TickDriver::new();
        driver.start();
        let keys = KeyState::default();

        driver.advance(Duration::from_secs(1), &keys);
        assert_eq!(driver.view().tick, MAX_CATCH_UP_TICKS);

        // Surplus was dropped rather than banked
        driver.advance(Duration::ZERO, &keys);
        assert_eq!(driver.view().tick, MAX_CATCH_UP_TICKS);
    }

    #[test]
    fn test_tick_feeds_keys_to_right_paddle() {
        let mut driver = TickDriver::new();
        driver.start();
        let start = driver.view().right_y;

        driver.tick(&KeyState {
            up: true,
            down: false,
        });

        assert_eq!(driver.view().right_y, start - PADDLE_SPEED);
    }

    #[test]
    fn test_tick_feeds_tracker_to_left_paddle() {
        let mut driver = TickDriver::new();
        driver.start();
        let start = driver.view().left_y;

        // Ball at 195 is above the paddle center at 200
        driver.tick(&KeyState::default());

        assert_eq!(driver.view().left_y, start - PADDLE_SPEED);
    }

    #[test]
    fn test_stops_mid_batch_on_win() {
        let mut driver = TickDriver::new();
        driver.start();

        // One tick from the winning point
        let mut state = driver.game().snapshot();
        state.score = [4, 0];
        state.paddles[1].y = 0;
        state.ball = Ball::new(
            Vec2::new(FIELD_WIDTH - BALL_SIZE - fx::from_int(1), fx::from_int(300)),
            Vec2::new(BALL_SPEED, BALL_SPEED),
        );
        driver.game.restore(0, state);

        let events = driver.advance(TICK_INTERVAL * 5, &KeyState::default());

        assert_eq!(
            events,
            vec![Event::MatchWon {
                winner: Side::Left,
                score: [5, 0]
            }]
        );
        assert_eq!(driver.view().tick, 1);
        assert_eq!(driver.view().phase, Phase::Ended);

        // Nothing runs after the match ends
        let frozen = driver.view();
        assert!(driver.advance(TICK_INTERVAL * 5, &KeyState::default()).is_empty());
        assert_eq!(driver.view(), frozen);
    }

    #[test]
    fn test_restart_then_start_plays_again() {
        let mut driver = TickDriver::new();
        driver.start();
        let mut state = driver.game().snapshot();
        state.phase = Phase::Ended;
        state.score = [5, 3];
        driver.game.restore(77, state);

        assert!(!driver.start());
        assert!(driver.restart());
        assert_eq!(driver.view().phase, Phase::Idle);
        assert_eq!(driver.view().score, [0, 0]);
        assert!(driver.start());

        driver.advance(TICK_INTERVAL, &KeyState::default());
        assert_eq!(driver.view().tick, 1);
    }
}
