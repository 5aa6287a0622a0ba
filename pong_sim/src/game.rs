//! Match lifecycle and state management.

use crate::physics::Physics;
use crate::types::*;
use log::{debug, info, trace};

/// Match state machine wrapping the simulation state
///
/// ```text
/// Idle --start--> Playing --winning point--> Ended --restart--> Idle
/// ```
///
/// Commands outside those edges are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    pub tick: Tick,
    pub state: SimState,
}

impl Game {
    /// Create a new game waiting for the start command
    pub fn new() -> Self {
        Game {
            tick: 0,
            state: SimState::initial(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Begin play. Only valid from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state.phase != Phase::Idle {
            debug!("start ignored in phase {:?}", self.state.phase);
            return false;
        }

        self.state.phase = Phase::Playing;
        info!("match started");
        true
    }

    /// Reset everything to the initial state. Only valid from `Ended`.
    pub fn restart(&mut self) -> bool {
        if self.state.phase != Phase::Ended {
            debug!("restart ignored in phase {:?}", self.state.phase);
            return false;
        }

        *self = Game::new();
        info!("match reset");
        true
    }

    /// Step the game simulation forward by one tick
    ///
    /// Does nothing unless the match is playing.
    pub fn step(&mut self, intents: IntentPair) -> Option<Event> {
        if self.state.phase != Phase::Playing {
            return None;
        }

        let (next, event) = Physics::step(&self.state, intents);
        self.state = next;
        self.tick += 1;

        trace!(
            "tick {} ball=({:.1}, {:.1})",
            self.tick,
            fx::to_f32(self.state.ball.pos.x),
            fx::to_f32(self.state.ball.pos.y)
        );

        match event {
            Some(Event::Scored { scorer, score }) => {
                debug!(
                    "player {} scored at tick {}: {}-{}",
                    scorer.player_number(),
                    self.tick,
                    score[0],
                    score[1]
                );
            }
            Some(Event::MatchWon { winner, score }) => {
                info!(
                    "player {} won {}-{} after {} ticks",
                    winner.player_number(),
                    score[0],
                    score[1],
                    self.tick
                );
            }
            None => {}
        }

        event
    }

    /// Generate a view of the current game state for rendering
    pub fn view(&self) -> View {
        View {
            tick: self.tick,
            phase: self.state.phase,
            left_y: self.state.paddles[0].y,
            right_y: self.state.paddles[1].y,
            ball_pos: self.state.ball.pos,
            score: self.state.score,
            winner: self.winner(),
        }
    }

    /// Copy of the current simulation state
    pub fn snapshot(&self) -> SimState {
        self.state
    }

    /// Replace the simulation state, e.g. to set up a scenario
    pub fn restore(&mut self, tick: Tick, state: SimState) {
        self.tick = tick;
        self.state = state;
    }

    /// Get the current winner (if game is over)
    pub fn winner(&self) -> Option<Side> {
        match self.state.phase {
            Phase::Ended => self.state.winner(),
            _ => None,
        }
    }

    /// Check if the game is active (advancing on ticks)
    pub fn is_active(&self) -> bool {
        matches!(self.state.phase, Phase::Playing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn hold() -> IntentPair {
        IntentPair::default()
    }

    fn ended_game(score: [u8; 2]) -> Game {
        let mut game = Game::new();
        game.tick = 1234;
        game.state.score = score;
        game.state.phase = Phase::Ended;
        game.state.paddles[0].y = 0;
        game.state.paddles[1].y = PADDLE_MAX_Y;
        game.state.ball.pos = Vec2::new(fx::from_int(-2), fx::from_int(17));
        game.state.ball.vel = Vec2::new(-BALL_SPEED, -BALL_SPEED);
        game
    }

    #[test]
    fn test_game_creation() {
        let game = Game::new();

        assert_eq!(game.tick, 0);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.state, SimState::initial());
    }

    #[test]
    fn test_idle_does_not_advance() {
        let mut game = Game::new();

        assert!(game.step(hold()).is_none());
        assert_eq!(game.tick, 0);
        assert_eq!(game.state, SimState::initial());
    }

    #[test]
    fn test_start_from_idle() {
        let mut game = Game::new();

        assert!(game.start());
        assert_eq!(game.phase(), Phase::Playing);

        game.step(hold());
        assert_eq!(game.tick, 1);
        assert_eq!(
            game.state.ball.pos,
            Vec2::new(fx::from_int(298), fx::from_int(198))
        );
    }

    #[test]
    fn test_start_ignored_outside_idle() {
        let mut game = Game::new();
        game.start();
        assert!(!game.start());
        assert_eq!(game.phase(), Phase::Playing);

        let mut game = ended_game([5, 0]);
        let before = game.clone();
        assert!(!game.start());
        assert_eq!(game, before);
    }

    #[test]
    fn test_restart_ignored_outside_ended() {
        let mut game = Game::new();
        assert!(!game.restart());
        assert_eq!(game.phase(), Phase::Idle);

        game.start();
        game.step(hold());
        let before = game.clone();
        assert!(!game.restart());
        assert_eq!(game, before);
    }

    #[test]
    fn test_restart_restores_initial_state() {
        for score in [[5, 0], [3, 5], [5, 4]] {
            let mut game = ended_game(score);

            assert!(game.restart());
            assert_eq!(game, Game::new());
        }
    }

    #[test]
    fn test_ended_does_not_advance() {
        let mut game = ended_game([0, 5]);
        let before = game.clone();

        assert!(game.step(IntentPair::new(Intent::MoveDown, Intent::MoveUp)).is_none());
        assert_eq!(game, before);
    }

    #[test]
    fn test_win_moves_to_ended() {
        let mut game = Game::new();
        game.start();
        game.state.score = [0, 4];
        game.state.paddles[0].y = 0;
        game.state.ball = Ball::new(
            Vec2::new(fx::from_int(2), fx::from_int(300)),
            Vec2::new(-BALL_SPEED, BALL_SPEED),
        );

        let event = game.step(hold());

        assert_eq!(
            event,
            Some(Event::MatchWon {
                winner: Side::Right,
                score: [0, 5]
            })
        );
        assert_eq!(game.phase(), Phase::Ended);
        assert_eq!(game.winner(), Some(Side::Right));
        assert_eq!(game.state.ball.pos.x, fx::from_int(-1));
    }

    #[test]
    fn test_snapshot_and_restore() {
        let mut game1 = Game::new();
        game1.start();
        for _ in 0..10 {
            game1.step(IntentPair::new(Intent::MoveUp, Intent::MoveDown));
        }

        let mut game2 = Game::new();
        game2.restore(game1.tick, game1.snapshot());

        assert_eq!(game1, game2);
        assert_eq!(game1.view(), game2.view());
    }

    #[test]
    fn test_view_generation() {
        let mut game = Game::new();
        game.start();
        game.step(IntentPair::new(Intent::MoveDown, Intent::MoveUp));
        let view = game.view();

        assert_eq!(view.tick, 1);
        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.left_y, game.state.paddles[0].y);
        assert_eq!(view.right_y, game.state.paddles[1].y);
        assert_eq!(view.ball_pos, game.state.ball.pos);
        assert_eq!(view.score, [0, 0]);
        assert_eq!(view.winner, None);
    }

    #[test]
    fn test_is_active_follows_phase() {
        let mut game = Game::new();
        assert!(!game.is_active());

        game.start();
        assert!(game.is_active());

        let game = ended_game([5, 2]);
        assert!(!game.is_active());
        assert_eq!(game.winner(), Some(Side::Left));
    }

    #[test]
    fn test_tick_counter_outlives_u32() {
        let mut game = Game::new();
        game.start();
        game.restore(u32::MAX as Tick, game.snapshot());

        game.step(hold());
        game.step(hold());

        assert_eq!(game.tick, u32::MAX as Tick + 2);
        assert_eq!(game.view().tick, game.tick);
    }
}
