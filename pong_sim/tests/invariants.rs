//! Property tests for the per-tick invariants of the simulation.

use pong_sim::consts::*;
use pong_sim::*;
use proptest::prelude::*;

fn intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::MoveUp),
        Just(Intent::MoveDown),
        Just(Intent::Hold),
    ]
}

fn speed() -> impl Strategy<Value = Fx> {
    prop_oneof![Just(BALL_SPEED), Just(-BALL_SPEED)]
}

prop_compose! {
    fn playing_state()(
        left_y in PADDLE_MIN_Y..=PADDLE_MAX_Y,
        right_y in PADDLE_MIN_Y..=PADDLE_MAX_Y,
        ball_x in 0..=(FIELD_WIDTH - BALL_SIZE),
        ball_y in 0..=(FIELD_HEIGHT - BALL_SIZE),
        vel_x in speed(),
        vel_y in speed(),
        left_score in 0u8..WINNING_SCORE,
        right_score in 0u8..WINNING_SCORE,
    ) -> SimState {
        SimState {
            paddles: [Paddle::new(left_y), Paddle::new(right_y)],
            ball: Ball::new(Vec2::new(ball_x, ball_y), Vec2::new(vel_x, vel_y)),
            score: [left_score, right_score],
            phase: Phase::Playing,
        }
    }
}

fn paddles_in_bounds(state: &SimState) -> bool {
    state
        .paddles
        .iter()
        .all(|p| (PADDLE_MIN_Y..=PADDLE_MAX_Y).contains(&p.y))
}

proptest! {
    #[test]
    fn paddles_stay_clamped(
        start in playing_state(),
        intents in prop::collection::vec((intent(), intent()), 1..400),
    ) {
        let mut game = Game::new();
        game.restore(0, start);

        for (left, right) in intents {
            game.step(IntentPair::new(left, right));
            prop_assert!(paddles_in_bounds(&game.state));
        }
    }

    #[test]
    fn ball_speed_never_changes(
        start in playing_state(),
        intents in prop::collection::vec((intent(), intent()), 1..400),
    ) {
        let mut game = Game::new();
        game.restore(0, start);

        for (left, right) in intents {
            game.step(IntentPair::new(left, right));
            prop_assert_eq!(game.state.ball.vel.x.abs(), BALL_SPEED);
            prop_assert_eq!(game.state.ball.vel.y.abs(), BALL_SPEED);
        }
    }

    #[test]
    fn scores_rise_by_one_per_event(
        start in playing_state(),
        intents in prop::collection::vec((intent(), intent()), 1..600),
    ) {
        let mut game = Game::new();
        game.restore(0, start);

        for (left, right) in intents {
            let before = game.state.score;
            let event = game.step(IntentPair::new(left, right));
            let after = game.state.score;

            prop_assert!(after[0] >= before[0] && after[1] >= before[1]);
            let gained = (after[0] - before[0]) + (after[1] - before[1]);
            prop_assert!(gained <= 1);
            prop_assert_eq!(gained == 1, event.is_some());
        }
    }

    #[test]
    fn ended_exactly_when_someone_reaches_five(
        start in playing_state(),
        intents in prop::collection::vec((intent(), intent()), 1..600),
    ) {
        let mut game = Game::new();
        game.restore(0, start);

        for (left, right) in intents {
            let event = game.step(IntentPair::new(left, right));
            let won = game.state.score.iter().filter(|&&s| s == WINNING_SCORE).count();

            prop_assert!(won <= 1);
            prop_assert_eq!(game.phase() == Phase::Ended, won == 1);
            if let Some(Event::MatchWon { winner, .. }) = event {
                prop_assert_eq!(game.winner(), Some(winner));
            }
        }
    }

    #[test]
    fn step_is_deterministic(
        start in playing_state(),
        left in intent(),
        right in intent(),
    ) {
        let intents = IntentPair::new(left, right);
        prop_assert_eq!(Physics::step(&start, intents), Physics::step(&start, intents));
    }

    #[test]
    fn restart_always_yields_initial_state(
        start in playing_state(),
        winner_is_left in any::<bool>(),
        tick in any::<Tick>(),
    ) {
        let mut state = start;
        state.phase = Phase::Ended;
        state.score[if winner_is_left { 0 } else { 1 }] = WINNING_SCORE;

        let mut game = Game::new();
        game.restore(tick, state);

        prop_assert!(game.restart());
        prop_assert_eq!(game, Game::new());
    }

    #[test]
    fn driver_keys_keep_paddle_in_field(
        presses in prop::collection::vec((any::<bool>(), any::<bool>()), 1..300),
    ) {
        let mut driver = TickDriver::new();
        driver.start();

        for (up, down) in presses {
            driver.tick(&KeyState { up, down });
            let view = driver.view();
            prop_assert!((PADDLE_MIN_Y..=PADDLE_MAX_Y).contains(&view.right_y));
            prop_assert!((PADDLE_MIN_Y..=PADDLE_MAX_Y).contains(&view.left_y));
        }
    }
}
