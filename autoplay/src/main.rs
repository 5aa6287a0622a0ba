//! Headless harness that plays full pong_sim matches with both paddles
//! scripted and reports how they ended.
//!
//! The left paddle goes through the driver's controller seam; the right one is
//! turned into key presses, the way a player would drive it.

use clap::{Parser, ValueEnum};
use color_eyre::eyre::WrapErr;
use crossterm::{
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use pong_sim::ai::{self, Controller};
use pong_sim::consts::TICK_INTERVAL;
use pong_sim::{Event, Intent, KeyState, Phase, SimState, Side, Tick, TickDriver};
use serde::Serialize;
use std::io::{stdout, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "autoplay", about = "Play pong_sim matches between scripted paddles")]
struct Args {
    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// How the right paddle is driven
    #[arg(long, value_enum, default_value_t = Strategy::Lazy)]
    human: Strategy,

    /// How the left paddle is driven; `track` is the built-in computer
    #[arg(long, value_enum, default_value_t = Strategy::Track)]
    computer: Strategy,

    /// Give up on a match after this many ticks
    #[arg(long, default_value_t = 20_000)]
    max_ticks: Tick,

    /// Pace ticks with the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print one JSON report per match
    #[arg(long)]
    json: bool,
}

/// Scripted play for either paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Strategy {
    /// Never move
    Idle,
    /// Chase the ball every tick, like the computer does
    Track,
    /// Chase the ball on every third tick only
    Lazy,
}

/// Plays a [`Strategy`], counting the ticks it has been asked about
#[derive(Debug, Clone, Copy)]
struct Scripted {
    strategy: Strategy,
    ticks: Tick,
}

impl Scripted {
    fn new(strategy: Strategy) -> Self {
        Self { strategy, ticks: 0 }
    }
}

impl Controller for Scripted {
    fn intent(&mut self, state: &SimState, side: Side) -> Intent {
        let tick = self.ticks;
        self.ticks += 1;
        let chase = || ai::track(state.ball.pos.y, state.paddle(side).y);

        match self.strategy {
            Strategy::Idle => Intent::Hold,
            Strategy::Track => chase(),
            Strategy::Lazy if tick % 3 == 0 => chase(),
            Strategy::Lazy => Intent::Hold,
        }
    }
}

/// Keys a player would hold to produce `intent`
fn keys_for(intent: Intent) -> KeyState {
    KeyState {
        up: intent == Intent::MoveUp,
        down: intent == Intent::MoveDown,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Won,
    Unfinished,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Point {
    tick: Tick,
    scorer: Side,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct MatchReport {
    index: u32,
    human: Strategy,
    computer: Strategy,
    outcome: Outcome,
    winner: Option<Side>,
    score: [u8; 2],
    ticks: Tick,
    points: Vec<Point>,
}

impl MatchReport {
    /// Same result ignoring which match number produced it
    fn same_play(&self, other: &MatchReport) -> bool {
        self.outcome == other.outcome
            && self.winner == other.winner
            && self.score == other.score
            && self.ticks == other.ticks
            && self.points == other.points
    }
}

struct RunOptions {
    human: Strategy,
    computer: Strategy,
    max_ticks: Tick,
    realtime: bool,
}

fn play_match(index: u32, options: &RunOptions, stop: &AtomicBool) -> MatchReport {
    let mut driver = TickDriver::with_opponent(Scripted::new(options.computer));
    let mut human = Scripted::new(options.human);
    driver.start();

    let mut points = Vec::new();
    let mut interrupted = false;
    let mut next_tick = Instant::now();

    while driver.view().phase == Phase::Playing && driver.view().tick < options.max_ticks {
        if stop.load(Ordering::SeqCst) {
            interrupted = true;
            break;
        }

        // One tick per interval, so the human script sees every tick
        if options.realtime {
            next_tick += TICK_INTERVAL;
            std::thread::sleep(next_tick.saturating_duration_since(Instant::now()));
        }

        let keys = keys_for(human.intent(&driver.game().state, Side::Right));
        if let Some(event) = driver.tick(&keys) {
            let (Event::Scored { scorer, .. } | Event::MatchWon { winner: scorer, .. }) = event;
            points.push(Point {
                tick: driver.view().tick,
                scorer,
            });
        }
    }

    let view = driver.view();
    let outcome = if view.phase == Phase::Ended {
        Outcome::Won
    } else if interrupted {
        Outcome::Interrupted
    } else {
        log::warn!("match {} still running after {} ticks", index, view.tick);
        Outcome::Unfinished
    };

    MatchReport {
        index,
        human: options.human,
        computer: options.computer,
        outcome,
        winner: view.winner,
        score: view.score,
        ticks: view.tick,
        points,
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "Computer",
        Side::Right => "Human",
    }
}

fn print_report(report: &MatchReport) -> color_eyre::Result<()> {
    let (color, headline) = match (report.outcome, report.winner) {
        (Outcome::Won, Some(side)) => (
            if side == Side::Right {
                Color::Green
            } else {
                Color::Blue
            },
            format!("{} wins", side_name(side)),
        ),
        (Outcome::Interrupted, _) => (Color::DarkGrey, "interrupted".to_string()),
        _ => (Color::Yellow, "unfinished".to_string()),
    };

    execute!(
        stdout(),
        Print(format!("match {:>3}: ", report.index + 1)),
        SetForegroundColor(color),
        Print(format!("{:<14}", headline)),
        ResetColor,
        Print(format!(
            " {} - {}  ({} ticks, computer: {:?}, human: {:?})\n",
            report.score[0], report.score[1], report.ticks, report.computer, report.human
        ))
    )
    .wrap_err("failed to write match report")?;
    Ok(())
}

fn print_summary(reports: &[MatchReport]) -> color_eyre::Result<()> {
    let wins = |side| {
        reports
            .iter()
            .filter(|r| r.winner == Some(side))
            .count()
    };
    let unfinished = reports
        .iter()
        .filter(|r| r.outcome != Outcome::Won)
        .count();
    let deterministic = reports
        .iter()
        .filter(|r| r.outcome != Outcome::Interrupted)
        .collect::<Vec<_>>()
        .windows(2)
        .all(|pair| pair[0].same_play(pair[1]));

    execute!(
        stdout(),
        SetForegroundColor(Color::Cyan),
        Print(format!(
            "{} matches: computer {}, human {}, unfinished {}; identical replays: {}\n",
            reports.len(),
            wins(Side::Left),
            wins(Side::Right),
            unfinished,
            if deterministic { "yes" } else { "no" }
        )),
        ResetColor
    )
    .wrap_err("failed to write summary")?;
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Handle Ctrl+C gracefully: finish the current tick, then report
    let stop = Arc::new(AtomicBool::new(false));
    let handler_stop = Arc::clone(&stop);
    ctrlc::set_handler(move || handler_stop.store(true, Ordering::SeqCst))
        .wrap_err("failed to install Ctrl-C handler")?;

    let options = RunOptions {
        human: args.human,
        computer: args.computer,
        max_ticks: args.max_ticks,
        realtime: args.realtime,
    };

    let mut reports = Vec::new();
    for index in 0..args.matches {
        if stop.load(Ordering::SeqCst) {
            break;
        }

        let report = play_match(index, &options, &stop);
        if args.json {
            let line = serde_json::to_string(&report).wrap_err("failed to encode report")?;
            writeln!(stdout(), "{line}")?;
        } else {
            print_report(&report)?;
        }
        reports.push(report);
    }

    if !args.json {
        print_summary(&reports)?;
    }

    Ok(())
}
