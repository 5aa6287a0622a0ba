use crate::event::{AppEvent, Event, EventHandler};
use crate::input::{map_keycode_to_game_key, GameKey, InputSystem};
use pong_sim::{Event as MatchEvent, Phase, TickDriver};
use ratatui::{
    crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    DefaultTerminal,
};
use std::time::{Duration, Instant};

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Start,
    Game,
}

/// Menu states for navigation
#[derive(Debug, Default)]
pub struct MenuState {
    pub start_selected: usize,
}

/// Game board size constants
pub const MIN_GAME_WIDTH: u16 = 60;
pub const MIN_GAME_HEIGHT: u16 = 20;
const FIXED_GAME_WIDTH: u16 = 80;
const FIXED_GAME_HEIGHT: u16 = 30;

/// How long a point announcement stays on screen
const BANNER_DURATION: Duration = Duration::from_millis(1500);

/// Redraw cadence; the simulation keeps its own inside the tick driver
const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Paces redraws and measures the wall-clock time between them
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    interval: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last: now,
        }
    }

    /// Time left before the next frame is due, zero if it already is
    pub fn until_next(&self, now: Instant) -> Duration {
        (self.last + self.interval).saturating_duration_since(now)
    }

    /// Mark a frame at `now` and return the time since the previous one
    pub fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed
    }
}

/// Main application
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// Current screen
    pub screen: AppScreen,
    /// Menu states
    pub menu_state: MenuState,
    /// Match driver, present while on the game screen
    pub driver: Option<TickDriver>,
    /// Paddle key tracking
    pub input_system: InputSystem,
    /// Frame pacing for redraws and driver updates
    pub clock: FrameClock,
    /// Latest match event and when it happened
    pub banner: Option<(MatchEvent, Instant)>,
    /// Event handler
    pub events: EventHandler,
    /// Current terminal size
    pub terminal_size: (u16, u16),
    /// Whether UI is paused due to small terminal
    pub ui_paused: bool,
}

impl App {
    /// Constructs a new instance of App
    pub fn new() -> color_eyre::Result<Self> {
        let events = EventHandler::new()?;
        let input_system = InputSystem::new(events.keyboard_enhanced());
        log::info!("input mode: {}", input_system.mode_description());

        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));

        let mut app = Self {
            running: true,
            screen: AppScreen::Start,
            menu_state: MenuState::default(),
            driver: None,
            input_system,
            clock: FrameClock::new(FRAME_INTERVAL, Instant::now()),
            banner: None,
            events,
            terminal_size: (width, height),
            ui_paused: false,
        };
        app.handle_resize(width, height);
        Ok(app)
    }

    /// Run the application's main loop
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;

        while self.running {
            let now = Instant::now();
            if self.clock.until_next(now).is_zero() {
                self.frame(now);
                terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            }

            let wait = self.clock.until_next(Instant::now());
            if let Some(event) = self.events.next_within(wait)? {
                self.handle_event(event, Instant::now());
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event, now),
            Event::App(app_event) => self.handle_app_event(app_event),
        }
    }

    /// Handle key events and convert to app events
    pub fn handle_key_event(&mut self, key_event: KeyEvent, now: Instant) {
        // Global quit keys
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if key_event.kind == KeyEventKind::Press => {
                self.events.send(AppEvent::Quit);
                return;
            }
            KeyCode::Char('c') | KeyCode::Char('C')
                if key_event.modifiers == KeyModifiers::CONTROL =>
            {
                self.events.send(AppEvent::Quit);
                return;
            }
            _ => {}
        }

        match self.screen {
            AppScreen::Start => {
                // Menu navigation - only on key press
                if key_event.kind == KeyEventKind::Press {
                    match key_event.code {
                        KeyCode::Up => self.events.send(AppEvent::MenuUp),
                        KeyCode::Down => self.events.send(AppEvent::MenuDown),
                        KeyCode::Enter => self.events.send(AppEvent::MenuSelect),
                        KeyCode::Esc => self.events.send(AppEvent::Quit),
                        _ => {}
                    }
                }
            }
            AppScreen::Game => {
                if key_event.code == KeyCode::Esc {
                    if key_event.kind == KeyEventKind::Press {
                        self.events.send(AppEvent::NavigateToStart);
                    }
                    return;
                }

                match map_keycode_to_game_key(key_event.code) {
                    Some(GameKey::Paddle(key)) => {
                        self.input_system.handle_key(key, key_event.kind, now)
                    }
                    Some(GameKey::Action) if key_event.kind == KeyEventKind::Press => {
                        self.events.send(AppEvent::MatchAction)
                    }
                    _ => {}
                }
            }
        }
    }

    /// Handle application events
    pub fn handle_app_event(&mut self, app_event: AppEvent) {
        match app_event {
            AppEvent::Quit => self.quit(),
            AppEvent::NavigateToStart => self.navigate_to_start(),
            AppEvent::NavigateToGame => self.navigate_to_game(),
            AppEvent::MenuUp => self.menu_up(),
            AppEvent::MenuDown => self.menu_down(),
            AppEvent::MenuSelect => self.menu_select(),
            AppEvent::MatchAction => self.match_action(),
            AppEvent::TerminalResize(width, height) => self.handle_resize(width, height),
        }
    }

    /// Advance the match by the time since the previous frame
    pub fn frame(&mut self, now: Instant) {
        let elapsed = self.clock.lap(now);

        if let Some((_, at)) = self.banner {
            if now.saturating_duration_since(at) >= BANNER_DURATION {
                self.banner = None;
            }
        }

        // A too-small terminal pauses the match rather than playing blind
        if self.ui_paused {
            return;
        }

        if let Some(ref mut driver) = self.driver {
            let keys = self.input_system.key_state(now);
            if let Some(event) = driver.advance(elapsed, &keys).pop() {
                self.banner = Some((event, now));
            }
        }
    }

    // Navigation methods
    fn quit(&mut self) {
        self.running = false;
    }

    fn navigate_to_start(&mut self) {
        self.screen = AppScreen::Start;
        self.driver = None;
        self.banner = None;
    }

    fn navigate_to_game(&mut self) {
        self.screen = AppScreen::Game;
        self.start_local_game();
    }

    // Menu navigation
    fn menu_up(&mut self) {
        let count = self.get_start_menu_items().len();
        self.menu_state.start_selected = (self.menu_state.start_selected + count - 1) % count;
    }

    fn menu_down(&mut self) {
        let count = self.get_start_menu_items().len();
        self.menu_state.start_selected = (self.menu_state.start_selected + 1) % count;
    }

    fn menu_select(&mut self) {
        match self.menu_state.start_selected {
            0 => self.events.send(AppEvent::NavigateToGame), // Play
            1 => self.events.send(AppEvent::Quit),           // Quit
            _ => {}
        }
    }

    /// Space/Enter on the game screen: start from Idle, reset from Ended
    fn match_action(&mut self) {
        let Some(ref mut driver) = self.driver else {
            return;
        };

        match driver.view().phase {
            Phase::Idle => {
                driver.start();
            }
            Phase::Ended => {
                driver.restart();
                self.input_system.reset();
                self.banner = None;
            }
            Phase::Playing => {}
        }
    }

    // Terminal size management
    fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);

        // Check if terminal is large enough for game
        self.ui_paused = width < MIN_GAME_WIDTH || height < MIN_GAME_HEIGHT;
    }

    pub fn calculate_centered_game_area(
        &self,
        area: ratatui::layout::Rect,
    ) -> Option<ratatui::layout::Rect> {
        if self.ui_paused {
            return None; // Too small
        }

        let game_width = FIXED_GAME_WIDTH.min(area.width);
        let game_height = FIXED_GAME_HEIGHT.min(area.height);

        let x_offset = area.width.saturating_sub(game_width) / 2;
        let y_offset = area.height.saturating_sub(game_height) / 2;

        Some(ratatui::layout::Rect {
            x: area.x + x_offset,
            y: area.y + y_offset,
            width: game_width,
            height: game_height,
        })
    }

    // Game methods
    fn start_local_game(&mut self) {
        self.driver = Some(TickDriver::new());
        self.input_system.reset();
        self.banner = None;
        self.clock.lap(Instant::now());
    }

    // Helper methods for UI
    pub fn get_start_menu_items(&self) -> Vec<&str> {
        vec!["Play vs Computer", "Quit"]
    }
}
