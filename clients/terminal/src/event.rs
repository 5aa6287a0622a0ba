use color_eyre::eyre::WrapErr;
use ratatui::crossterm::{
    event::{
        self, Event as CrosstermEvent, KeyEvent, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::supports_keyboard_enhancement,
};
use std::{
    io::stdout,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

/// Input reaching the main loop
#[derive(Clone, Debug)]
pub enum Event {
    /// A key press, repeat or release
    Key(KeyEvent),
    /// Application events
    App(AppEvent),
}

/// Application events for navigation and match control
#[derive(Clone, Debug)]
pub enum AppEvent {
    Quit,
    NavigateToStart,
    NavigateToGame,
    MenuUp,
    MenuDown,
    MenuSelect,
    /// Start an idle match or reset a finished one
    MatchAction,
    TerminalResize(u16, u16), // width, height
}

/// Queue of key and app events, fed by a background reader thread
pub struct EventHandler {
    sender: mpsc::Sender<Event>,
    receiver: mpsc::Receiver<Event>,
    /// Whether key release events will be reported
    keyboard_enhanced: bool,
}

impl EventHandler {
    /// Expects the terminal to already be in raw mode.
    pub fn new() -> color_eyre::Result<Self> {
        let (sender, receiver) = mpsc::channel();

        let keyboard_enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
        if keyboard_enhanced {
            execute!(
                stdout(),
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )
            .wrap_err("failed to enable keyboard enhancement")?;
        }

        let reader = sender.clone();
        thread::spawn(move || {
            if let Err(e) = read_terminal(&reader) {
                log::error!("terminal reader stopped: {e:?}");
            }
        });

        Ok(Self {
            sender,
            receiver,
            keyboard_enhanced,
        })
    }

    pub fn keyboard_enhanced(&self) -> bool {
        self.keyboard_enhanced
    }

    /// Next queued event, or `None` if nothing arrives within `timeout`
    pub fn next_within(&self, timeout: Duration) -> color_eyre::Result<Option<Event>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(e) => Err(e).wrap_err("event queue closed"),
        }
    }

    /// Queue an app event
    pub fn send(&mut self, app_event: AppEvent) {
        let _ = self.sender.send(Event::App(app_event));
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
        }
    }
}

/// Keys and resizes matter to the app; everything else is dropped here
fn translate(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Resize(width, height) => {
            Some(Event::App(AppEvent::TerminalResize(width, height)))
        }
        _ => None,
    }
}

/// Forward terminal input until the receiving side goes away
fn read_terminal(sender: &mpsc::Sender<Event>) -> color_eyre::Result<()> {
    loop {
        let event = event::read().wrap_err("failed to read terminal event")?;
        if let Some(event) = translate(event) {
            if sender.send(event).is_err() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_translate_keeps_keys_and_resizes() {
        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);

        assert!(matches!(
            translate(CrosstermEvent::Key(key)),
            Some(Event::Key(k)) if k.code == KeyCode::Up
        ));
        assert!(matches!(
            translate(CrosstermEvent::Resize(80, 24)),
            Some(Event::App(AppEvent::TerminalResize(80, 24)))
        ));
        assert!(translate(CrosstermEvent::FocusGained).is_none());
    }
}
