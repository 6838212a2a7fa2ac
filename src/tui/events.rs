//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, tick, resize)
//! - `EventHandler`: Async event stream from the terminal with a tick timer

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use eyre::Result;
use std::time::Duration;

/// Unified event type for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Periodic tick; applies finished fetches and redraws
    Tick,
    /// Terminal resized to (columns, rows)
    Resize(u16, u16),
}

impl Event {
    /// Map a raw terminal event. Key releases and mouse/focus/paste events
    /// collapse into a tick.
    pub fn from_terminal(raw: CrosstermEvent) -> Self {
        match raw {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
            CrosstermEvent::Resize(columns, rows) => Event::Resize(columns, rows),
            _ => Event::Tick,
        }
    }
}

/// Polls the terminal for events, yielding a tick when nothing arrives
/// within the tick interval.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Wait for the next event without blocking the runtime.
    pub async fn next(&self) -> Result<Event> {
        let tick_rate = self.tick_rate;

        let event = tokio::task::spawn_blocking(move || -> Result<Event> {
            if event::poll(tick_rate)? {
                Ok(Event::from_terminal(event::read()?))
            } else {
                Ok(Event::Tick)
            }
        })
        .await??;

        Ok(event)
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(250)
    }
}
