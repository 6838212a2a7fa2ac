//! Terminal User Interface for Toolboard.
//!
//! A single dashboard view: the tool catalog laid out as a grid of cards
//! whose width follows the terminal width.

mod app;
mod card;
mod events;
mod runner;
mod views;

pub use app::App;
pub use card::{CARD_HEIGHT, ToggleSwitch, ToolCard};
pub use events::{Event, EventHandler};
pub use runner::TuiRunner;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use eyre::Result;
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initialize the terminal for TUI mode.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

pub mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED: Color = Color::Rgb(13, 110, 253); // Bootstrap primary
    pub const TOGGLE_ON: Color = Color::Rgb(13, 110, 253);
    pub const TOGGLE_OFF: Color = Color::Rgb(204, 204, 204);
    pub const OK: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const PENDING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const MUTED: Color = Color::Gray;
    pub const DIM: Color = Color::DarkGray;
}
