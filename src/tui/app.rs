//! TUI Application
//!
//! Owns the catalog controller and the viewport, and turns key presses and
//! terminal resizes into controller calls.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::CatalogController;
use crate::config::LayoutConfig;
use crate::layout::Viewport;

/// Main TUI application
pub struct App {
    controller: CatalogController,
    viewport: Viewport,
    layout: LayoutConfig,
    /// Help overlay visible
    pub show_help: bool,
    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create an app for a terminal `columns` wide.
    pub fn new(controller: CatalogController, layout: LayoutConfig, columns: u16) -> Self {
        let viewport = Viewport::new(layout.width_for_columns(columns));
        Self {
            controller,
            viewport,
            layout,
            show_help: false,
            should_quit: false,
        }
    }

    /// Attach the controller: registers its resize listener and fetches.
    pub fn start(&mut self) {
        self.controller.activate(&self.viewport);
    }

    /// Detach the controller, releasing its resize listener.
    pub fn stop(&mut self) {
        self.controller.deactivate();
    }

    pub fn controller(&self) -> &CatalogController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut CatalogController {
        &mut self.controller
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Propagate a terminal resize to the viewport.
    pub fn handle_resize(&mut self, columns: u16) {
        self.viewport.resize(self.layout.width_for_columns(columns));
    }

    /// Handle a key press. Returns true if quit was requested.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return true;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return false;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('r') => {
                self.controller.refresh();
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.controller.toggle_selected();
            }
            KeyCode::Left | KeyCode::Char('h') => self.controller.select_prev(),
            KeyCode::Right | KeyCode::Char('l') => self.controller.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.controller.select_up(),
            KeyCode::Down | KeyCode::Char('j') => self.controller.select_down(),
            _ => {}
        }

        self.should_quit
    }
}
