//! TUI Runner - main event loop.
//!
//! The `TuiRunner` owns the terminal, app, and event handler. It runs the
//! main loop: apply finished fetches → render → handle events → repeat.

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views::render;
use crate::catalog::CatalogController;
use crate::config::Config;
use eyre::Result;
use log::info;

/// Main TUI runner that owns the event loop.
pub struct TuiRunner {
    terminal: Tui,
    app: App,
    event_handler: EventHandler,
}

impl TuiRunner {
    /// Create a runner sized to the terminal.
    pub fn new(terminal: Tui, controller: CatalogController, config: &Config) -> Result<Self> {
        let columns = terminal.size()?.width;
        Ok(Self {
            terminal,
            app: App::new(controller, config.layout.clone(), columns),
            event_handler: EventHandler::new(config.tui.tick_rate_ms),
        })
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Run the main TUI loop until quit.
    ///
    /// The controller is attached for the duration of the loop and detached
    /// on the way out, whether the loop ends cleanly or with an error.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting TUI main loop");
        self.app.start();
        let result = self.event_loop().await;
        self.app.stop();
        info!("TUI main loop ended");
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        loop {
            self.app.controller_mut().apply_pending();

            let app = &self.app;
            self.terminal.draw(|f| render(app, f))?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(columns, _) => self.app.handle_resize(columns),
                Event::Tick => {}
            }

            if self.app.should_quit {
                break;
            }
        }
        Ok(())
    }
}
