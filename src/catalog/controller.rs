//! Catalog controller - one fetch per activation, grid per frame
//!
//! The controller owns the catalog and the per-card toggle state. Network
//! completions never touch that state directly: the gateway callbacks post a
//! `CatalogUpdate` on a channel and the owner applies it with
//! `apply_pending`, so every mutation happens on the task that renders.

use chrono::{DateTime, Local};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::tool::{Catalog, Tool, parse_tools};
use crate::gateway::{RequestError, RequestGateway, RequestSpec};
use crate::layout::{ResponsiveLayoutTracker, Viewport, cards_per_row};

/// Gateway path serving the tool catalog
pub const LIST_TOOLS_PATH: &str = "/gateway_manager/list_tools/";

/// Label shown next to every card toggle
pub const TOGGLE_LABEL: &str = "Enable";

/// A completed catalog fetch, waiting to be applied.
#[derive(Debug)]
pub enum CatalogUpdate {
    Loaded(Value),
    Failed(RequestError),
}

/// Why the last fetch did not produce a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchError {
    pub message: String,
    pub status: Option<u16>,
    pub at: DateTime<Local>,
}

impl FetchError {
    fn now(message: impl Into<String>, status: Option<u16>) -> Self {
        Self {
            message: message.into(),
            status,
            at: Local::now(),
        }
    }
}

impl From<&RequestError> for FetchError {
    fn from(error: &RequestError) -> Self {
        FetchError::now(error.message(), error.status())
    }
}

/// Props for one card's enable toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleProps {
    pub id: String,
    pub checked: bool,
    pub label: &'static str,
}

/// One cell of the rendered grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridItem<'a> {
    /// Position in the catalog; cells are keyed by position, not by name
    pub key: usize,
    pub tool: &'a Tool,
    pub toggle: ToggleProps,
    pub selected: bool,
}

/// Everything needed to draw the catalog for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridModel<'a> {
    /// Grid units (out of 12) each card occupies
    pub col_span: usize,
    /// Cards placed on one row
    pub cards_per_row: usize,
    pub items: Vec<GridItem<'a>>,
}

/// Fetches the tool catalog and turns it into a grid.
#[derive(Debug)]
pub struct CatalogController {
    gateway: RequestGateway,
    list_path: String,
    tracker: ResponsiveLayoutTracker,
    catalog: Catalog,
    toggles: Vec<bool>,
    selected: usize,
    active: bool,
    in_flight: usize,
    last_error: Option<FetchError>,
    last_loaded: Option<DateTime<Local>>,
    updates_tx: mpsc::UnboundedSender<CatalogUpdate>,
    updates_rx: mpsc::UnboundedReceiver<CatalogUpdate>,
}

impl CatalogController {
    pub fn new(gateway: RequestGateway, tracker: ResponsiveLayoutTracker) -> Self {
        let (updates_tx, updates_rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            list_path: LIST_TOOLS_PATH.to_string(),
            tracker,
            catalog: Catalog::default(),
            toggles: Vec::new(),
            selected: 0,
            active: false,
            in_flight: 0,
            last_error: None,
            last_loaded: None,
            updates_tx,
            updates_rx,
        }
    }

    /// Fetch the catalog from a different gateway path.
    pub fn with_list_path(mut self, path: impl Into<String>) -> Self {
        self.list_path = path.into();
        self
    }

    /// Start following the viewport and fetch the catalog.
    ///
    /// Fetches once per activation: calling this again while active only
    /// re-attaches the layout tracker. Must run inside a tokio runtime.
    pub fn activate(&mut self, viewport: &Viewport) {
        self.tracker.activate(viewport);
        if !self.active {
            self.active = true;
            log::info!("Catalog controller activated, fetching {}", self.list_path);
            self.refresh();
        }
    }

    /// Release the resize listener. In-flight fetches still land.
    pub fn deactivate(&mut self) {
        self.tracker.deactivate();
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fire another catalog fetch.
    ///
    /// Fetches are not deduplicated; if several succeed, the last one applied
    /// wins.
    pub fn refresh(&mut self) -> JoinHandle<()> {
        self.in_flight += 1;
        let loaded = self.updates_tx.clone();
        let failed = self.updates_tx.clone();
        self.gateway.issue_with(
            RequestSpec::get(self.list_path.as_str()),
            Some(move |payload: Value| {
                let _ = loaded.send(CatalogUpdate::Loaded(payload));
            }),
            Some(move |error: RequestError| {
                let _ = failed.send(CatalogUpdate::Failed(error));
            }),
        )
    }

    /// Apply every update that has arrived. Returns how many were applied.
    pub fn apply_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply(update);
            applied += 1;
        }
        applied
    }

    /// Wait for the next update and apply it.
    pub async fn apply_next(&mut self) {
        if let Some(update) = self.updates_rx.recv().await {
            self.apply(update);
        }
    }

    /// Apply one completed fetch.
    pub fn apply(&mut self, update: CatalogUpdate) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match update {
            CatalogUpdate::Loaded(payload) => match parse_tools(&payload) {
                Ok(tools) => {
                    log::info!("Loaded {} tools", tools.len());
                    self.toggles = vec![true; tools.len()];
                    self.catalog = self.catalog.replaced(tools);
                    self.selected = self.selected.min(self.catalog.len().saturating_sub(1));
                    self.last_error = None;
                    self.last_loaded = Some(Local::now());
                }
                Err(error) => {
                    log::warn!("Ignoring catalog payload: {}", error);
                    self.last_error = Some(FetchError::now(error.to_string(), None));
                }
            },
            CatalogUpdate::Failed(error) => {
                log::warn!("Catalog fetch failed: {}", error);
                self.last_error = Some(FetchError::from(&error));
            }
        }
    }

    /// Build the grid for the current catalog and layout.
    pub fn grid(&self) -> GridModel<'_> {
        let col_span = self.tracker.grid_col_span();
        let items = self
            .catalog
            .tools()
            .iter()
            .enumerate()
            .map(|(key, tool)| GridItem {
                key,
                tool,
                toggle: ToggleProps {
                    id: tool.toggle_id(),
                    checked: self.is_enabled(key),
                    label: TOGGLE_LABEL,
                },
                selected: key == self.selected,
            })
            .collect();

        GridModel {
            col_span,
            cards_per_row: cards_per_row(col_span),
            items,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tracker(&self) -> &ResponsiveLayoutTracker {
        &self.tracker
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn last_loaded(&self) -> Option<DateTime<Local>> {
        self.last_loaded
    }

    /// Whether any fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Local toggle state for the card at `key`. Never sent to the gateway.
    pub fn is_enabled(&self, key: usize) -> bool {
        self.toggles.get(key).copied().unwrap_or(true)
    }

    /// Flip the toggle at `key`, returning the new value.
    pub fn toggle(&mut self, key: usize) -> Option<bool> {
        let checked = self.toggles.get_mut(key)?;
        *checked = !*checked;
        log::debug!("Toggle {} set to {}", key, checked);
        Some(*checked)
    }

    /// Flip the toggle of the selected card.
    pub fn toggle_selected(&mut self) -> Option<bool> {
        self.toggle(self.selected)
    }

    pub fn select_next(&mut self) {
        self.move_selection(1);
    }

    pub fn select_prev(&mut self) {
        self.move_selection(-1);
    }

    /// Move the selection one row down.
    pub fn select_down(&mut self) {
        let step = cards_per_row(self.tracker.grid_col_span());
        self.move_selection(step as isize);
    }

    /// Move the selection one row up.
    pub fn select_up(&mut self) {
        let step = cards_per_row(self.tracker.grid_col_span());
        self.move_selection(-(step as isize));
    }

    fn move_selection(&mut self, delta: isize) {
        if self.catalog.is_empty() {
            return;
        }
        let last = self.catalog.len() - 1;
        let target = self.selected as isize + delta;
        self.selected = target.clamp(0, last as isize) as usize;
    }
}
