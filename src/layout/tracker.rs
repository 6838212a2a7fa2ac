//! Reactive items-per-row state driven by viewport resizes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use tokio::sync::watch;

use super::viewport::{ResizeListener, Viewport};
use super::{MIN_CARD_WIDTH, STACK_BELOW, col_span, derive_span_with, grid_col_span};

/// Publishes the number of cards that fit one row.
///
/// While active, the tracker holds a resize listener on its viewport and
/// republishes the span on every resize. The listener is released on
/// `deactivate`, on re-activation, and when the tracker is dropped.
#[derive(Debug)]
pub struct ResponsiveLayoutTracker {
    min_card_width: u32,
    stack_below: u32,
    width: Arc<AtomicU32>,
    span: Arc<watch::Sender<usize>>,
    listener: Option<ResizeListener>,
}

impl ResponsiveLayoutTracker {
    /// Create an inactive tracker.
    pub fn new(min_card_width: u32) -> Self {
        let (span, _) = watch::channel(1);
        Self {
            min_card_width,
            stack_below: STACK_BELOW,
            width: Arc::new(AtomicU32::new(0)),
            span: Arc::new(span),
            listener: None,
        }
    }

    /// Stack cards one per row below `stack_below` logical units.
    pub fn with_stack_below(mut self, stack_below: u32) -> Self {
        self.stack_below = stack_below;
        self
    }

    /// Compute the span from the viewport's current width and start
    /// following its resizes.
    pub fn activate(&mut self, viewport: &Viewport) {
        self.listener = None;

        let min_card_width = self.min_card_width;
        self.width.store(viewport.width(), Ordering::Relaxed);
        self.span.send_replace(derive_span_with(viewport.width(), min_card_width));

        let span = self.span.clone();
        let last_width = self.width.clone();
        self.listener = Some(viewport.on_resize(move |width| {
            last_width.store(width, Ordering::Relaxed);
            let next = derive_span_with(width, min_card_width);
            span.send_if_modified(|current| {
                if *current == next {
                    false
                } else {
                    *current = next;
                    true
                }
            });
        }));
        log::debug!("Layout tracker active at span {}", self.span());
    }

    /// Stop following resizes. The last published span is kept.
    pub fn deactivate(&mut self) {
        if self.listener.take().is_some() {
            log::debug!("Layout tracker deactivated");
        }
    }

    /// Whether a resize listener is currently held.
    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    /// Current cards-per-row value.
    pub fn span(&self) -> usize {
        *self.span.borrow()
    }

    /// Last width seen, in logical units.
    pub fn width(&self) -> u32 {
        self.width.load(Ordering::Relaxed)
    }

    /// Grid units per card for the current span.
    pub fn col_span(&self) -> usize {
        col_span(self.span())
    }

    /// Grid units per card as laid out: the full row on narrow viewports.
    pub fn grid_col_span(&self) -> usize {
        grid_col_span(self.width(), self.span(), self.stack_below)
    }

    /// Receiver that observes every published span.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.span.subscribe()
    }
}

impl Default for ResponsiveLayoutTracker {
    fn default() -> Self {
        Self::new(MIN_CARD_WIDTH)
    }
}
