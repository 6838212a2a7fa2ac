//! Responsive layout - viewport width to grid geometry
//!
//! This module provides:
//! - `derive_span`: cards that fit one row for a given width
//! - `col_span`: width of one card in a 12-unit grid
//! - `grid_col_span`: `col_span`, except full width on narrow viewports
//! - `Viewport`: current width plus scoped resize listeners
//! - `ResponsiveLayoutTracker`: publishes the span as it changes

pub mod tracker;
pub mod viewport;

pub use tracker::ResponsiveLayoutTracker;
pub use viewport::{ResizeListener, Viewport};

/// Narrowest a card may be, in logical units
pub const MIN_CARD_WIDTH: u32 = 350;

/// Units in one grid row
pub const GRID_COLUMNS: usize = 12;

/// Below this width, in logical units, every card takes the whole row
pub const STACK_BELOW: u32 = 768;

/// Cards per row for `width` with the default minimum card width.
pub fn derive_span(width: u32) -> usize {
    derive_span_with(width, MIN_CARD_WIDTH)
}

/// Cards per row for `width`: `floor(width / min_card_width)`, at least 1.
///
/// No upper bound is applied here; `col_span` copes with spans past 12.
pub fn derive_span_with(width: u32, min_card_width: u32) -> usize {
    ((width / min_card_width.max(1)) as usize).max(1)
}

/// Grid units one card occupies for a given span.
///
/// Spans wider than the grid would floor to 0; the result is clamped to 1 so
/// every card keeps an explicit width.
pub fn col_span(span: usize) -> usize {
    (GRID_COLUMNS / span.max(1)).max(1)
}

/// Grid units one card occupies at `width`.
///
/// Viewports narrower than `stack_below` stack cards one per row whatever
/// the span; a `stack_below` of 0 never stacks.
pub fn grid_col_span(width: u32, span: usize, stack_below: u32) -> usize {
    if width < stack_below { GRID_COLUMNS } else { col_span(span) }
}

/// Cards that fit on one grid row at the given column span.
pub fn cards_per_row(col_span: usize) -> usize {
    (GRID_COLUMNS / col_span.max(1)).max(1)
}
