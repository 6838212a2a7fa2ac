//! TUI Views
//!
//! Draws the header, the card grid, the status line, and the help overlay.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::app::App;
use super::card::{CARD_HEIGHT, ToolCard};
use super::colors;
use crate::catalog::{CatalogController, GridItem, GridModel};
use crate::layout::GRID_COLUMNS;

/// Draw one frame.
pub fn render(app: &App, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let controller = app.controller();
    let grid = controller.grid();

    frame.render_widget(header(controller, &grid), chunks[0]);
    render_body(frame, chunks[1], controller, &grid);
    frame.render_widget(status_line(controller), chunks[2]);

    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn header(controller: &CatalogController, grid: &GridModel<'_>) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(" toolboard ", Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD)),
        Span::styled("│ ", Style::default().fg(colors::DIM)),
        Span::raw(format!("{} tools", controller.catalog().len())),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw(format!(
            "{} per row · {}/{} cols",
            grid.cards_per_row,
            grid.col_span,
            GRID_COLUMNS
        )),
    ]);
    Paragraph::new(line)
}

fn status_line(controller: &CatalogController) -> Paragraph<'static> {
    let hints = Span::styled(
        "  ←↓↑→ move · space toggle · r refresh · ? help · q quit",
        Style::default().fg(colors::KEYBIND),
    );

    let state = if let Some(error) = controller.last_error() {
        let text = match error.status {
            Some(status) => format!(" ✗ {} ({}) at {}", error.message, status, error.at.format("%H:%M:%S")),
            None => format!(" ✗ {} at {}", error.message, error.at.format("%H:%M:%S")),
        };
        Span::styled(text, Style::default().fg(colors::ERROR))
    } else if controller.is_loading() {
        Span::styled(" ● loading…", Style::default().fg(colors::PENDING))
    } else if let Some(at) = controller.last_loaded() {
        Span::styled(format!(" ✓ loaded at {}", at.format("%H:%M:%S")), Style::default().fg(colors::OK))
    } else {
        Span::styled(" ○ idle", Style::default().fg(colors::DIM))
    };

    Paragraph::new(Line::from(vec![state, hints]))
}

fn render_body(frame: &mut Frame, area: Rect, controller: &CatalogController, grid: &GridModel<'_>) {
    if grid.items.is_empty() {
        let message = if controller.is_loading() {
            "Loading tools…"
        } else if controller.last_error().is_some() {
            "Could not load tools. Press r to retry."
        } else {
            "No tools available"
        };
        let empty = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(Style::default().fg(colors::DIM))
            .block(Block::default().borders(Borders::NONE));
        frame.render_widget(empty, area);
        return;
    }

    let per_row = grid.cards_per_row.max(1);
    let rows: Vec<&[GridItem<'_>]> = grid.items.chunks(per_row).collect();
    let visible = usize::from((area.height / CARD_HEIGHT).max(1));
    let first = first_visible_row(controller.selected() / per_row, visible);

    for (offset, row) in rows.iter().skip(first).take(visible).enumerate() {
        let y = area.y + offset as u16 * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let row_area = Rect::new(area.x, y, area.width, height);
        let slots = row_slots(row_area, grid.col_span, per_row);
        for (item, slot) in row.iter().zip(slots.iter()) {
            frame.render_widget(ToolCard::new(item), *slot);
        }
    }
}

/// First grid row to draw so the selected row stays on screen.
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    selected_row.saturating_sub(visible_rows.saturating_sub(1))
}

/// Split a row into `per_row` card slots of `col_span` twelfths each; any
/// leftover grid units stay empty on the right.
fn row_slots(area: Rect, col_span: usize, per_row: usize) -> Vec<Rect> {
    let used = (col_span * per_row).min(GRID_COLUMNS);
    let mut constraints: Vec<Constraint> = (0..per_row)
        .map(|_| Constraint::Ratio(col_span as u32, GRID_COLUMNS as u32))
        .collect();
    if used < GRID_COLUMNS {
        constraints.push(Constraint::Ratio((GRID_COLUMNS - used) as u32, GRID_COLUMNS as u32));
    }

    let mut slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area)
        .to_vec();
    slots.truncate(per_row);
    slots
}

fn render_help(frame: &mut Frame, area: Rect) {
    let width = area.width.min(44);
    let height = area.height.min(11);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    let lines = vec![
        Line::from(" ← → / h l   previous / next card"),
        Line::from(" ↑ ↓ / k j   row up / down"),
        Line::from(" space enter toggle selected card"),
        Line::from(" r           fetch the catalog again"),
        Line::from(" ?           close this help"),
        Line::from(" q esc       quit"),
        Line::from(""),
        Line::from(Span::styled(
            " toggles are local and never sent",
            Style::default().fg(colors::DIM),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Keys ")),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogUpdate;
    use crate::config::LayoutConfig;
    use crate::gateway::{DEFAULT_TIMEOUT, RequestError, RequestGateway};
    use crate::layout::ResponsiveLayoutTracker;
    use ratatui::{Terminal, backend::TestBackend};
    use serde_json::json;

    fn app(columns: u16) -> App {
        let gateway = RequestGateway::from_origin("http://localhost:8000", DEFAULT_TIMEOUT).unwrap();
        let controller = CatalogController::new(gateway, ResponsiveLayoutTracker::default());
        App::new(controller, LayoutConfig::default(), columns)
    }

    fn draw(app: &App, columns: u16, rows: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(columns, rows)).unwrap();
        terminal.draw(|f| render(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_first_visible_row() {
        assert_eq!(first_visible_row(0, 3), 0);
        assert_eq!(first_visible_row(2, 3), 0);
        assert_eq!(first_visible_row(5, 3), 3);
        assert_eq!(first_visible_row(5, 0), 5);
    }

    #[test]
    fn test_row_slots_three_per_row() {
        let slots = row_slots(Rect::new(0, 0, 120, CARD_HEIGHT), 4, 3);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.iter().map(|s| s.width).sum::<u16>(), 120);
    }

    #[test]
    fn test_row_slots_leave_leftover_units_empty() {
        // span 5 gives col span 2: six slots of 2/12 each fill the row
        let slots = row_slots(Rect::new(0, 0, 120, CARD_HEIGHT), 2, 6);
        assert_eq!(slots.len(), 6);

        // col span 5 fits two cards and leaves 2/12 of the row empty
        let slots = row_slots(Rect::new(0, 0, 120, CARD_HEIGHT), 5, 2);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].width, 50);
    }

    #[test]
    fn test_empty_catalog_message() {
        let a = app(80);
        let text = draw(&a, 80, 20);
        assert!(text.contains("No tools available"));
        assert!(text.contains("0 tools"));
    }

    #[test]
    fn test_error_banner() {
        let mut a = app(80);
        a.controller_mut().apply(CatalogUpdate::Failed(RequestError::Status {
            status: 500,
            data: None,
            message: "Request failed with status code 500".to_string(),
        }));
        let text = draw(&a, 120, 20);
        assert!(text.contains("Could not load tools"));
        assert!(text.contains("Request failed with status code 500"));
    }

    #[test]
    fn test_cards_drawn_in_order() {
        let mut a = app(120);
        a.controller_mut().apply(CatalogUpdate::Loaded(json!([
            {"name": "alpha", "description": "d1"},
            {"name": "bravo", "description": "d2"},
        ])));
        let text = draw(&a, 120, 30);
        let first = text.find("alpha").unwrap();
        let second = text.find("bravo").unwrap();
        assert!(first < second);
        assert!(text.contains("2 tools"));
    }

    #[test]
    fn test_help_overlay() {
        let mut a = app(80);
        a.show_help = true;
        let text = draw(&a, 80, 24);
        assert!(text.contains("Keys"));
        assert!(text.contains("fetch the catalog again"));
    }
}
