//! Card and toggle widgets.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget, Wrap},
};

use super::colors;
use crate::catalog::{GridItem, ToggleProps};

/// Rows one card occupies, borders included
pub const CARD_HEIGHT: u16 = 7;

/// Description lines shown before clipping
const DESCRIPTION_LINES: u16 = 3;

/// A single tool card: name, clamped description, enable toggle.
pub struct ToolCard<'a> {
    item: &'a GridItem<'a>,
}

impl<'a> ToolCard<'a> {
    pub fn new(item: &'a GridItem<'a>) -> Self {
        Self { item }
    }
}

impl Widget for ToolCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.item.selected {
            Style::default().fg(colors::SELECTED)
        } else {
            Style::default().fg(colors::DIM)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(
                format!(" {} ", self.item.tool.name),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(DESCRIPTION_LINES),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        Paragraph::new(self.item.tool.description.as_str())
            .style(Style::default().fg(colors::MUTED))
            .wrap(Wrap { trim: true })
            .render(chunks[0], buf);

        ToggleSwitch::new(&self.item.toggle).render(chunks[2], buf);
    }
}

/// Label plus a two-state switch, right aligned.
pub struct ToggleSwitch<'a> {
    props: &'a ToggleProps,
}

impl<'a> ToggleSwitch<'a> {
    pub fn new(props: &'a ToggleProps) -> Self {
        Self { props }
    }

    /// The switch as a styled line.
    pub fn line(&self) -> Line<'static> {
        let (knob, color) = if self.props.checked {
            ("━━●", colors::TOGGLE_ON)
        } else {
            ("●━━", colors::TOGGLE_OFF)
        };
        Line::from(vec![
            Span::raw(format!("{} ", self.props.label)),
            Span::styled(format!("[{}]", knob), Style::default().fg(color)),
        ])
    }
}

impl Widget for ToggleSwitch<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).alignment(Alignment::Right).render(area, buf);
    }
}
