//! Header widget rendering.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the application title and tagline.
pub fn render_header(area: Rect, buf: &mut Buffer) {
    let lines = vec![
        Line::from(Span::styled(
            "Telugu Movie Finder",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Search for Telugu movies released on a specific date or month",
            Style::default().fg(Color::Gray),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

    Widget::render(paragraph, area, buf);
}
