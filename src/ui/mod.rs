//! UI components module.
//!
//! Contains ratatui widgets for displaying the application interface.

pub mod header;
pub mod picker;
pub mod results;

pub use header::render_header;
pub use picker::render_picker;
pub use results::{ResultsModel, render_plain, render_results};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the in-progress message shown while a search runs.
pub fn render_loading(area: Rect, buf: &mut Buffer) {
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled("Searching for movies...", Style::default().fg(Color::Yellow))),
        Line::from(Span::styled("This may take a moment.", Style::default().fg(Color::Gray))),
    ])
    .block(Block::default().title("Results").borders(Borders::ALL));

    Widget::render(paragraph, area, buf);
}
