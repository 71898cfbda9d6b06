//! Date picker widget rendering.
//!
//! Displays a month calendar around the cursor, the picked date, inline
//! errors and the search button.

use crate::app::App;
use crate::date::{days_in_month, format_query_date, month_label};
use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

const WEEKDAY_HEADER: &str = "Su Mo Tu We Th Fr Sa";

/// Render the date picker widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Highlights the cursor, the picked date and today. Days after today are
/// dimmed since they cannot be picked.
pub fn render_picker(app: &App, area: Rect, buf: &mut Buffer) {
    let picked = app.view.selected_date();
    let mut lines = vec![
        Line::from(Span::styled(
            format!("{:^20}", month_label(app.cursor)),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(WEEKDAY_HEADER, Style::default().fg(Color::Cyan))),
    ];
    lines.extend(calendar_lines(app.cursor, picked, app.today));
    lines.push(Line::from(""));

    let picked_line = match picked {
        Some(date) => Line::from(vec![
            Span::styled("Selected: ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format_query_date(date),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]),
        None => Line::from(Span::styled(
            "Select a date (MM/DD/YYYY)",
            Style::default().fg(Color::Gray),
        )),
    };
    lines.push(picked_line);

    if let Some(error) = app.view.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let loading = app.view.is_loading();
    let button_enabled = picked.is_some() && !loading;
    lines.push(Line::from(Span::styled(
        if loading {
            "[ Searching... ]"
        } else {
            "[ Search Movies ]"
        },
        if button_enabled {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        },
    )));

    // No trimming: the first calendar row is indented with spaces
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Select a Date")
                .borders(Borders::ALL),
        );

    Widget::render(paragraph, area, buf);
}

/// Calendar rows for the cursor's month.
fn calendar_lines(
    cursor: NaiveDate,
    picked: Option<NaiveDate>,
    today: NaiveDate,
) -> Vec<Line<'static>> {
    let (year, month) = (cursor.year(), cursor.month());
    let first = match NaiveDate::from_ymd_opt(year, month, 1) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let total_days = days_in_month(year, month);
    let lead = first.weekday().num_days_from_sunday();

    let mut lines = Vec::new();
    let mut spans = Vec::new();
    for _ in 0..lead {
        spans.push(Span::raw("   "));
    }

    for day in 1..=total_days {
        let date = first.with_day(day).unwrap_or(first);
        spans.push(Span::styled(format!("{:2}", day), day_style(date, cursor, picked, today)));
        spans.push(Span::raw(" "));

        if (lead + day) % 7 == 0 {
            lines.push(Line::from(std::mem::take(&mut spans)));
        }
    }
    if !spans.is_empty() {
        lines.push(Line::from(spans));
    }
    lines
}

fn day_style(date: NaiveDate, cursor: NaiveDate, picked: Option<NaiveDate>, today: NaiveDate) -> Style {
    let mut style = if date > today {
        Style::default().fg(Color::DarkGray)
    } else if picked == Some(date) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    if date == today {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if date == cursor {
        style = style.bg(Color::Blue).fg(Color::Yellow).add_modifier(Modifier::BOLD);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_calendar_layout_july_2023() {
        // July 1, 2023 was a Saturday
        let lines = calendar_lines(ymd(2023, 7, 15), None, ymd(2023, 7, 15));
        assert_eq!(lines.len(), 6);
        assert_eq!(line_text(&lines[0]), "                   1 ");
        assert_eq!(line_text(&lines[1]), " 2  3  4  5  6  7  8 ");
        assert_eq!(line_text(&lines[5]), "30 31 ");
    }

    #[test]
    fn test_calendar_layout_starting_sunday() {
        // October 1, 2023 was a Sunday
        let lines = calendar_lines(ymd(2023, 10, 1), None, ymd(2023, 10, 31));
        assert_eq!(line_text(&lines[0]), " 1  2  3  4  5  6  7 ");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_day_styles() {
        let today = ymd(2023, 7, 15);
        let future = day_style(ymd(2023, 7, 20), ymd(2023, 7, 1), None, today);
        assert_eq!(future.fg, Some(Color::DarkGray));

        let picked = day_style(ymd(2023, 7, 3), ymd(2023, 7, 1), Some(ymd(2023, 7, 3)), today);
        assert_eq!(picked.fg, Some(Color::Green));

        let cursor = day_style(ymd(2023, 7, 1), ymd(2023, 7, 1), None, today);
        assert_eq!(cursor.bg, Some(Color::Blue));
    }
}
