//! Search results rendering.
//!
//! Turns a [`SearchResult`] into a heading plus a movie table, either as a
//! ratatui widget or as a plain-text grid for the command-line mode.

use crate::movies::{Movie, SearchResult};
use comfy_table::{ColumnConstraint, ContentArrangement, Width, presets::ASCII_FULL};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget, Wrap},
};

/// Heading used when nothing matched.
pub const NO_MOVIES_HEADING: &str = "No Movies Found";

/// Explanation lines under the empty heading.
pub const NO_MOVIES_HINT: [&str; 2] = [
    "No Telugu movies were found for the selected date or month.",
    "Try selecting a different date.",
];

const COLUMN_TITLES: [&str; 3] = ["Title", "Release Date", "Summary"];

/// Column width cap for summaries in plain-text output.
const PLAIN_SUMMARY_WIDTH: u16 = 80;

/// What the results area should say above the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Heading {
    /// No movies in the payload
    NoMovies,
    /// Movies released on the exact requested date
    ExactDate {
        /// Matched date label
        formatted_date: String,
    },
    /// No exact match; movies from the containing month are listed
    MonthFallback {
        /// Label of what was requested
        formatted_date: String,
        /// Month token shown in the heading
        month: String,
    },
}

impl Heading {
    /// Heading for a search result.
    pub fn for_result(result: &SearchResult) -> Self {
        if result.movies.is_empty() {
            Heading::NoMovies
        } else if result.found_exact_date {
            Heading::ExactDate {
                formatted_date: result.formatted_date.clone(),
            }
        } else {
            Heading::MonthFallback {
                formatted_date: result.formatted_date.clone(),
                month: month_token(&result.formatted_date).to_string(),
            }
        }
    }

    /// Heading text.
    pub fn text(&self) -> String {
        match self {
            Heading::NoMovies => NO_MOVIES_HEADING.to_string(),
            Heading::ExactDate { formatted_date } => {
                format!("Telugu Movies Released on {}", formatted_date)
            }
            Heading::MonthFallback {
                formatted_date,
                month,
            } => format!(
                "No movies found for {}. Showing movies released in {}",
                formatted_date, month
            ),
        }
    }
}

/// First token of a date label, split on whitespace or `/`.
///
/// "July 15, 2023" gives "July"; "07/2023" gives "07".
pub fn month_token(formatted_date: &str) -> &str {
    formatted_date
        .split(|c: char| c.is_whitespace() || c == '/')
        .find(|token| !token.is_empty())
        .unwrap_or("")
}

/// Everything needed to draw one set of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsModel<'a> {
    /// Label of the date the user searched (titles the block)
    pub display_date: &'a str,
    /// Heading above the table
    pub heading: Heading,
    /// Movies in service order; empty for the no-results branch
    pub movies: &'a [Movie],
}

impl<'a> ResultsModel<'a> {
    /// Build the model for a result and the searched date label.
    pub fn new(result: &'a SearchResult, display_date: &'a str) -> Self {
        Self {
            display_date,
            heading: Heading::for_result(result),
            movies: &result.movies,
        }
    }

    /// True when the "no movies" message should be shown instead of a table.
    pub fn is_empty(&self) -> bool {
        self.heading == Heading::NoMovies
    }

    fn block_title(&self) -> String {
        if self.display_date.is_empty() {
            "Results".to_string()
        } else {
            format!("Results for {}", self.display_date)
        }
    }
}

/// Render the results widget.
///
/// # Arguments
/// * `model` - Results to draw
/// * `state` - Table selection (row offset is kept up to date by ratatui)
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Rows grow to fit the wrapped cells so nothing is cut off. Cells wrap by
/// display width, so Telugu-script titles fit their column. Titles with a
/// link are drawn underlined in blue.
pub fn render_results(model: &ResultsModel, state: &mut TableState, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(model.block_title())
        .borders(Borders::ALL);
    let inner = block.inner(area);
    Widget::render(block, area, buf);

    let heading_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    if model.is_empty() {
        let mut lines = vec![Line::from(Span::styled(model.heading.text(), heading_style)), Line::from("")];
        lines.extend(
            NO_MOVIES_HINT
                .iter()
                .map(|hint| Line::from(Span::styled(*hint, Style::default().fg(Color::Gray)))),
        );
        Widget::render(Paragraph::new(lines).wrap(Wrap { trim: true }), inner, buf);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let heading = Paragraph::new(Line::from(Span::styled(model.heading.text(), heading_style)))
        .wrap(Wrap { trim: true });
    Widget::render(heading, chunks[0], buf);

    let title_width = (inner.width as usize * 3 / 10).max(12);
    let date_width = 20usize;
    let summary_width = (inner.width as usize)
        .saturating_sub(title_width + date_width + 2)
        .max(10);

    let header = Row::new(COLUMN_TITLES.map(|t| {
        Cell::from(t).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    }));

    let rows: Vec<Row> = model
        .movies
        .iter()
        .map(|movie| {
            let title_style = if movie.url.is_some() {
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::White)
            };
            let title_lines: Vec<Line> = wrap_text(&movie.title, title_width)
                .into_iter()
                .map(|l| Line::from(Span::styled(l, title_style)))
                .collect();
            let date_lines: Vec<Line> = wrap_text(&movie.release_date, date_width)
                .into_iter()
                .map(Line::from)
                .collect();
            let summary_lines: Vec<Line> = wrap_text(&movie.summary, summary_width)
                .into_iter()
                .map(Line::from)
                .collect();

            let height = title_lines
                .len()
                .max(date_lines.len())
                .max(summary_lines.len())
                .max(1);

            Row::new(vec![
                Cell::from(Text::from(title_lines)),
                Cell::from(Text::from(date_lines)),
                Cell::from(Text::from(summary_lines)),
            ])
            .height(height as u16)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(title_width as u16),
            Constraint::Length(date_width as u16),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    StatefulWidget::render(table, chunks[1], buf, state);
}

/// Render results as a plain-text grid table.
///
/// # Details
/// Long summaries wrap at 80 columns. Linked titles carry their URL on the
/// following line of the title cell.
pub fn render_plain(model: &ResultsModel) -> String {
    let mut out = format!("{}\n{}\n", model.block_title(), model.heading.text());

    if model.is_empty() {
        for hint in NO_MOVIES_HINT {
            out.push_str(hint);
            out.push('\n');
        }
        return out;
    }

    let mut table = comfy_table::Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(COLUMN_TITLES.map(comfy_table::Cell::new));

    for movie in model.movies {
        let title = match &movie.url {
            Some(url) => format!("{}\n{}", movie.title, url),
            None => movie.title.clone(),
        };
        table.add_row(vec![
            comfy_table::Cell::new(title),
            comfy_table::Cell::new(&movie.release_date),
            comfy_table::Cell::new(&movie.summary),
        ]);
    }

    if let Some(summary) = table.column_mut(2) {
        summary.set_constraint(ColumnConstraint::UpperBoundary(Width::Fixed(
            PLAIN_SUMMARY_WIDTH,
        )));
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

/// Display width of a string as the terminal draws it.
fn display_width(text: &str) -> usize {
    Span::raw(text).width()
}

/// Greedy word wrap by display width. Words wider than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = display_width(word);
        if word_width > width {
            if current_width > 0 {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }
            let mut utf8 = [0u8; 4];
            for ch in word.chars() {
                let ch_width = display_width(ch.encode_utf8(&mut utf8));
                if current_width > 0 && current_width + ch_width > width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += ch_width;
            }
            continue;
        }

        if current_width > 0 && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if current_width > 0 {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if current_width > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(found_exact_date: bool, formatted_date: &str, movies: Vec<Movie>) -> SearchResult {
        SearchResult {
            date: None,
            formatted_date: formatted_date.to_string(),
            found_exact_date,
            movies,
        }
    }

    fn two_movies() -> Vec<Movie> {
        vec![
            Movie::new("Sankarabharanam", "February 02, 1980", "A classical music drama.")
                .with_url("https://en.wikipedia.org/wiki/Sankarabharanam_(1980_film)"),
            Movie::new("Maa Bhoomi", "July 27, 1980", ""),
        ]
    }

    fn buffer_lines(buf: &Buffer) -> Vec<String> {
        let width = buf.area.width as usize;
        buf.content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_empty_movies_always_no_results() {
        for exact in [true, false] {
            let r = result(exact, "07/15/2023", Vec::new());
            let model = ResultsModel::new(&r, "07/15/2023");
            assert!(model.is_empty());
            assert_eq!(model.heading, Heading::NoMovies);
            assert_eq!(model.heading.text(), "No Movies Found");
        }
    }

    #[test]
    fn test_exact_date_heading() {
        let r = result(true, "07/15/2023", two_movies());
        assert_eq!(
            Heading::for_result(&r).text(),
            "Telugu Movies Released on 07/15/2023"
        );
    }

    #[test]
    fn test_month_fallback_heading() {
        let r = result(false, "07/2023", two_movies());
        assert_eq!(
            Heading::for_result(&r).text(),
            "No movies found for 07/2023. Showing movies released in 07"
        );

        let r = result(false, "July 15, 2023", two_movies());
        assert_eq!(
            Heading::for_result(&r).text(),
            "No movies found for July 15, 2023. Showing movies released in July"
        );
    }

    #[test]
    fn test_month_token() {
        assert_eq!(month_token("July 15, 2023"), "July");
        assert_eq!(month_token("07/2023"), "07");
        assert_eq!(month_token("  March"), "March");
        assert_eq!(month_token(""), "");
    }

    #[test]
    fn test_model_keeps_service_order() {
        let r = result(true, "07/15/2023", two_movies());
        let model = ResultsModel::new(&r, "07/15/2023");
        let titles: Vec<&str> = model.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Sankarabharanam", "Maa Bhoomi"]);
    }

    fn grid_lines(text: &str) -> Vec<&str> {
        text.lines()
            .filter(|l| l.starts_with('+') || l.starts_with('|'))
            .collect()
    }

    #[test]
    fn test_render_plain_table() {
        let r = result(false, "July 15, 1980", two_movies());
        let model = ResultsModel::new(&r, "07/15/1980");
        let text = render_plain(&model);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Results for 07/15/1980");
        assert_eq!(
            lines[1],
            "No movies found for July 15, 1980. Showing movies released in July"
        );
        assert!(lines[3].starts_with("+-"));
        assert!(lines[4].starts_with("| Title "));
        assert!(lines[4].contains("| Release Date "));
        assert!(lines[5].starts_with("+="));
        assert!(lines[6].starts_with("| Sankarabharanam "));
        assert!(lines[7].contains("https://en.wikipedia.org/wiki/Sankarabharanam_(1980_film)"));
        assert!(text.contains("| Maa Bhoomi "));
        assert!(text.contains("A classical music drama."));

        let grid = grid_lines(&text);
        let first = grid[0].len();
        assert!(grid.iter().all(|l| l.len() == first));
    }

    #[test]
    fn test_render_plain_aligns_telugu_titles() {
        let movies = vec![
            Movie::new("బాహుబలి", "July 10, 2015", "An epic about two brothers.")
                .with_url("https://te.wikipedia.org/wiki/బాహుబలి"),
            Movie::new("Srimanthudu", "August 07, 2015", "A rich heir adopts a village."),
        ];
        let r = result(false, "July 2015", movies);
        let text = render_plain(&ResultsModel::new(&r, "07/15/2015"));

        assert!(text.contains("బాహుబలి"));
        let grid = grid_lines(&text);
        assert!(grid.len() >= 7);
        let widths: Vec<usize> = grid.iter().map(|l| display_width(l)).collect();
        assert!(
            widths.iter().all(|w| *w == widths[0]),
            "grid rows differ in display width: {:?}",
            widths
        );
    }

    #[test]
    fn test_render_plain_wraps_long_summary() {
        let summary = "A village musician keeps an old tradition alive. ".repeat(8);
        let movies = vec![Movie::new("Swathi Muthyam", "March 13, 1986", summary.trim())];
        let r = result(true, "03/13/1986", movies);
        let text = render_plain(&ResultsModel::new(&r, "03/13/1986"));

        let grid = grid_lines(&text);
        let content_rows = grid.iter().filter(|l| l.starts_with('|')).count();
        // Header plus a summary spread over several lines.
        assert!(content_rows >= 4);
        assert!(grid.iter().all(|l| display_width(l) < 130));
    }

    #[test]
    fn test_render_plain_no_results() {
        let r = result(true, "07/15/2023", Vec::new());
        let text = render_plain(&ResultsModel::new(&r, "07/15/2023"));
        assert!(text.contains("No Movies Found"));
        assert!(text.contains("Try selecting a different date."));
        assert!(!text.contains('+'));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a abcdefgh", 4), vec!["a", "abcd", "efgh"]);
    }

    #[test]
    fn test_wrap_text_measures_display_width() {
        let title = "మాయాబజార్ శంకరాభరణం బాహుబలి";
        let lines = wrap_text(title, 8);
        assert!(lines.iter().all(|l| display_width(l) <= 8));
        let words: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        assert_eq!(words.concat(), title.split_whitespace().collect::<String>());

        let wide = wrap_text("日本語の映画", 4);
        assert!(wide.iter().all(|l| display_width(l) <= 4));
        assert_eq!(wide.concat(), "日本語の映画");
    }

    #[test]
    fn test_render_results_widget() {
        let r = result(true, "07/15/2023", two_movies());
        let model = ResultsModel::new(&r, "07/15/2023");
        let area = Rect::new(0, 0, 100, 12);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default().with_selected(Some(0));

        render_results(&model, &mut state, area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[0].contains("Results for 07/15/2023"));
        assert!(lines.iter().any(|l| l.contains("Telugu Movies Released on 07/15/2023")));
        assert!(lines.iter().any(|l| l.contains("Release Date")));
        assert!(lines.iter().any(|l| l.contains("Sankarabharanam")));
        assert!(lines.iter().any(|l| l.contains("Maa Bhoomi")));
    }

    #[test]
    fn test_render_results_widget_no_movies() {
        let r = result(false, "07/2023", Vec::new());
        let model = ResultsModel::new(&r, "07/15/2023");
        let area = Rect::new(0, 0, 80, 8);
        let mut buf = Buffer::empty(area);
        let mut state = TableState::default();

        render_results(&model, &mut state, area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines.iter().any(|l| l.contains("No Movies Found")));
        assert!(lines.iter().any(|l| l.contains("Try selecting a different date.")));
    }
}
