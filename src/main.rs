//! Telugu Movie Finder - Terminal User Interface for finding Telugu movies by release date.
//!
//! Main entry point and event loop for the application.

mod app;
mod browser;
mod config;
mod date;
mod logging;
mod movies;
mod ui;
mod view;

use anyhow::Context;
use app::App;
use chrono::Local;
use clap::Parser;
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use movies::MovieClient;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use ui::ResultsModel;
use view::Phase;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "telugu-movie-finder", version, about = "Find Telugu movies released on a date")]
struct Args {
    /// Path to the config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the search service base URL
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Search once for this date and print a table instead of starting the TUI
    #[arg(long, value_name = "MM/DD/YYYY")]
    date: Option<String>,

    /// Write the effective configuration to the config file and exit
    #[arg(long)]
    init_config: bool,
}

/// What a key press asks the event loop to do.
enum Flow {
    Continue,
    Quit,
}

/// Main application entry point.
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Loads configuration, then either runs a single search (`--date`) or
/// initializes the terminal and runs the event loop.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.api_base_url = base_url;
    }

    if args.init_config {
        let path = match args.config.clone() {
            Some(path) => path,
            None => Config::default_config_path()?,
        };
        config.save(Some(&path))?;
        println!("Wrote configuration to {}", path.display());
        return Ok(());
    }

    let client = MovieClient::new(&config)?;

    if let Some(input) = args.date.as_deref() {
        logging::init_stderr(&config.log_level)?;
        return run_once(&client, input).await;
    }

    let log_path = config.log_file_path()?;
    logging::init_file(&log_path, &config.log_level)?;
    tracing::info!(base_url = client.base_url(), "starting movie finder");

    let mut app = App::new(Local::now().date_naive());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(task) = app.search_task.take() {
        task.handle.abort();
    }
    tracing::info!("exiting movie finder");

    result
}

/// Search once and print the results table to stdout.
///
/// # Arguments
/// * `client` - Search client
/// * `input` - Date in `MM/DD/YYYY` form
///
/// # Returns
/// * `Result<()>` - Success or error (search failures carry the display message)
async fn run_once(client: &MovieClient, input: &str) -> anyhow::Result<()> {
    let date = date::parse_query_date(input)?;
    let today = Local::now().date_naive();
    if date > today {
        return Err(anyhow::anyhow!(
            "Date {} is in the future. Pick a date on or before {}.",
            date::format_query_date(date),
            date::format_query_date(today)
        ));
    }

    let result = client.search_by_date(date).await?;
    let label = date::format_query_date(date);
    print!("{}", ui::render_plain(&ResultsModel::new(&result, &label)));
    Ok(())
}

/// Render the complete UI.
///
/// # Arguments
/// * `f` - Frame to render to
/// * `app` - Application state
///
/// # Details
/// Lays out the header, date picker, results area, and status bar.
fn render_ui(f: &mut ratatui::Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Min(0),    // Picker + results
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(34), Constraint::Min(0)])
        .split(rows[1]);

    ui::render_header(rows[0], f.buffer_mut());
    ui::render_picker(app, body[0], f.buffer_mut());

    let placeholder = match app.view.phase() {
        Phase::Searching => {
            ui::render_loading(body[1], f.buffer_mut());
            None
        }
        Phase::Resulted if app.view.search_performed() => {
            let label = app.display_date_label();
            if let Some(result) = app.view.result() {
                let model = ResultsModel::new(result, &label);
                ui::render_results(&model, &mut app.results_state, body[1], f.buffer_mut());
            }
            None
        }
        Phase::Failed => Some("The search failed. Press Enter to try again or pick another date."),
        Phase::Idle | Phase::DateSelected | Phase::Resulted => {
            Some("Pick a date with Space, then press Enter to search.")
        }
    };
    if let Some(text) = placeholder {
        let paragraph = Paragraph::new(Line::from(text))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().title("Results").borders(Borders::ALL));
        f.render_widget(paragraph, body[1]);
    }

    let status_text = app.status_message.as_deref().unwrap_or(
        "Arrows: move  PgUp/PgDn: month  </>: year  t: today  Space: pick  Enter: search  j/k: rows  o: open link  q: quit",
    );
    let status = Paragraph::new(Line::from(status_text))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, rows[2]);
}

/// Main event loop.
///
/// # Arguments
/// * `terminal` - Terminal instance
/// * `app` - Application state
/// * `client` - Search client
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Redraws, collects finished searches, and handles keyboard events. Polling
/// with a timeout keeps the loading indicator live while a search runs.
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &MovieClient,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if app.poll_search().await {
            continue;
        }

        if event::poll(Duration::from_millis(100)).context("Failed to poll terminal events")? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Flow::Quit = handle_key(key, app, client) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Apply one key press to the application state.
fn handle_key(key: KeyEvent, app: &mut App, client: &MovieClient) -> Flow {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Flow::Quit,
        KeyCode::Left => app.move_cursor_days(-1),
        KeyCode::Right => app.move_cursor_days(1),
        KeyCode::Up => app.move_cursor_days(-7),
        KeyCode::Down => app.move_cursor_days(7),
        KeyCode::PageUp => app.move_cursor_months(-1),
        KeyCode::PageDown => app.move_cursor_months(1),
        KeyCode::Char('<') => app.move_cursor_years(-1),
        KeyCode::Char('>') => app.move_cursor_years(1),
        KeyCode::Char('t') => app.cursor_to_today(),
        KeyCode::Char(' ') => app.pick_cursor_date(),
        KeyCode::Enter | KeyCode::Char('s') => {
            app.submit(client);
        }
        KeyCode::Char('j') => app.move_down(),
        KeyCode::Char('k') => app.move_up(),
        KeyCode::Char('o') => open_selected_link(app),
        _ => {}
    }
    Flow::Continue
}

/// Open the highlighted movie's page, reporting the outcome on the status bar.
fn open_selected_link(app: &mut App) {
    let Some(movie) = app.selected_movie() else {
        return;
    };
    let title = movie.title.clone();
    let Some(url) = movie.url.clone() else {
        app.set_status(format!("No link for {}", title));
        return;
    };

    match browser::open_url(&url) {
        Ok(()) => app.set_status(format!("Opened: {}", title)),
        Err(e) => {
            tracing::warn!(error = %e, "failed to open link");
            app.set_status(format!("Failed to open link: {}", e));
        }
    }
}
