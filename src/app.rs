//! Application state management.
//!
//! Wraps the search view with terminal concerns: the calendar cursor,
//! results selection, status line and the running search task.

use crate::date::{clamp_to, format_query_date, shift_days, shift_months};
use crate::movies::{Movie, MovieClient, SearchError, SearchResult};
use crate::view::{RequestId, SearchView};
use chrono::NaiveDate;
use ratatui::widgets::TableState;
use tokio::task::JoinHandle;

/// A search running on the tokio runtime.
#[derive(Debug)]
pub struct SearchTask {
    /// Request this task answers
    pub id: RequestId,
    /// Handle of the spawned search
    pub handle: JoinHandle<Result<SearchResult, SearchError>>,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Date search state machine
    pub view: SearchView,
    /// Calendar cursor (not yet picked until the user confirms)
    pub cursor: NaiveDate,
    /// Latest date the picker allows
    pub today: NaiveDate,
    /// Selection within the results table
    pub results_state: TableState,
    /// Status message to display
    pub status_message: Option<String>,
    /// Pending search task handle (for non-blocking search)
    pub search_task: Option<SearchTask>,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `today` - Current local date; the cursor starts here and never passes it
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view: SearchView::new(),
            cursor: today,
            today,
            results_state: TableState::default(),
            status_message: None,
            search_task: None,
        }
    }

    /// Move the calendar cursor by days (negative moves back).
    pub fn move_cursor_days(&mut self, delta: i64) {
        self.cursor = clamp_to(shift_days(self.cursor, delta), self.today);
    }

    /// Move the calendar cursor by months (negative moves back).
    pub fn move_cursor_months(&mut self, delta: i32) {
        self.cursor = clamp_to(shift_months(self.cursor, delta), self.today);
    }

    /// Move the calendar cursor by years (negative moves back).
    pub fn move_cursor_years(&mut self, delta: i32) {
        self.move_cursor_months(delta.saturating_mul(12));
    }

    /// Jump the cursor back to today.
    pub fn cursor_to_today(&mut self) {
        self.cursor = self.today;
    }

    /// Pick the date under the cursor.
    ///
    /// # Details
    /// Aborts any running search; its outcome would be discarded anyway.
    pub fn pick_cursor_date(&mut self) {
        self.pick_date(self.cursor);
    }

    /// Pick a specific date (also moves the cursor there).
    pub fn pick_date(&mut self, date: NaiveDate) {
        let date = clamp_to(date, self.today);
        self.cursor = date;
        if let Some(task) = self.search_task.take() {
            tracing::debug!(
                request = task.id.get(),
                current = ?self.view.in_flight().map(|id| id.get()),
                "aborting superseded search"
            );
            task.handle.abort();
        }
        self.view.select_date(date);
        self.results_state = TableState::default();
        self.set_status(format!("Selected {}", format_query_date(date)));
    }

    /// Submit the search and spawn it on the runtime.
    ///
    /// # Arguments
    /// * `client` - Search client (cloned into the task)
    ///
    /// # Returns
    /// * `bool` - True if a search was started
    ///
    /// # Details
    /// Must be called from within a tokio runtime. The loading flag is set
    /// before the task is spawned, so the next draw shows the spinner text.
    pub fn submit(&mut self, client: &MovieClient) -> bool {
        let request = match self.view.submit() {
            Some(request) => request,
            None => return false,
        };

        tracing::debug!(request = request.id.get(), date = %request.date, "dispatching search");
        let client = client.clone();
        let handle = tokio::spawn(async move { client.search_by_date(request.date).await });
        self.search_task = Some(SearchTask {
            id: request.id,
            handle,
        });
        self.results_state = TableState::default();
        self.clear_status();
        true
    }

    /// Collect the outcome of a finished search, if any.
    ///
    /// # Returns
    /// * `bool` - True if state changed
    ///
    /// # Details
    /// Never waits on a running task.
    pub async fn poll_search(&mut self) -> bool {
        let finished = self
            .search_task
            .as_ref()
            .is_some_and(|task| task.handle.is_finished());
        if !finished {
            return false;
        }

        let task = match self.search_task.take() {
            Some(task) => task,
            None => return false,
        };

        let outcome = match task.handle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(error = %e, "search task failed");
                Err(SearchError::RequestSetup(e.to_string()))
            }
        };

        let applied = self.view.resolve(task.id, outcome);
        if applied {
            match self.view.result().map(|result| result.movies.len()) {
                Some(0) => self.set_status("No movies found".to_string()),
                Some(count) => {
                    self.results_state.select(Some(0));
                    self.set_status(format!("Found {} movies", count));
                }
                None => {}
            }
        }
        applied
    }

    /// Label of the picked date for the results block.
    pub fn display_date_label(&self) -> String {
        self.view
            .selected_date()
            .map(format_query_date)
            .unwrap_or_default()
    }

    /// Movies currently shown, if any.
    fn current_movies(&self) -> &[Movie] {
        match self.view.result() {
            Some(result) if !self.view.is_loading() => &result.movies,
            _ => &[],
        }
    }

    /// Move results selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.current_movies().len();
        if len == 0 {
            return;
        }
        let selected = match self.results_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i.min(len) - 1,
        };
        self.results_state.select(Some(selected));
    }

    /// Move results selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.current_movies().len();
        if len == 0 {
            return;
        }
        let selected = match self.results_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.results_state.select(Some(selected));
    }

    /// The highlighted movie in the results table.
    pub fn selected_movie(&self) -> Option<&Movie> {
        let index = self.results_state.selected()?;
        self.current_movies().get(index)
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
